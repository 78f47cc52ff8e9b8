//=========================================================================
// Projectile Materials
//=========================================================================

//=== External Dependencies ===============================================

use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use crate::core::input::KeyCode;

//=== Material ============================================================

/// Projectile material. Fixes density and drag coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Material {
    #[default]
    Iron,
    Aluminium,
    Copper,
    Stone,
}

impl Material {
    pub const ALL: [Material; 4] = [Self::Iron, Self::Aluminium, Self::Copper, Self::Stone];

    /// Density of the reference material the launch energy is tuned for.
    pub const REFERENCE_DENSITY: f32 = 7874.0;

    /// 1-based index, as shown in the HUD and bound to the digit keys.
    pub fn index(self) -> u8 {
        match self {
            Self::Iron => 1,
            Self::Aluminium => 2,
            Self::Copper => 3,
            Self::Stone => 4,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(Self::Iron),
            2 => Some(Self::Aluminium),
            3 => Some(Self::Copper),
            4 => Some(Self::Stone),
            _ => None,
        }
    }

    /// Digit key selecting this material.
    pub fn key(self) -> KeyCode {
        match self {
            Self::Iron => KeyCode::Digit1,
            Self::Aluminium => KeyCode::Digit2,
            Self::Copper => KeyCode::Digit3,
            Self::Stone => KeyCode::Digit4,
        }
    }

    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::Digit1 => Some(Self::Iron),
            KeyCode::Digit2 => Some(Self::Aluminium),
            KeyCode::Digit3 => Some(Self::Copper),
            KeyCode::Digit4 => Some(Self::Stone),
            _ => None,
        }
    }

    /// Next material, wrapping Stone → Iron.
    pub fn next(self) -> Self {
        match self {
            Self::Iron => Self::Aluminium,
            Self::Aluminium => Self::Copper,
            Self::Copper => Self::Stone,
            Self::Stone => Self::Iron,
        }
    }

    /// Previous material, wrapping Iron → Stone.
    pub fn previous(self) -> Self {
        match self {
            Self::Iron => Self::Stone,
            Self::Aluminium => Self::Iron,
            Self::Copper => Self::Aluminium,
            Self::Stone => Self::Copper,
        }
    }

    /// Density in kg/m³.
    pub fn density(self) -> f32 {
        match self {
            Self::Iron => 7874.0,
            Self::Aluminium => 2700.0,
            Self::Copper => 8960.0,
            Self::Stone => 7140.0,
        }
    }

    /// Drag coefficient of a sphere of this material.
    pub fn drag_coefficient(self) -> f32 {
        match self {
            Self::Iron => 0.47,
            Self::Aluminium => 0.45,
            Self::Copper => 0.44,
            Self::Stone => 0.50,
        }
    }

    /// Density relative to iron.
    pub fn density_factor(self) -> f32 {
        self.density() / Self::REFERENCE_DENSITY
    }

    /// HUD label. `Stone` is displayed as "Zinc".
    pub fn label(self) -> &'static str {
        match self {
            Self::Iron => "Iron",
            Self::Aluminium => "Aluminium",
            Self::Copper => "Copper",
            Self::Stone => "Zinc",
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
