//=========================================================================
// Target
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Internal Dependencies ===============================================

use crate::config::TargetConfig;
use crate::core::render::Rect;

//=== Verdict =============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Missed,
    Hit,
}

impl Verdict {
    pub fn label(self) -> &'static str {
        match self {
            Self::Missed => "Missed!",
            Self::Hit => "Hit!",
        }
    }
}

//=== HitTest =============================================================

/// Hit evaluation for one projectile position.
///
/// `missed` and `hit` are independent: `missed` looks only at the
/// horizontal offset from the target centre, `hit` only at height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitTest {
    pub missed: bool,
    pub hit: bool,
    /// Signed horizontal distance to the target centre, in metres.
    /// Positive while the projectile is short of the centre.
    pub distance_to_target: f32,
}

impl HitTest {
    /// Missed takes precedence over Hit.
    pub fn verdict(&self) -> Option<Verdict> {
        if self.missed {
            Some(Verdict::Missed)
        } else if self.hit {
            Some(Verdict::Hit)
        } else {
            None
        }
    }
}

//=== Target ==============================================================

/// Static target box, bottom-left position in world pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    bounds: Rect,
}

impl Target {
    pub fn new(position: Vec2, width: f32, height: f32) -> Self {
        Self {
            bounds: Rect::new(position.x, position.y, width, height),
        }
    }

    pub fn from_config(config: &TargetConfig) -> Self {
        Self::new(config.position, config.width, config.height)
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn width(&self) -> f32 {
        self.bounds.size.x
    }

    pub fn height(&self) -> f32 {
        self.bounds.size.y
    }

    /// Evaluates a projectile position against the target.
    pub fn hit_test(&self, position: Vec2, metre: f32) -> HitTest {
        let width = self.width();
        let centre_x = self.bounds.position.x + width / 2.0;
        let distance_to_target = (centre_x - position.x) / metre;

        HitTest {
            missed: distance_to_target.abs() > width / (2.0 * metre),
            hit: position.y < self.height() / 4.0,
            distance_to_target,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
