//=========================================================================
// Simulation Configuration
//=========================================================================
//
// Tunables for physics, cannon, target, world and engine pacing.
//
// Every section falls back to its defaults field by field, so a JSON
// file only needs to name what it changes:
//
//   { "cannon": { "initial_angle": 30 }, "engine": { "tps": 120 } }
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use glam::Vec2;
use log::debug;
use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use crate::sim::Material;

//=== ConfigError =========================================================

#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Io { path: PathBuf, source: io::Error },

    /// The file is not valid JSON for this schema.
    Parse(serde_json::Error),

    /// A value is out of its allowed range.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read {}: {}", path.display(), source),
            Self::Parse(err) => write!(f, "malformed configuration: {}", err),
            Self::Invalid(reason) => write!(f, "invalid configuration: {}", reason),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

//=== Sections ============================================================

/// Physical constants. `metre` is the number of world pixels per metre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    pub air_density: f32,
    pub metre: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 9.81,
            air_density: 1.225,
            metre: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CannonConfig {
    /// Barrel pivot in world pixels.
    pub pivot: Vec2,
    pub barrel_length: f32,
    pub min_angle: f32,
    pub max_angle: f32,
    pub angle_step: f32,
    pub initial_angle: f32,
    /// Projectile mass in kg.
    pub initial_mass: f32,
    pub min_mass: f32,
    pub mass_step: f32,
    /// Muzzle energy in joules.
    pub launch_energy: f32,
    pub initial_material: Material,
    pub drag_enabled: bool,
}

impl Default for CannonConfig {
    fn default() -> Self {
        Self {
            pivot: Vec2::new(80.0, 40.0),
            barrel_length: 50.0,
            min_angle: 0.0,
            max_angle: 90.0,
            angle_step: 1.0,
            initial_angle: 45.0,
            initial_mass: 1.0,
            min_mass: 0.1,
            mass_step: 0.1,
            launch_energy: 500.0,
            initial_material: Material::Iron,
            drag_enabled: true,
        }
    }
}

/// Target bounding box, bottom-left position in world pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            position: Vec2::new(1000.0, 0.0),
            width: 100.0,
            height: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Camera pan per tick while an arrow key is held (pixels).
    pub camera_speed: f32,
    pub camera_max_x: f32,
    /// Height below which a flight is over.
    pub floor_y: f32,
    pub trajectory_radius: f32,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            camera_speed: 10.0,
            camera_max_x: 1720.0,
            floor_y: 0.0,
            trajectory_radius: 5.0,
            viewport_width: 1280,
            viewport_height: 720,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub tps: u32,
    pub channel_capacity: usize,
    pub window_title: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tps: 60,
            channel_capacity: 128,
            window_title: "Projectile Lab".to_owned(),
        }
    }
}

//=== SimulationConfig ====================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub physics: PhysicsConfig,
    pub cannon: CannonConfig,
    pub target: TargetConfig,
    pub world: WorldConfig,
    pub engine: EngineConfig,
}

impl SimulationConfig {
    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Loaded configuration from {}", path.display());
        Self::from_json_str(&json)
    }

    /// Checks every value against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let physics = &self.physics;
        ensure(physics.gravity > 0.0 && physics.gravity.is_finite(), "physics.gravity must be positive")?;
        ensure(physics.air_density >= 0.0, "physics.air_density must not be negative")?;
        ensure(physics.metre > 0.0, "physics.metre must be positive")?;

        let cannon = &self.cannon;
        ensure(cannon.min_angle <= cannon.max_angle, "cannon.min_angle exceeds cannon.max_angle")?;
        ensure(
            (cannon.min_angle..=cannon.max_angle).contains(&cannon.initial_angle),
            "cannon.initial_angle is outside [min_angle, max_angle]",
        )?;
        ensure(cannon.angle_step > 0.0, "cannon.angle_step must be positive")?;
        ensure(cannon.min_mass > 0.0, "cannon.min_mass must be positive")?;
        ensure(cannon.initial_mass >= cannon.min_mass, "cannon.initial_mass is below cannon.min_mass")?;
        ensure(cannon.mass_step > 0.0, "cannon.mass_step must be positive")?;
        ensure(cannon.launch_energy > 0.0, "cannon.launch_energy must be positive")?;
        ensure(cannon.barrel_length >= 0.0, "cannon.barrel_length must not be negative")?;

        ensure(self.target.width > 0.0 && self.target.height > 0.0, "target size must be positive")?;

        let world = &self.world;
        ensure(world.camera_speed >= 0.0, "world.camera_speed must not be negative")?;
        ensure(world.camera_max_x >= 0.0, "world.camera_max_x must not be negative")?;
        ensure(world.trajectory_radius > 0.0, "world.trajectory_radius must be positive")?;
        ensure(world.viewport_width > 0 && world.viewport_height > 0, "world viewport must not be empty")?;

        ensure(self.engine.tps > 0, "engine.tps must be positive")?;
        ensure(self.engine.channel_capacity > 0, "engine.channel_capacity must be positive")?;

        Ok(())
    }
}

fn ensure(condition: bool, reason: &str) -> Result<(), ConfigError> {
    if condition {
        Ok(())
    } else {
        Err(ConfigError::Invalid(reason.to_owned()))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
