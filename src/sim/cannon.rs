//=========================================================================
// Cannon
//=========================================================================
//
// Launch parameters, the loaded/in-flight projectile and its trajectory.
//
// Lifecycle:
//   loaded ──fire()──→ in flight ──advance()──→ ... ──reload()──→ loaded
//
// Parameter edits (mass, material, drag) apply to the loaded projectile.
// A projectile in flight keeps what it was fired with; the next reload
// picks up the current settings. The barrel angle can change at any time.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::debug;

//=== Internal Dependencies ===============================================

use super::{Material, Projectile, ProjectileIntegrator, Trajectory};
use crate::config::{CannonConfig, PhysicsConfig};
use crate::core::input::{KeyCode, KeyState};

//=== Cannon ==============================================================

#[derive(Debug, Clone)]
pub struct Cannon {
    config: CannonConfig,
    metre: f32,
    integrator: ProjectileIntegrator,

    angle: f32,
    mass: f32,
    material: Material,
    drag_enabled: bool,

    projectile: Projectile,
    trajectory: Trajectory,
}

impl Cannon {
    //--- Construction -----------------------------------------------------

    pub fn new(config: CannonConfig, physics: PhysicsConfig, point_radius: f32) -> Self {
        let metre = physics.metre;
        let angle = config.initial_angle.clamp(config.min_angle, config.max_angle);
        let mass = config.initial_mass.max(config.min_mass);
        let material = config.initial_material;
        let drag_enabled = config.drag_enabled;
        let muzzle = muzzle_position(&config, angle);

        Self {
            projectile: Projectile::loaded(muzzle, mass, material, drag_enabled),
            integrator: ProjectileIntegrator::new(physics, point_radius),
            trajectory: Trajectory::new(),
            config,
            metre,
            angle,
            mass,
            material,
            drag_enabled,
        }
    }

    //--- Input ------------------------------------------------------------

    /// Applies a cannon key binding. Only pressed keys are handled.
    ///
    /// Returns `true` if the key was a cannon binding.
    pub fn on_input(&mut self, key: KeyCode, state: KeyState) -> bool {
        if state != KeyState::Pressed {
            return false;
        }

        match key {
            KeyCode::ArrowUp => self.adjust_angle(self.config.angle_step),
            KeyCode::ArrowDown => self.adjust_angle(-self.config.angle_step),
            KeyCode::KeyW => self.adjust_mass(self.config.mass_step),
            KeyCode::KeyS => self.adjust_mass(-self.config.mass_step),
            KeyCode::KeyA => {
                self.toggle_drag();
            }
            key => match Material::from_key(key) {
                Some(material) => self.set_material(material),
                None => return false,
            },
        }
        true
    }

    //--- Parameters -------------------------------------------------------

    /// Changes the barrel angle by `delta` degrees, clamped to the
    /// configured range.
    pub fn adjust_angle(&mut self, delta: f32) {
        self.angle = (self.angle + delta).clamp(self.config.min_angle, self.config.max_angle);
        if !self.projectile.is_fired() {
            self.load();
        }
    }

    /// Changes the mass by `delta` kg, never going below the minimum.
    pub fn adjust_mass(&mut self, delta: f32) {
        self.mass = (self.mass + delta).max(self.config.min_mass);
        if !self.projectile.is_fired() {
            self.load();
        }
    }

    pub fn set_material(&mut self, material: Material) {
        if material != self.material {
            debug!("Material set to {:?}", material);
        }
        self.material = material;
        if !self.projectile.is_fired() {
            self.load();
        }
    }

    /// Toggles air resistance and returns the new state.
    pub fn toggle_drag(&mut self) -> bool {
        self.drag_enabled = !self.drag_enabled;
        debug!("Air resistance {}", if self.drag_enabled { "enabled" } else { "disabled" });
        if !self.projectile.is_fired() {
            self.load();
        }
        self.drag_enabled
    }

    //--- Flight -----------------------------------------------------------

    /// Fires the loaded projectile. Returns `false` if it is already in
    /// flight.
    pub fn fire(&mut self) -> bool {
        if self.projectile.is_fired() {
            return false;
        }

        let muzzle = self.muzzle();
        let velocity = self.direction() * self.launch_speed();
        self.trajectory.clear();
        self.projectile.launch(muzzle, velocity);

        debug!(
            "Fired {:?} {:.1}kg at {}° ({:.1} px/s)",
            self.material,
            self.mass,
            self.angle,
            velocity.length()
        );
        true
    }

    /// Loads a fresh projectile at the muzzle and clears the trajectory.
    pub fn reload(&mut self) {
        self.trajectory.clear();
        self.load();
    }

    /// Advances the projectile in flight. See [`ProjectileIntegrator::advance`].
    pub fn advance(&mut self, dt: f32) -> bool {
        self.integrator.advance(&mut self.projectile, &mut self.trajectory, dt)
    }

    //--- Derived Values ---------------------------------------------------

    /// Muzzle position: the barrel tip in world pixels.
    pub fn muzzle(&self) -> Vec2 {
        muzzle_position(&self.config, self.angle)
    }

    /// Launch speed in px/s for the current mass and material.
    ///
    /// `v = sqrt(2E / (m · ρ/ρ_iron))` in m/s.
    pub fn launch_speed(&self) -> f32 {
        let effective_mass = self.mass * self.material.density_factor();
        (2.0 * self.config.launch_energy / effective_mass).sqrt() * self.metre
    }

    fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.angle.to_radians())
    }

    fn load(&mut self) {
        self.projectile = Projectile::loaded(self.muzzle(), self.mass, self.material, self.drag_enabled);
    }

    //--- Accessors --------------------------------------------------------

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn material(&self) -> Material {
        self.material
    }

    pub fn drag_enabled(&self) -> bool {
        self.drag_enabled
    }

    pub fn pivot(&self) -> Vec2 {
        self.config.pivot
    }

    pub fn projectile(&self) -> &Projectile {
        &self.projectile
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn metre(&self) -> f32 {
        self.metre
    }
}

fn muzzle_position(config: &CannonConfig, angle: f32) -> Vec2 {
    config.pivot + Vec2::from_angle(angle.to_radians()) * config.barrel_length
}

//=========================================================================
// Unit Tests
//=========================================================================
