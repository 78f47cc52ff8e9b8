//=========================================================================
// Projectile Integrator
//=========================================================================
//
// Advances a projectile under gravity and optional quadratic air drag.
//
// Forces are evaluated in SI units and converted back to world pixels:
//
//   F_gravity = m · g                              (downward)
//   F_drag    = -½ · ρ_air · Cd · A · |v| · v       (v in m/s)
//   A         = π r²,  r = ∛(3m / 4πρ)
//
// Integration is semi-implicit Euler (velocity first, then position).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::f32::consts::PI;

use glam::Vec2;
use log::trace;

//=== Internal Dependencies ===============================================

use super::{Material, Projectile, Trajectory};
use crate::config::PhysicsConfig;

//=== ProjectileIntegrator ================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileIntegrator {
    physics: PhysicsConfig,
    point_radius: f32,
}

impl ProjectileIntegrator {
    pub fn new(physics: PhysicsConfig, point_radius: f32) -> Self {
        Self {
            physics,
            point_radius,
        }
    }

    pub fn physics(&self) -> &PhysicsConfig {
        &self.physics
    }

    /// Advances a fired projectile by `dt` seconds and appends one
    /// trajectory point. Returns `false` (and does nothing) if the
    /// projectile has not been fired.
    pub fn advance(&self, projectile: &mut Projectile, trajectory: &mut Trajectory, dt: f32) -> bool {
        if !projectile.is_fired() {
            return false;
        }

        let metre = self.physics.metre;
        let acceleration = self.acceleration(projectile) * metre;

        projectile.velocity += acceleration * dt;
        projectile.position += projectile.velocity * dt;
        trajectory.push(projectile.position, self.point_radius);

        trace!(
            "projectile at {:?} moving {:?}",
            projectile.position,
            projectile.velocity
        );
        true
    }

    /// Net acceleration in m/s².
    pub fn acceleration(&self, projectile: &Projectile) -> Vec2 {
        let mass = projectile.mass();
        let gravity = Vec2::new(0.0, -mass * self.physics.gravity);

        let drag = if projectile.drag_enabled() {
            self.drag_force(projectile.velocity / self.physics.metre, mass, projectile.material())
        } else {
            Vec2::ZERO
        };

        (gravity + drag) / mass
    }

    /// Quadratic drag force in newtons for a velocity in m/s.
    pub fn drag_force(&self, velocity: Vec2, mass: f32, material: Material) -> Vec2 {
        let area = cross_section(mass, material);
        -0.5 * self.physics.air_density * material.drag_coefficient() * area * velocity.length() * velocity
    }
}

/// Cross-sectional area (m²) of a solid sphere of the given mass.
pub fn cross_section(mass: f32, material: Material) -> f32 {
    let radius = (3.0 * mass / (4.0 * PI * material.density())).cbrt();
    PI * radius * radius
}

//=========================================================================
// Unit Tests
//=========================================================================
