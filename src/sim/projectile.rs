//=========================================================================
// Projectile & Trajectory
//=========================================================================
//
// Flight state of a single projectile and the trail it leaves.
//
// Positions are world pixels (y up), velocities pixels per second. Mass
// is in kilograms.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Internal Dependencies ===============================================

use super::Material;

//=== Projectile ==========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub position: Vec2,
    pub velocity: Vec2,
    mass: f32,
    material: Material,
    drag_enabled: bool,
    fired: bool,
    start_position: Vec2,
}

impl Projectile {
    /// Creates a projectile loaded (at rest, unfired) at `position`.
    pub fn loaded(position: Vec2, mass: f32, material: Material, drag_enabled: bool) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            mass,
            material,
            drag_enabled,
            fired: false,
            start_position: position,
        }
    }

    /// Puts the projectile in flight from `start` with `velocity`.
    pub fn launch(&mut self, start: Vec2, velocity: Vec2) {
        self.position = start;
        self.start_position = start;
        self.velocity = velocity;
        self.fired = true;
    }

    //--- Accessors --------------------------------------------------------

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn material(&self) -> Material {
        self.material
    }

    pub fn drag_enabled(&self) -> bool {
        self.drag_enabled
    }

    pub fn is_fired(&self) -> bool {
        self.fired
    }

    pub fn start_position(&self) -> Vec2 {
        self.start_position
    }

    /// Horizontal distance from the launch point, in metres.
    pub fn distance_travelled(&self, metre: f32) -> f32 {
        (self.position.x - self.start_position.x) / metre
    }
}

//=== Trajectory ==========================================================

/// One plotted sample of a flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryPoint {
    pub position: Vec2,
    pub radius: f32,
}

/// Append-only trail of trajectory samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    points: Vec<TrajectoryPoint>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, position: Vec2, radius: f32) {
        self.points.push(TrajectoryPoint { position, radius });
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn points(&self) -> &[TrajectoryPoint] {
        &self.points
    }

    pub fn last(&self) -> Option<&TrajectoryPoint> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loaded_projectile_is_at_rest() {
        let p = Projectile::loaded(Vec2::new(10.0, 20.0), 1.0, Material::Iron, true);
        assert!(!p.is_fired());
        assert_eq!(p.velocity, Vec2::ZERO);
        assert_eq!(p.start_position(), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn launch_sets_start_and_velocity() {
        let mut p = Projectile::loaded(Vec2::ZERO, 1.0, Material::Iron, false);
        p.launch(Vec2::new(5.0, 5.0), Vec2::new(100.0, 100.0));

        assert!(p.is_fired());
        assert_eq!(p.start_position(), Vec2::new(5.0, 5.0));
        assert_eq!(p.velocity, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn distance_travelled_is_in_metres() {
        let mut p = Projectile::loaded(Vec2::ZERO, 1.0, Material::Iron, false);
        p.launch(Vec2::new(100.0, 0.0), Vec2::ZERO);
        p.position.x = 350.0;

        assert_eq!(p.distance_travelled(10.0), 25.0);
    }

    #[test]
    fn trajectory_appends_and_clears() {
        let mut t = Trajectory::new();
        t.push(Vec2::new(1.0, 2.0), 5.0);
        t.push(Vec2::new(3.0, 4.0), 5.0);

        assert_eq!(t.len(), 2);
        assert_eq!(t.last().map(|p| p.position), Some(Vec2::new(3.0, 4.0)));

        t.clear();
        assert!(t.is_empty());
    }
}
