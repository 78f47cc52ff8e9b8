//=========================================================================
// Simulation
//
// Ballistics for the cannon range: materials, projectile state, the
// force integrator, the cannon that owns the projectile and the target
// it is aimed at.
//
// Notes:
// Nothing in here knows about scenes, input routing or rendering. The
// game layer feeds key presses in and reads state back out.
//
//=========================================================================

//=== Submodules ==========================================================

mod cannon;
mod integrator;
mod material;
mod projectile;
mod target;

//=== Public API ==========================================================

pub use cannon::Cannon;
pub use integrator::{cross_section, ProjectileIntegrator};
pub use material::Material;
pub use projectile::{Projectile, Trajectory, TrajectoryPoint};
pub use target::{HitTest, Target, Verdict};
