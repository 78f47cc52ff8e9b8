//=========================================================================
// Projectile Lab - Library Root
//
// Interactive cannon range: a projectile with quadratic air drag flies
// toward a target while the player tunes angle, mass, material and drag.
//
// Layout:
// - `core`: scene stack, event bus, input, assets, renderer seam and the
//   logic-thread orchestrator
// - `sim`: cannon, projectile integrator, materials and hit testing
// - `game`: the menu and simulation scenes built on both
// - `config`: JSON configuration with defaults for every value
//
// Typical usage:
// ```no_run
// use projectile_lab::config::SimulationConfig;
// use projectile_lab::game::{self, SceneId};
// use projectile_lab::EngineBuilder;
//
// let config = SimulationConfig::default();
// EngineBuilder::<SceneId>::from_config(&config)
//     .build()
//     .init(|systems| game::install(systems, &config))
//     .run()
//     .ok();
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------

pub mod config;
pub mod core;
pub mod game;
pub mod prelude;
pub mod sim;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the Winit window and is not part of the public API.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
