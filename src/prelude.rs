//=========================================================================
// Prelude
//=========================================================================
//
// Re-exports the types a scene implementation usually needs.
//
// Usage:
//   use projectile_lab::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::core::CoreSystems;

// Scenes
pub use crate::core::scene::{Scene, SceneContext, SceneKey, SceneStack};

// Events and input
pub use crate::core::event_bus::{ActionId, Event, EventBus, EventTarget};
pub use crate::core::input::{KeyCode, KeyState, MouseButton};

// Assets and rendering
pub use crate::core::assets::{AssetError, AssetFactory, FontHandle, TextureHandle};
pub use crate::core::render::{Rect, Renderer};

// Configuration
pub use crate::config::SimulationConfig;
