//=========================================================================
// Scene System
//=========================================================================
//
// Scene lifecycle and stack-based scene switching.
//
// Architecture:
//   SceneStack
//     ├─ scenes: Vec<(K, Box<dyn Scene<K>>)>
//     ├─ active: Option<usize>
//     └─ factory: Option<AssetFactory>
//
// Flow:
//   EventBus::update(stack) → Scene::on_input()
//   SceneStack::update()    → Scene::on_update()   (active scene only)
//   SceneStack::render()    → Scene::on_render()   (active scene only)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;

//=== Internal Dependencies ===============================================

use crate::core::assets::{AssetError, AssetFactory};
use crate::core::event_bus::{Event, EventBus, EventTarget};
use crate::core::render::Renderer;

//=== Module Declarations =================================================

mod scene_stack;

//=== Public API ==========================================================

pub use scene_stack::SceneStack;

//=== Scene Key Trait =====================================================

/// Marker trait for scene identifiers.
///
/// Scene keys uniquely identify scenes on the SceneStack and double as
/// bus addresses (`EventTarget::Scene(key)`). Typically implemented by
/// game-specific enums.
pub trait SceneKey: Clone + Copy + Eq + Hash + Debug + Send + 'static {}

//=== Scene Trait =========================================================

/// Defines scene behavior with lifecycle hooks, input, update and render.
///
/// Scenes are pushed onto the SceneStack, which owns them from then on.
/// Each scene keeps its own state between activations.
///
/// # Minimal Implementation
///
/// ```rust
/// # use projectile_lab::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum GameScene { Main }
/// # impl SceneKey for GameScene {}
/// struct MyScene;
///
/// impl Scene<GameScene> for MyScene {
///     fn on_input(&mut self, _event: &Event, _ctx: &mut SceneContext<GameScene>) {}
///     fn on_update(&mut self, _dt: f32, _ctx: &mut SceneContext<GameScene>) {}
///     fn on_render(&self, _renderer: &mut dyn Renderer) {}
/// }
/// ```
pub trait Scene<K: SceneKey>: Send {
    /// Called when the scene becomes active.
    ///
    /// `factory` is `Some` once the stack has factory mode enabled. A
    /// missing asset is returned as an error and aborts the run.
    fn on_enter(&mut self, _factory: Option<&AssetFactory>) -> Result<(), AssetError> {
        Ok(())
    }

    /// Called when the scene stops being active.
    fn on_exit(&mut self) {}

    /// Handles an event delivered by the bus.
    fn on_input(&mut self, event: &Event, ctx: &mut SceneContext<K>);

    /// Called every tick while the scene is active.
    fn on_update(&mut self, dt: f32, ctx: &mut SceneContext<K>);

    /// Issues draw calls for the current frame.
    fn on_render(&self, renderer: &mut dyn Renderer);
}

//=== SceneContext ========================================================

/// Per-callback handle given to scenes.
///
/// Scene switches and exit requests are recorded here and applied by the
/// stack once the callback returns.
pub struct SceneContext<'a, K: SceneKey> {
    bus: &'a mut EventBus<K>,
    switch: Option<K>,
    exit: bool,
}

impl<'a, K: SceneKey> SceneContext<'a, K> {
    pub fn new(bus: &'a mut EventBus<K>) -> Self {
        Self {
            bus,
            switch: None,
            exit: false,
        }
    }

    /// Publishes an event on the bus. See [`EventBus::publish`].
    pub fn publish(&mut self, event: Event, immediate: bool, target: Option<EventTarget<K>>) {
        self.bus.publish(event, immediate, target);
    }

    /// Requests a switch to `key` once the current callback returns.
    /// A later request in the same callback replaces an earlier one.
    pub fn switch_to(&mut self, key: K) {
        self.switch = Some(key);
    }

    /// Requests application shutdown.
    pub fn request_exit(&mut self) {
        self.exit = true;
    }

    pub fn pending_switch(&self) -> Option<K> {
        self.switch
    }

    pub fn exit_requested(&self) -> bool {
        self.exit
    }

    pub(crate) fn into_requests(self) -> (Option<K>, bool) {
        (self.switch, self.exit)
    }
}
