//=========================================================================
// Scene Stack
//=========================================================================
//
// Owns the scenes, tracks the active one and routes bus deliveries.
//
// Scenes are stored in push order and referenced by key. The active
// scene need not be the top: `switch_to` moves the active index without
// reordering, so every scene keeps its state between activations.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::{Scene, SceneContext, SceneKey};
use crate::core::assets::{AssetError, AssetFactory};
use crate::core::event_bus::{Event, EventBus, EventSink, EventTarget};
use crate::core::render::Renderer;

//=== SceneStack ==========================================================

pub struct SceneStack<K: SceneKey> {
    scenes: Vec<(K, Box<dyn Scene<K>>)>,
    active: Option<usize>,
    home: Option<K>,
    factory: Option<AssetFactory>,
    started: bool,
    exit_requested: bool,
    failure: Option<AssetError>,
}

impl<K: SceneKey> SceneStack<K> {
    //--- Construction -----------------------------------------------------

    /// Creates an empty stack with no active scene and factory mode off.
    pub fn new() -> Self {
        Self {
            scenes: Vec::new(),
            active: None,
            home: None,
            factory: None,
            started: false,
            exit_requested: false,
            failure: None,
        }
    }

    //--- Setup ------------------------------------------------------------

    /// Appends a scene. The active scene is unchanged.
    ///
    /// Returns `false` (and drops `scene`) if the key is already in use.
    pub fn push(&mut self, key: K, scene: Box<dyn Scene<K>>) -> bool {
        if self.index_of(key).is_some() {
            warn!("Scene {:?} is already on the stack", key);
            return false;
        }

        debug!("Pushed scene {:?}", key);
        self.scenes.push((key, scene));
        true
    }

    /// Selects the scene the stack starts from. It is also the home scene
    /// that `Back` returns to.
    pub fn start_from(&mut self, key: K) {
        match self.index_of(key) {
            Some(index) => {
                debug!("Initial scene set to {:?}", key);
                self.home = Some(key);
                if !self.started {
                    self.active = Some(index);
                }
            }
            None => warn!("Cannot start from {:?}: scene not on the stack", key),
        }
    }

    /// Hands the asset factory to the stack. Every later `on_enter`
    /// receives it.
    pub fn enable_factory(&mut self, factory: AssetFactory) {
        debug!("Asset factory enabled ({} assets)", factory.len());
        self.factory = Some(factory);
    }

    /// Enters the initial scene and subscribes the stack to the bus.
    ///
    /// Without a prior `start_from`, the bottom scene is used.
    pub fn start(&mut self, bus: &mut EventBus<K>) -> Result<(), AssetError> {
        if self.started {
            warn!("Scene stack already started");
            return Ok(());
        }

        bus.subscribe(EventTarget::Stack);
        self.started = true;

        if self.active.is_none() && !self.scenes.is_empty() {
            self.active = Some(0);
            self.home = Some(self.scenes[0].0);
        }

        match self.active {
            Some(index) => {
                info!("Starting scene stack at {:?}", self.scenes[index].0);
                self.enter(index)
            }
            None => {
                warn!("Scene stack started empty");
                Ok(())
            }
        }
    }

    //--- Transitions ------------------------------------------------------

    /// Makes `key` the active scene.
    ///
    /// The outgoing scene gets `on_exit`, the incoming one `on_enter`.
    /// An unknown key is logged and leaves the active scene unchanged.
    pub fn switch_to(&mut self, key: K) -> Result<(), AssetError> {
        let Some(index) = self.index_of(key) else {
            warn!("Cannot switch to {:?}: scene not on the stack", key);
            return Ok(());
        };

        if !self.started {
            self.active = Some(index);
            return Ok(());
        }

        if let Some(current) = self.active {
            debug!("Switching scene {:?} -> {:?}", self.scenes[current].0, key);
            self.scenes[current].1.on_exit();
        }

        self.active = Some(index);
        self.enter(index)
    }

    /// Removes the top scene.
    ///
    /// If it was active it gets `on_exit`, and the new top (if any)
    /// becomes active and gets `on_enter`.
    pub fn pop(&mut self) -> Result<Option<K>, AssetError> {
        let Some(top) = self.scenes.len().checked_sub(1) else {
            return Ok(None);
        };

        let was_active = self.active == Some(top);
        if was_active && self.started {
            self.scenes[top].1.on_exit();
        }

        let (key, _scene) = self.scenes.remove(top);
        debug!("Popped scene {:?}", key);

        if self.home == Some(key) {
            self.home = None;
        }

        if was_active {
            self.active = self.scenes.len().checked_sub(1);
            if let (Some(index), true) = (self.active, self.started) {
                self.enter(index)?;
            }
        }

        Ok(Some(key))
    }

    //--- Frame Loop -------------------------------------------------------

    /// Ticks the active scene.
    ///
    /// Also reports asset failures raised while the bus was delivering.
    pub fn update(&mut self, dt: f32, bus: &mut EventBus<K>) -> Result<(), AssetError> {
        if let Some(err) = self.failure.take() {
            return Err(err);
        }

        if let Some(index) = self.active {
            self.run_scene(index, bus, |scene, ctx| scene.on_update(dt, ctx))?;
        }

        match self.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Renders the active scene.
    pub fn render(&self, renderer: &mut dyn Renderer) {
        if let Some(index) = self.active {
            self.scenes[index].1.on_render(renderer);
        }
    }

    //--- Query API --------------------------------------------------------

    pub fn active_key(&self) -> Option<K> {
        self.active.map(|index| self.scenes[index].0)
    }

    pub fn home_key(&self) -> Option<K> {
        self.home
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn factory_enabled(&self) -> bool {
        self.factory.is_some()
    }

    /// True once any scene has requested application exit.
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Takes an asset failure raised during bus delivery, if any.
    pub fn take_failure(&mut self) -> Option<AssetError> {
        self.failure.take()
    }

    //--- Internal Helpers -------------------------------------------------

    fn index_of(&self, key: K) -> Option<usize> {
        self.scenes.iter().position(|(k, _)| *k == key)
    }

    fn enter(&mut self, index: usize) -> Result<(), AssetError> {
        let (key, scene) = &mut self.scenes[index];
        debug!("Entering scene {:?}", key);
        scene.on_enter(self.factory.as_ref())
    }

    /// Runs one scene callback, then flushes the directed events it raised
    /// and applies its switch/exit requests.
    fn run_scene<F>(&mut self, index: usize, bus: &mut EventBus<K>, callback: F) -> Result<(), AssetError>
    where
        F: FnOnce(&mut dyn Scene<K>, &mut SceneContext<K>),
    {
        let (switch, exit) = {
            let mut ctx = SceneContext::new(bus);
            callback(self.scenes[index].1.as_mut(), &mut ctx);
            ctx.into_requests()
        };

        if exit && !self.exit_requested {
            info!("Exit requested by scene {:?}", self.scenes[index].0);
            self.exit_requested = true;
        }

        bus.dispatch_directed(self);

        match switch {
            Some(key) => self.switch_to(key),
            None => Ok(()),
        }
    }

    fn record_failure(&mut self, err: AssetError) {
        if self.failure.is_none() {
            self.failure = Some(err);
        }
    }
}

//=== EventSink ===========================================================

impl<K: SceneKey> EventSink<K> for SceneStack<K> {
    fn deliver(&mut self, target: EventTarget<K>, event: &Event, bus: &mut EventBus<K>) {
        let index = match target {
            EventTarget::Stack if *event == Event::Back => {
                match self.home {
                    Some(home) if self.active_key() != Some(home) => {
                        if let Err(err) = self.switch_to(home) {
                            self.record_failure(err);
                        }
                    }
                    Some(_) => debug!("Back ignored: already at the home scene"),
                    None => warn!("Back ignored: no home scene"),
                }
                return;
            }
            EventTarget::Stack => self.active,
            EventTarget::Scene(key) => self.index_of(key),
        };

        let Some(index) = index else {
            debug!("No scene to receive {:?} for {:?}", event, target);
            return;
        };

        let event = *event;
        if let Err(err) = self.run_scene(index, bus, |scene, ctx| scene.on_input(&event, ctx)) {
            self.record_failure(err);
        }
    }
}

//=== Trait Implementations ===============================================

impl<K: SceneKey> Default for SceneStack<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: SceneKey> Drop for SceneStack<K> {
    fn drop(&mut self) {
        if let (Some(index), true) = (self.active, self.started) {
            self.scenes[index].1.on_exit();
        }

        while let Some((key, scene)) = self.scenes.pop() {
            debug!("Dropping scene {:?}", key);
            drop(scene);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
