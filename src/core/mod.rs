//=========================================================================
// Core Systems Orchestrator
//
// Central coordinator for all engine subsystems running on the logic
// (non-platform) thread.
//
// Responsibilities:
// - Own the EventBus, SceneStack, InputSystem and Renderer
// - Receive platform events over the crossbeam channel
// - Run one fixed-timestep tick per frame at the configured TPS
// - Tell the platform to close once the logic thread stops
//
// Tick order:
//   collect → render → input → bus.update → scenes.update → limiter
//
// Notes:
// The orchestrator runs independently from the platform layer. Nothing
// is shared between the two threads; they only exchange messages.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod assets;
pub mod event_bus;
pub mod input;
pub mod platform_bridge;
pub mod render;
pub mod scene;

//=== Standard Library Imports ============================================

use std::thread;
use std::time::{Duration, Instant};

//=== External Crates =====================================================

use crossbeam_channel::{Receiver, Sender};
use log::{error, info, trace};

//=== Internal Modules ====================================================

use assets::AssetError;
use event_bus::{Event, EventBus};
use input::{InputEvent, InputSystem};
use platform_bridge::{CoreEvent, EventCollector, PlatformEvent, TickControl};
use render::{HeadlessRenderer, Renderer};
use scene::{SceneKey, SceneStack};

//=== CoreSystems =========================================================

/// Everything the logic thread owns. Handed to `Engine::init` for setup.
pub struct CoreSystems<K: SceneKey> {
    pub bus: EventBus<K>,
    pub scenes: SceneStack<K>,
    pub input: InputSystem,
    pub renderer: Box<dyn Renderer + Send>,
    events: Vec<Event>,
}

impl<K: SceneKey> CoreSystems<K> {
    /// Creates the systems with a headless renderer.
    pub fn new(viewport_height: f32) -> Self {
        Self {
            bus: EventBus::new(),
            scenes: SceneStack::new(),
            input: InputSystem::new(viewport_height),
            renderer: Box::new(HeadlessRenderer::new()),
            events: Vec::with_capacity(16),
        }
    }

    /// Enters the initial scene.
    pub fn start(&mut self) -> Result<(), AssetError> {
        self.scenes.start(&mut self.bus)
    }

    //--- tick() -----------------------------------------------------------
    //
    // One logic step:
    //  1. Render the active scene
    //  2. Turn this frame's input into bus events
    //  3. Drain the bus into the scene stack
    //  4. Update the active scene with the fixed `dt`
    //
    pub fn tick(&mut self, batches: &[Vec<InputEvent>], dt: f32) -> Result<TickControl, AssetError> {
        self.renderer.begin_frame();
        self.scenes.render(self.renderer.as_mut());
        self.renderer.end_frame();

        self.events.clear();
        self.input.process_frame(batches, &mut self.events);
        for event in self.events.drain(..) {
            self.bus.publish(event, false, None);
        }

        let delivered = self.bus.update(&mut self.scenes);
        if delivered > 0 {
            trace!("Delivered {} events", delivered);
        }
        if let Some(err) = self.scenes.take_failure() {
            return Err(err);
        }

        self.scenes.update(dt, &mut self.bus)?;

        if self.scenes.exit_requested() {
            return Ok(TickControl::Exit);
        }
        Ok(TickControl::Continue)
    }
}

//=== FrameLimiter ========================================================

/// Sleeps away the rest of each fixed tick interval.
pub struct FrameLimiter {
    frame_duration: Duration,
    frame_start: Instant,
}

impl FrameLimiter {
    pub fn new(tps: f64) -> Self {
        Self {
            frame_duration: Duration::from_secs_f64(1.0 / tps),
            frame_start: Instant::now(),
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Marks the start of a tick.
    pub fn begin(&mut self) {
        self.frame_start = Instant::now();
    }

    /// Sleeps for whatever is left of the tick. Returns the time slept.
    pub fn wait(&self) -> Duration {
        let elapsed = self.frame_start.elapsed();
        match self.frame_duration.checked_sub(elapsed) {
            Some(remaining) => {
                thread::sleep(remaining);
                remaining
            }
            None => {
                trace!("Tick overran by {:?}", elapsed - self.frame_duration);
                Duration::ZERO
            }
        }
    }
}

//=== CoreSystemsOrchestrator =============================================

/// Owns the core systems until the logic thread is spawned.
pub(crate) struct CoreSystemsOrchestrator<K: SceneKey> {
    systems: CoreSystems<K>,
}

impl<K: SceneKey> CoreSystemsOrchestrator<K> {
    //--- Construction -----------------------------------------------------

    pub fn new(viewport_height: f32) -> Self {
        Self {
            systems: CoreSystems::new(viewport_height),
        }
    }

    /// Runs setup code against the systems before the thread starts.
    pub fn init_systems<F>(&mut self, init_fn: F)
    where
        F: FnOnce(&mut CoreSystems<K>),
    {
        init_fn(&mut self.systems);
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Spawns the logic thread. It ticks at `tps` until the window closes,
    // a scene requests exit, or an asset error occurs, then sends
    // `CoreEvent::Shutdown` back to the platform.
    //
    pub fn spawn_core_thread(
        self,
        receiver: Receiver<PlatformEvent>,
        shutdown: Sender<CoreEvent>,
        tps: f64,
    ) -> thread::JoinHandle<()> {
        let dt = (1.0 / tps) as f32;

        thread::spawn(move || {
            let mut systems = self.systems;
            let mut collector = EventCollector::new(receiver);
            let mut limiter = FrameLimiter::new(tps);

            match systems.start() {
                Ok(()) => Self::run_loop(&mut systems, &mut collector, &mut limiter, dt),
                Err(err) => error!("Failed to enter initial scene: {}", err),
            }

            if shutdown.send(CoreEvent::Shutdown).is_err() {
                info!("Platform already gone");
            }
            info!("Core thread exiting");
        })
    }

    fn run_loop(
        systems: &mut CoreSystems<K>,
        collector: &mut EventCollector,
        limiter: &mut FrameLimiter,
        dt: f32,
    ) {
        loop {
            limiter.begin();

            if collector.collect_frame() == TickControl::Exit {
                break;
            }

            match systems.tick(collector.batches(), dt) {
                Ok(TickControl::Continue) => {}
                Ok(TickControl::Exit) => {
                    info!("Exit requested");
                    break;
                }
                Err(err) => {
                    error!("Fatal asset error: {}", err);
                    break;
                }
            }

            limiter.wait();
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::core::assets::{AssetFactory, TextureHandle};
    use crate::core::input::KeyCode;
    use crate::core::scene::{Scene, SceneContext};
    use crossbeam_channel::unbounded;

    #[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
    enum TestScene {
        Only,
    }

    impl SceneKey for TestScene {}

    #[derive(Default)]
    struct Counter {
        keys: Arc<AtomicUsize>,
        updates: Arc<AtomicUsize>,
        require_asset: bool,
    }

    impl Scene<TestScene> for Counter {
        fn on_enter(&mut self, factory: Option<&AssetFactory>) -> Result<(), AssetError> {
            if let (true, Some(factory)) = (self.require_asset, factory) {
                factory.grab_asset::<TextureHandle>("Missing")?;
            }
            Ok(())
        }

        fn on_input(&mut self, event: &Event, ctx: &mut SceneContext<TestScene>) {
            if event.key_in_state(input::KeyState::Pressed).is_some() {
                self.keys.fetch_add(1, Ordering::SeqCst);
            }
            if *event == Event::key_pressed(KeyCode::Escape) {
                ctx.request_exit();
            }
        }

        fn on_update(&mut self, _dt: f32, _ctx: &mut SceneContext<TestScene>) {
            self.updates.fetch_add(1, Ordering::SeqCst);
        }

        fn on_render(&self, _renderer: &mut dyn Renderer) {}
    }

    fn systems(counter: Counter) -> CoreSystems<TestScene> {
        let mut systems = CoreSystems::new(720.0);
        systems.scenes.push(TestScene::Only, Box::new(counter));
        systems
    }

    #[test]
    fn tick_routes_input_to_active_scene_then_updates() {
        let counter = Counter::default();
        let (keys, updates) = (Arc::clone(&counter.keys), Arc::clone(&counter.updates));
        let mut systems = systems(counter);
        systems.start().unwrap();

        let batch = vec![vec![InputEvent::KeyDown(KeyCode::Space)]];
        assert_eq!(systems.tick(&batch, 1.0 / 60.0).unwrap(), TickControl::Continue);

        assert_eq!(keys.load(Ordering::SeqCst), 1);
        assert_eq!(updates.load(Ordering::SeqCst), 1);
        assert_eq!(systems.bus.pending(), 0);
    }

    #[test]
    fn scene_exit_request_stops_the_loop() {
        let mut systems = systems(Counter::default());
        systems.start().unwrap();

        let batch = vec![vec![InputEvent::KeyDown(KeyCode::Escape)]];
        assert_eq!(systems.tick(&batch, 1.0 / 60.0).unwrap(), TickControl::Exit);
    }

    #[test]
    fn missing_asset_fails_start() {
        let mut systems = systems(Counter {
            require_asset: true,
            ..Counter::default()
        });
        systems.scenes.enable_factory(AssetFactory::new());

        assert!(systems.start().is_err());
    }

    #[test]
    fn frame_limiter_sleeps_remaining_time() {
        let mut limiter = FrameLimiter::new(100.0);
        limiter.begin();
        let slept = limiter.wait();
        assert!(slept <= limiter.frame_duration());
    }

    #[test]
    fn core_thread_shuts_down_on_window_close() {
        let (tx, rx) = unbounded();
        let (shutdown_tx, shutdown_rx) = unbounded();
        let mut orchestrator = CoreSystemsOrchestrator::new(720.0);
        orchestrator.init_systems(|systems| {
            systems.scenes.push(TestScene::Only, Box::new(Counter::default()));
        });

        let handle = orchestrator.spawn_core_thread(rx, shutdown_tx, 240.0);
        tx.send(PlatformEvent::WindowClosed).unwrap();

        handle.join().unwrap();
        assert_eq!(shutdown_rx.try_recv(), Ok(CoreEvent::Shutdown));
    }

    #[test]
    fn core_thread_shuts_down_on_asset_failure() {
        let (_tx, rx) = unbounded();
        let (shutdown_tx, shutdown_rx) = unbounded();
        let mut orchestrator = CoreSystemsOrchestrator::new(720.0);
        orchestrator.init_systems(|systems| {
            systems.scenes.push(
                TestScene::Only,
                Box::new(Counter {
                    require_asset: true,
                    ..Counter::default()
                }),
            );
            systems.scenes.enable_factory(AssetFactory::new());
        });

        orchestrator.spawn_core_thread(rx, shutdown_tx, 240.0).join().unwrap();
        assert_eq!(shutdown_rx.try_recv(), Ok(CoreEvent::Shutdown));
    }
}
