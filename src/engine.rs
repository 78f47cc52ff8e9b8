//=========================================================================
// Engine
//
// Entry point that wires the logic thread to the platform thread.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──init()──>  Engine  ──run()──>  [Runtime]
//         │                                   │                    │
//         ├─ with_tps()                       └─ scene setup       ├─ spawns logic thread
//         ├─ with_channel_capacity()                               ├─ runs platform loop
//         ├─ with_window_title()                                   └─ joins on exit
//         └─ with_viewport()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, unbounded};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::config::SimulationConfig;
use crate::core::platform_bridge::{CoreEvent, PlatformError, PlatformEvent};
use crate::core::scene::SceneKey;
use crate::core::{CoreSystems, CoreSystemsOrchestrator};
use crate::platform::{Platform, WindowSettings};

//=== EngineBuilder =======================================================

/// Builder for an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0
/// - **Channel capacity**: 128 events
/// - **Viewport**: 1280 x 720
///
/// # Examples
///
/// ```no_run
/// use projectile_lab::config::SimulationConfig;
/// use projectile_lab::game::{self, SceneId};
/// use projectile_lab::EngineBuilder;
///
/// let config = SimulationConfig::default();
/// EngineBuilder::<SceneId>::from_config(&config)
///     .build()
///     .init(|systems| game::install(systems, &config))
///     .run()
///     .ok();
/// ```
pub struct EngineBuilder<K: SceneKey> {
    tps: f64,
    channel_capacity: usize,
    window: WindowSettings,
    _phantom: std::marker::PhantomData<K>,
}

impl<K: SceneKey> EngineBuilder<K> {
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            window: WindowSettings {
                title: "Projectile Lab".to_owned(),
                width: 1280,
                height: 720,
            },
            _phantom: std::marker::PhantomData,
        }
    }

    /// Builder seeded from the `engine` and `world` config sections.
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new()
            .with_tps(f64::from(config.engine.tps))
            .with_channel_capacity(config.engine.channel_capacity)
            .with_window_title(&config.engine.window_title)
            .with_viewport(config.world.viewport_width, config.world.viewport_height)
    }

    /// Fixed logic rate of the core thread.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Capacity of the platform → core channel.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    pub fn with_window_title(mut self, title: &str) -> Self {
        self.window.title = title.to_owned();
        self
    }

    /// Logical window size in pixels. Also the height used to flip the
    /// cursor into UI space.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Viewport must be non-empty");
        self.window.width = width;
        self.window.height = height;
        self
    }

    pub fn build(self) -> Engine<K> {
        info!(
            "Building engine (TPS: {}, channel: {}, viewport: {}x{})",
            self.tps, self.channel_capacity, self.window.width, self.window.height
        );

        Engine {
            orchestrator: CoreSystemsOrchestrator::new(self.window.height as f32),
            tps: self.tps,
            channel_capacity: self.channel_capacity,
            window: self.window,
        }
    }
}

impl<K: SceneKey> Default for EngineBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Two-thread runtime.
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreSystemsOrchestrator (Logic Thread @ TPS)
///   │     └─► InputSystem, EventBus, SceneStack
///   │
///   └─► Platform (Event Loop)
///         └─► Window, Input Polling
///
/// PlatformEvent: platform → core (bounded)
/// CoreEvent:     core → platform
/// ```
pub struct Engine<K: SceneKey> {
    orchestrator: CoreSystemsOrchestrator<K>,
    tps: f64,
    channel_capacity: usize,
    window: WindowSettings,
}

impl<K: SceneKey> Engine<K> {
    //--- Initialization ---------------------------------------------------

    /// Gives mutable access to the [`CoreSystems`] before the logic
    /// thread starts. Scenes are registered here.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut CoreSystems<K>),
    {
        info!("Initializing engine systems");
        self.orchestrator.init_systems(init_fn);
        self
    }

    //--- Execution --------------------------------------------------------

    /// Runs until the window closes or a scene requests exit.
    ///
    /// # Lifecycle
    ///
    /// 1. Create the platform → core and core → platform channels
    /// 2. Spawn the logic thread
    /// 3. Run the platform event loop (blocks here)
    /// 4. Join the logic thread
    ///
    /// # Errors
    ///
    /// Returns the [`PlatformError`] if the event loop could not run. The
    /// logic thread is still joined first.
    pub fn run(self) -> Result<(), PlatformError> {
        info!("Starting engine runtime (TPS: {})", self.tps);

        //--- 1. Channels ----------------------------------------------------
        let (tx, rx) = bounded::<PlatformEvent>(self.channel_capacity);
        let (shutdown_tx, shutdown_rx) = unbounded::<CoreEvent>();

        //--- 2. Logic thread ------------------------------------------------
        let core_handle = self.orchestrator.spawn_core_thread(rx, shutdown_tx, self.tps);
        info!("Core logic thread spawned");

        //--- 3. Platform ----------------------------------------------------
        let result = Platform::new(self.window, tx, shutdown_rx).run();
        if let Err(e) = &result {
            error!("Platform error: {}", e);
        }
        info!("Platform event loop exited");

        //--- 4. Join --------------------------------------------------------
        // The platform's sender is dropped by now, so the core sees a
        // disconnect even if WindowClosed never made it through.
        match core_handle.join() {
            Ok(()) => info!("Core thread terminated cleanly"),
            Err(e) => error!("Core thread panicked: {:?}", e),
        }

        info!("Engine shutdown complete");
        result
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestScene {
        Main,
    }

    impl SceneKey for TestScene {}

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::<TestScene>::new();
        assert_eq!(builder.tps, 60.0);
        assert_eq!(builder.channel_capacity, 128);
        assert_eq!((builder.window.width, builder.window.height), (1280, 720));
    }

    #[test]
    fn builder_with_tps() {
        let builder = EngineBuilder::<TestScene>::new().with_tps(120.0);
        assert_eq!(builder.tps, 120.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_zero() {
        EngineBuilder::<TestScene>::new().with_tps(0.0);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        EngineBuilder::<TestScene>::new().with_channel_capacity(0);
    }

    #[test]
    #[should_panic(expected = "Viewport must be non-empty")]
    fn builder_with_empty_viewport_panics() {
        EngineBuilder::<TestScene>::new().with_viewport(0, 720);
    }

    #[test]
    fn builder_reads_config_sections() {
        let mut config = SimulationConfig::default();
        config.engine.tps = 30;
        config.engine.channel_capacity = 64;
        config.engine.window_title = "Range".into();
        config.world.viewport_width = 800;
        config.world.viewport_height = 600;

        let builder = EngineBuilder::<TestScene>::from_config(&config);
        assert_eq!(builder.tps, 30.0);
        assert_eq!(builder.channel_capacity, 64);
        assert_eq!(
            builder.window,
            WindowSettings {
                title: "Range".into(),
                width: 800,
                height: 600,
            }
        );
    }

    #[test]
    fn init_runs_against_core_systems() {
        let mut called = false;
        let _engine = EngineBuilder::<TestScene>::new()
            .with_tps(120.0)
            .with_channel_capacity(256)
            .build()
            .init(|systems| {
                called = systems.scenes.is_empty();
            });
        assert!(called);
    }
}
