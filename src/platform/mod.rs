//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the logic thread via crossbeam
// channels.
//
// Architecture:
// ```text
//  Main Thread:                     Logic Thread:
//  ┌──────────────────────────┐    ┌──────────────────┐
//  │  Winit Event Loop        │    │  CoreSystems     │
//  │   ↓                      │    │   InputSystem    │
//  │  InputProcessor          │    │   EventBus       │
//  │   ↓                      │    │   SceneStack     │
//  │  InputBuffer             │    │                  │
//  │   ↓                      │    └──────────────────┘
//  │  RedrawRequested (flush) │        ↑         │
//  │   ↓                      │        │         │
//  │  PlatformEvent ──────────┼────────┘         │
//  │  CoreEvent ←─────────────┼──────────────────┘
//  └──────────────────────────┘
// ```
//
// RedrawRequested is the frame boundary: all input buffered since the
// previous redraw is sent in one message, and the shutdown channel is
// polled. Empty frames send nothing.
//
// Winit requires the event loop on the main thread (macOS/iOS), so this
// runs on the thread that called `Engine::run()`.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalPosition, LogicalSize},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::platform_bridge::{CoreEvent, PlatformError, PlatformEvent};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== WindowSettings ======================================================

/// Title and logical size of the OS window.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

//=== Platform ============================================================

/// Window owner and input aggregator. Not `Send`; lives on the main
/// thread and talks to the core only through its two channels.
pub(crate) struct Platform {
    window: Option<Window>,
    settings: WindowSettings,
    buffer: InputBuffer,
    input_processor: InputProcessor,
    event_sender: Sender<PlatformEvent>,
    core_events: Receiver<CoreEvent>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// The window itself is created lazily in `resumed()`.
    pub fn new(
        settings: WindowSettings,
        event_sender: Sender<PlatformEvent>,
        core_events: Receiver<CoreEvent>,
    ) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            settings,
            buffer: InputBuffer::new(),
            input_processor: InputProcessor::new(),
            event_sender,
            core_events,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the Winit event loop until the window closes or the core
    /// thread shuts down.
    ///
    /// # Errors
    ///
    /// [`PlatformError`] if the event loop cannot be created or fails
    /// while running.
    ///
    /// # Panics
    ///
    /// Winit panics when this is called off the main thread on macOS/iOS.
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;

        event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(e.to_string()))
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends this frame's input to the core thread. A disconnected core
    /// only drops the events so the window can still be closed.
    fn flush_input_buffer(&mut self) {
        let Some((discrete, continuous)) = self.buffer.drain() else {
            return;
        };

        let (discrete_count, continuous_count) = (discrete.len(), continuous.len());
        trace!(
            target: "platform::input",
            "Flushing {} discrete + {} continuous events",
            discrete_count,
            continuous_count
        );

        if self.event_sender.send(PlatformEvent::Inputs { discrete, continuous }).is_err() {
            warn!(
                target: "platform::input",
                "Channel disconnected, dropping {} events",
                discrete_count + continuous_count
            );
        }
    }

    /// True once the core has asked to close, or is gone.
    fn core_finished(&self) -> bool {
        match self.core_events.try_recv() {
            Ok(CoreEvent::Shutdown) => {
                info!(target: "platform", "Core requested shutdown");
                true
            }
            Err(TryRecvError::Disconnected) => {
                warn!(target: "platform", "Core channel disconnected");
                true
            }
            Err(TryRecvError::Empty) => false,
        }
    }

    fn scale_factor(&self) -> f64 {
        self.window.as_ref().map_or(1.0, Window::scale_factor)
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.settings.title.clone())
            .with_inner_size(LogicalSize::new(self.settings.width, self.settings.height))
            .with_resizable(false);

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::CursorMoved { position, .. } => {
                let logical: LogicalPosition<f64> = position.to_logical(self.scale_factor());
                let event = self.input_processor.process_mouse_move(logical.x, logical.y);
                self.buffer.push_continuous(event);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = self.input_processor.process_key_event(key_event) {
                    self.buffer.push_discrete(event);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.input_processor.process_mouse_button(*button, *state);
                self.buffer.push_discrete(event);
            }

            WindowEvent::RedrawRequested => {
                self.flush_input_buffer();

                if self.core_finished() {
                    event_loop.exit();
                    return;
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
