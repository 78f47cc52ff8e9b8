//=========================================================================
// Input System
//
// Turns batches of platform `InputEvent`s into bus `Event`s each tick.
//
// Responsibilities:
// - Maintain the persistent `StateTracker` (held keys, cursor)
// - Emit Pressed / Released in arrival order
// - Emit Held for every key still down from an earlier tick
// - Convert the cursor from screen space (y down) to UI space (y up)
//
// Notes:
// Owned by the CoreSystemsOrchestrator. Scenes never see raw platform
// input; they only receive `Event::Key` and `Event::MouseButton`.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event;
mod state_tracker;

//=== Public API ==========================================================

pub use event::{InputEvent, KeyCode, KeyState, MouseButton};
pub use state_tracker::StateTracker;

//=== Internal Imports ====================================================

use crate::core::event_bus::Event;
use state_tracker::Transition;

//=== External Crates =====================================================

use log::trace;

//=== InputSystem =========================================================

pub struct InputSystem {
    state: StateTracker,
    viewport_height: f32,
}

impl InputSystem {
    //--- Construction -----------------------------------------------------

    /// Creates an input system for a viewport of the given height (pixels).
    pub fn new(viewport_height: f32) -> Self {
        Self {
            state: StateTracker::new(),
            viewport_height,
        }
    }

    //--- process_frame() --------------------------------------------------
    //
    // Consumes all input batches received during the current tick and
    // appends the resulting bus events to `out`.
    //
    pub fn process_frame(&mut self, batches: &[Vec<InputEvent>], out: &mut Vec<Event>) {
        self.state.clear();
        let before = out.len();

        for event in batches.iter().flatten() {
            if let Some(transition) = self.state.apply(event) {
                out.push(self.to_event(transition));
            }
        }

        for key in self.state.held_keys() {
            out.push(Event::Key {
                key,
                state: KeyState::Held,
            });
        }

        if out.len() > before {
            trace!("Input produced {} events", out.len() - before);
        }
    }

    //--- Query Methods ----------------------------------------------------

    /// Read-only access to the tracked input state.
    pub fn state(&self) -> &StateTracker {
        &self.state
    }

    /// Cursor position in UI space (pixels, bottom-left origin).
    pub fn cursor(&self) -> (f32, f32) {
        let (x, y) = self.state.mouse_position();
        (x, self.viewport_height - y)
    }

    //--- Internal Helpers -------------------------------------------------

    fn to_event(&self, transition: Transition) -> Event {
        match transition {
            Transition::Key(key, state) => Event::Key { key, state },
            Transition::Button(button, state) => {
                let (x, y) = self.cursor();
                Event::MouseButton { button, state, x, y }
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
