//=========================================================================
// State Tracker
//=========================================================================
//
// Low-level input state with per-frame delta tracking.
//
// Architecture:
//   InputEvent → apply() → held keys/buttons → transitions (Pressed/Released)
//                                 ↓
//                       held_keys() → Held on later ticks
//
// Frame lifecycle: clear() → apply() per event → query
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, KeyState, MouseButton};

//=== Transition ==========================================================

/// A discrete state change observed while applying an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Transition {
    Key(KeyCode, KeyState),
    Button(MouseButton, KeyState),
}

//=== StateTracker ========================================================

/// Tracks persistent state (keys held) and per-frame deltas.
///
/// Held keys are kept in press order so repeated `Held` notifications come
/// out in a stable order from tick to tick.
pub struct StateTracker {
    //--- Persistent State (survives frame boundary) ----------------------
    keys_down: Vec<KeyCode>,
    mouse_buttons_down: HashSet<MouseButton>,
    mouse_position: (f32, f32),

    //--- Frame Deltas (reset each frame via clear()) --------------------
    keys_pressed_this_frame: HashSet<KeyCode>,
    keys_released_this_frame: HashSet<KeyCode>,
}

impl StateTracker {
    /// Creates a new state tracker with empty state.
    pub fn new() -> Self {
        Self {
            keys_down: Vec::new(),
            mouse_buttons_down: HashSet::new(),
            mouse_position: (0.0, 0.0),
            keys_pressed_this_frame: HashSet::new(),
            keys_released_this_frame: HashSet::new(),
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears frame-specific deltas.
    pub(crate) fn clear(&mut self) {
        self.keys_pressed_this_frame.clear();
        self.keys_released_this_frame.clear();
    }

    /// Applies one platform event and reports the transition it caused.
    ///
    /// Repeated `KeyDown` for a key already held (OS auto-repeat) and
    /// `KeyUp` for a key that was never down produce no transition.
    pub(crate) fn apply(&mut self, event: &InputEvent) -> Option<Transition> {
        match *event {
            InputEvent::KeyDown(key) => {
                if self.keys_down.contains(&key) {
                    return None;
                }
                self.keys_down.push(key);
                self.keys_pressed_this_frame.insert(key);
                Some(Transition::Key(key, KeyState::Pressed))
            }

            InputEvent::KeyUp(key) => {
                let pos = self.keys_down.iter().position(|&k| k == key)?;
                self.keys_down.remove(pos);
                self.keys_released_this_frame.insert(key);
                Some(Transition::Key(key, KeyState::Released))
            }

            InputEvent::MouseButtonDown(button) => self
                .mouse_buttons_down
                .insert(button)
                .then_some(Transition::Button(button, KeyState::Pressed)),

            InputEvent::MouseButtonUp(button) => self
                .mouse_buttons_down
                .remove(&button)
                .then_some(Transition::Button(button, KeyState::Released)),

            InputEvent::MouseMoved { x, y } => {
                self.mouse_position = (x, y);
                None
            }

            InputEvent::Unidentified => None,
        }
    }

    //=====================================================================
    // Query API
    //=====================================================================

    /// Returns `true` if key transitioned UP → DOWN this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed_this_frame.contains(&key)
    }

    /// Returns `true` while key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns `true` if key transitioned DOWN → UP this frame.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released_this_frame.contains(&key)
    }

    /// Returns `true` while the mouse button is held.
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons_down.contains(&button)
    }

    /// Returns mouse position in screen coordinates (pixels, top-left origin).
    pub fn mouse_position(&self) -> (f32, f32) {
        self.mouse_position
    }

    /// Keys held down that were not pressed this frame, in press order.
    pub fn held_keys(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.keys_down
            .iter()
            .copied()
            .filter(|key| !self.keys_pressed_this_frame.contains(key))
    }
}

//--- Trait Implementations -----------------------------------------------

impl Default for StateTracker {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
