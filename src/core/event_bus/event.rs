//=========================================================================
// Bus Events
//=========================================================================
//
// The payloads routed by the EventBus and the addresses they can be
// routed to.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::{KeyCode, KeyState, MouseButton};
use crate::core::scene::SceneKey;

//=== ActionId ============================================================

/// Stable identifier assigned to a UI widget at construction.
///
/// Widgets publish `Event::UiAction(id)` when pressed and the owning scene
/// dispatches on the id. Ids are only meaningful to the scene that
/// created the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(pub u16);

//=== Event ===============================================================

/// A transient notification delivered through the EventBus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Leave the current scene and return to the home scene.
    Back,

    /// A UI widget was pressed.
    UiAction(ActionId),

    /// Keyboard input for this tick.
    Key { key: KeyCode, state: KeyState },

    /// Mouse button input. Coordinates are in UI space (pixels, y up,
    /// bottom-left origin).
    MouseButton {
        button: MouseButton,
        state: KeyState,
        x: f32,
        y: f32,
    },
}

impl Event {
    /// Shorthand for a pressed key.
    pub const fn key_pressed(key: KeyCode) -> Self {
        Self::Key {
            key,
            state: KeyState::Pressed,
        }
    }

    /// Returns the key if this is a `Key` event in the given state.
    pub fn key_in_state(&self, wanted: KeyState) -> Option<KeyCode> {
        match *self {
            Self::Key { key, state } if state == wanted => Some(key),
            _ => None,
        }
    }
}

//=== EventTarget =========================================================

/// Receiver address on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget<K: SceneKey> {
    /// The scene stack: handles `Back` as a scene transition and forwards
    /// everything else to the active scene.
    Stack,

    /// A specific scene, active or not.
    Scene(K),
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_pressed_shorthand() {
        assert_eq!(
            Event::key_pressed(KeyCode::Space),
            Event::Key {
                key: KeyCode::Space,
                state: KeyState::Pressed
            }
        );
    }

    #[test]
    fn key_in_state_filters_phase() {
        let held = Event::Key {
            key: KeyCode::ArrowLeft,
            state: KeyState::Held,
        };
        assert_eq!(held.key_in_state(KeyState::Held), Some(KeyCode::ArrowLeft));
        assert_eq!(held.key_in_state(KeyState::Pressed), None);
        assert_eq!(Event::Back.key_in_state(KeyState::Pressed), None);
    }

    #[test]
    fn action_ids_compare_by_value() {
        assert_eq!(ActionId(3), ActionId(3));
        assert_ne!(ActionId(3), ActionId(7));
    }
}
