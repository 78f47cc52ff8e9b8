//=========================================================================
// Input Event Types
//=========================================================================
//
// Platform-neutral representation of raw keyboard and mouse input.
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    StateTracker (pressed / held / released)
//         ↓
//    Event::Key / Event::MouseButton (event bus)
// ```
//
// Events are Copy-cheap and hash-stable. `MouseMoved` compares equal
// regardless of coordinates so the platform buffer can coalesce it.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::hash::{Hash, Hasher};

//=== MouseButton =========================================================

/// Physical mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Side buttons, thumb buttons, macro keys.
    Other,
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// The simulation binds digits (material), W/S (mass), A (air
/// resistance), R (reload), arrows (angle, camera), Space (fire),
/// Escape (back) and Enter (menu confirm).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    /// Key reported by the platform that has no mapping here.
    Unidentified,
}

//=== KeyState ============================================================

/// Phase of a discrete input within a tick.
///
/// `Pressed` and `Released` fire once on the tick the transition is
/// observed. `Held` fires on every later tick while the input stays down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyState {
    Pressed,
    Held,
    Released,
}

//=== InputEvent ==========================================================

/// Low-level input event produced by the platform layer.
///
/// ```text
/// Equality Rules:
/// KeyDown(A)      == KeyDown(A)        ✓
/// KeyDown(A)      == KeyUp(A)          ✗ (different type)
/// MouseMoved{..}  == MouseMoved{..}    ✓ (always equal)
/// ```
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    /// Key pressed down.
    KeyDown(KeyCode),

    /// Key released.
    KeyUp(KeyCode),

    /// Mouse button pressed.
    MouseButtonDown(MouseButton),

    /// Mouse button released.
    MouseButtonUp(MouseButton),

    /// Cursor moved. Screen space: pixels, top-left origin.
    MouseMoved { x: f32, y: f32 },

    /// Unrecognized event, ignored by the input system.
    Unidentified,
}

//--- Trait Implementations -----------------------------------------------

impl PartialEq for InputEvent {
    fn eq(&self, other: &Self) -> bool {
        use InputEvent::*;
        match (self, other) {
            (KeyDown(a), KeyDown(b)) => a == b,
            (KeyUp(a), KeyUp(b)) => a == b,
            (MouseButtonDown(a), MouseButtonDown(b)) => a == b,
            (MouseButtonUp(a), MouseButtonUp(b)) => a == b,
            // Coordinates ignored for coalescing
            (MouseMoved { .. }, MouseMoved { .. }) => true,
            (Unidentified, Unidentified) => true,
            _ => false,
        }
    }
}

impl Eq for InputEvent {}

/// Hashes discriminant + key/button. Coordinates are NOT hashed for
/// `MouseMoved` (consistent with equality).
impl Hash for InputEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);

        match self {
            Self::KeyDown(key) | Self::KeyUp(key) => key.hash(state),
            Self::MouseButtonDown(button) | Self::MouseButtonUp(button) => button.hash(state),
            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    //=====================================================================
    // Equality Tests
    //=====================================================================

    #[test]
    fn equality_same_key() {
        assert_eq!(InputEvent::KeyDown(KeyCode::Space), InputEvent::KeyDown(KeyCode::Space));
    }

    #[test]
    fn equality_down_and_up_differ() {
        assert_ne!(InputEvent::KeyDown(KeyCode::KeyR), InputEvent::KeyUp(KeyCode::KeyR));
    }

    #[test]
    fn equality_mouse_moved_ignores_coordinates() {
        let a = InputEvent::MouseMoved { x: 1.0, y: 2.0 };
        let b = InputEvent::MouseMoved { x: 640.0, y: 360.0 };
        assert_eq!(a, b);
    }

    #[test]
    fn equality_different_buttons() {
        assert_ne!(
            InputEvent::MouseButtonDown(MouseButton::Left),
            InputEvent::MouseButtonDown(MouseButton::Right)
        );
    }

    //=====================================================================
    // Hashing Tests
    //=====================================================================

    #[test]
    fn hash_includes_key_payload() {
        assert_ne!(
            hash_of(&InputEvent::KeyDown(KeyCode::KeyW)),
            hash_of(&InputEvent::KeyDown(KeyCode::KeyS))
        );
    }

    #[test]
    fn hash_mouse_moved_is_stable() {
        assert_eq!(
            hash_of(&InputEvent::MouseMoved { x: 0.0, y: 0.0 }),
            hash_of(&InputEvent::MouseMoved { x: 9.0, y: 9.0 })
        );
    }

    #[test]
    fn hashset_keeps_latest_mouse_move() {
        let mut set = HashSet::new();
        set.insert(InputEvent::MouseMoved { x: 10.0, y: 10.0 });
        set.replace(InputEvent::MouseMoved { x: 20.0, y: 30.0 });

        assert_eq!(set.len(), 1);
        match set.iter().next() {
            Some(InputEvent::MouseMoved { x, y }) => assert_eq!((*x, *y), (20.0, 30.0)),
            other => panic!("Expected MouseMoved, got {:?}", other),
        }
    }
}
