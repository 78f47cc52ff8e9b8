//=========================================================================
// Input Processor
//=========================================================================
//
// Translates Winit window events into engine `InputEvent`s.
//
//   Winit WindowEvent → InputProcessor → InputEvent → InputBuffer
//
// Keys without an engine mapping and OS auto-repeat presses are filtered
// out, so each physical press reaches the core exactly once.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode, MouseButton};

//=== InputProcessor ======================================================

/// Stateless converter from Winit events to engine events.
pub(crate) struct InputProcessor;

impl InputProcessor {
    pub(crate) fn new() -> Self {
        Self
    }

    //--- Event Processing -------------------------------------------------

    /// Returns `None` for unmapped keys and auto-repeat.
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<InputEvent> {
        if key_event.repeat {
            return None;
        }

        let PhysicalKey::Code(code) = key_event.physical_key else {
            return None;
        };

        self.key_input(KeyCode::from(code), key_event.state)
    }

    pub(crate) fn process_mouse_button(&self, button: WinitMouseButton, state: ElementState) -> InputEvent {
        let button = MouseButton::from(button);
        match state {
            ElementState::Pressed => InputEvent::MouseButtonDown(button),
            ElementState::Released => InputEvent::MouseButtonUp(button),
        }
    }

    /// Cursor position in physical pixels, top-left origin.
    pub(crate) fn process_mouse_move(&self, x: f64, y: f64) -> InputEvent {
        InputEvent::MouseMoved {
            x: x as f32,
            y: y as f32,
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn key_input(&self, key: KeyCode, state: ElementState) -> Option<InputEvent> {
        if key == KeyCode::Unidentified {
            return None;
        }
        Some(match state {
            ElementState::Pressed => InputEvent::KeyDown(key),
            ElementState::Released => InputEvent::KeyUp(key),
        })
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Anything outside digits, letters, arrows and the editing keys maps to
/// `KeyCode::Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode as W;
        match code {
            //--- Digits -------------------------------------------------------
            W::Digit0 => Self::Digit0, W::Digit1 => Self::Digit1,
            W::Digit2 => Self::Digit2, W::Digit3 => Self::Digit3,
            W::Digit4 => Self::Digit4, W::Digit5 => Self::Digit5,
            W::Digit6 => Self::Digit6, W::Digit7 => Self::Digit7,
            W::Digit8 => Self::Digit8, W::Digit9 => Self::Digit9,

            //--- Letters ------------------------------------------------------
            W::KeyA => Self::KeyA, W::KeyB => Self::KeyB, W::KeyC => Self::KeyC,
            W::KeyD => Self::KeyD, W::KeyE => Self::KeyE, W::KeyF => Self::KeyF,
            W::KeyG => Self::KeyG, W::KeyH => Self::KeyH, W::KeyI => Self::KeyI,
            W::KeyJ => Self::KeyJ, W::KeyK => Self::KeyK, W::KeyL => Self::KeyL,
            W::KeyM => Self::KeyM, W::KeyN => Self::KeyN, W::KeyO => Self::KeyO,
            W::KeyP => Self::KeyP, W::KeyQ => Self::KeyQ, W::KeyR => Self::KeyR,
            W::KeyS => Self::KeyS, W::KeyT => Self::KeyT, W::KeyU => Self::KeyU,
            W::KeyV => Self::KeyV, W::KeyW => Self::KeyW, W::KeyX => Self::KeyX,
            W::KeyY => Self::KeyY, W::KeyZ => Self::KeyZ,

            //--- Arrows -------------------------------------------------------
            W::ArrowUp => Self::ArrowUp,
            W::ArrowDown => Self::ArrowDown,
            W::ArrowLeft => Self::ArrowLeft,
            W::ArrowRight => Self::ArrowRight,

            //--- Editing and control -----------------------------------------
            W::Space => Self::Space,
            W::Enter | W::NumpadEnter => Self::Enter,
            W::Escape => Self::Escape,
            W::Tab => Self::Tab,
            W::Backspace => Self::Backspace,
            W::Delete => Self::Delete,

            _ => Self::Unidentified,
        }
    }
}

impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => Self::Left,
            WinitMouseButton::Right => Self::Right,
            WinitMouseButton::Middle => Self::Middle,
            _ => Self::Other,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_press_and_release_map_to_down_and_up() {
        let p = InputProcessor::new();
        assert_eq!(
            p.key_input(KeyCode::Space, ElementState::Pressed),
            Some(InputEvent::KeyDown(KeyCode::Space))
        );
        assert_eq!(
            p.key_input(KeyCode::Space, ElementState::Released),
            Some(InputEvent::KeyUp(KeyCode::Space))
        );
    }

    #[test]
    fn unidentified_keys_are_filtered() {
        let p = InputProcessor::new();
        assert_eq!(p.key_input(KeyCode::from(WinitKeyCode::F13), ElementState::Pressed), None);
    }

    #[test]
    fn simulation_keys_are_mapped() {
        assert_eq!(KeyCode::from(WinitKeyCode::KeyW), KeyCode::KeyW);
        assert_eq!(KeyCode::from(WinitKeyCode::Digit3), KeyCode::Digit3);
        assert_eq!(KeyCode::from(WinitKeyCode::ArrowLeft), KeyCode::ArrowLeft);
        assert_eq!(KeyCode::from(WinitKeyCode::NumpadEnter), KeyCode::Enter);
        assert_eq!(KeyCode::from(WinitKeyCode::Escape), KeyCode::Escape);
    }

    #[test]
    fn mouse_buttons_map_with_state() {
        let p = InputProcessor::new();
        assert_eq!(
            p.process_mouse_button(WinitMouseButton::Left, ElementState::Pressed),
            InputEvent::MouseButtonDown(MouseButton::Left)
        );
        assert_eq!(
            p.process_mouse_button(WinitMouseButton::Back, ElementState::Released),
            InputEvent::MouseButtonUp(MouseButton::Other)
        );
    }

    #[test]
    fn mouse_move_keeps_coordinates() {
        let p = InputProcessor::new();
        match p.process_mouse_move(12.5, 40.0) {
            InputEvent::MouseMoved { x, y } => assert_eq!((x, y), (12.5, 40.0)),
            other => panic!("expected MouseMoved, got {:?}", other),
        }
    }
}
