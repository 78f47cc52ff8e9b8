//=========================================================================
// UI Widgets
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Internal Dependencies ===============================================

use crate::core::assets::{FontHandle, TextureHandle};
use crate::core::event_bus::{ActionId, Event};
use crate::core::input::{KeyState, MouseButton};
use crate::core::render::{Rect, Renderer};

//=== Button ==============================================================

/// Clickable rectangle in UI space that reports its `ActionId`.
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub id: ActionId,
    pub rect: Rect,
    pub label: Option<&'static str>,
}

impl Button {
    pub const fn new(id: ActionId, rect: Rect) -> Self {
        Self { id, rect, label: None }
    }

    pub const fn labelled(id: ActionId, rect: Rect, label: &'static str) -> Self {
        Self {
            id,
            rect,
            label: Some(label),
        }
    }

    /// Returns the button's id if `event` is a left press inside it.
    pub fn pressed_by(&self, event: &Event) -> Option<ActionId> {
        match *event {
            Event::MouseButton {
                button: MouseButton::Left,
                state: KeyState::Pressed,
                x,
                y,
            } if self.rect.contains(Vec2::new(x, y)) => Some(self.id),
            _ => None,
        }
    }

    pub fn render(&self, renderer: &mut dyn Renderer, texture: TextureHandle, font: FontHandle) {
        renderer.render_texture(texture, self.rect);

        if let Some(label) = self.label {
            let origin = self.rect.position + Vec2::new(self.rect.size.x * 0.3, self.rect.size.y * 0.35);
            renderer.render_string(font, label, origin);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
