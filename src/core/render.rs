//=========================================================================
// Renderer Interface
//=========================================================================
//
// Draw-call boundary between scenes and the graphics backend.
//
// Scenes describe what to draw through `Renderer`; the backend decides
// how. The renderer only ever reads scene state and never blocks the
// logic thread on presentation.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::assets::{FontHandle, TextureHandle};
use crate::sim::TrajectoryPoint;

//=== Rect ================================================================

/// Axis-aligned rectangle, bottom-left origin, y up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub position: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Returns true if the point lies inside (edges included).
    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.position + self.size;
        point.x >= self.position.x && point.x <= max.x && point.y >= self.position.y && point.y <= max.y
    }

    /// The same rectangle moved by `-offset` (world → view).
    pub fn offset_by(&self, offset: Vec2) -> Self {
        Self {
            position: self.position - offset,
            size: self.size,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }
}

//=== Renderer ============================================================

/// Consumer of per-frame draw calls.
pub trait Renderer {
    /// Called once before any draw call of a frame.
    fn begin_frame(&mut self) {}

    /// Draws a texture stretched over `rect` (view space).
    fn render_texture(&mut self, texture: TextureHandle, rect: Rect);

    /// Draws a texture rotated counter-clockwise by `degrees` about the
    /// middle of the rect's left edge. Backends without rotation support
    /// draw it unrotated.
    fn render_texture_rotated(&mut self, texture: TextureHandle, rect: Rect, _degrees: f32) {
        self.render_texture(texture, rect);
    }

    /// Draws a string with its baseline starting at `position`.
    fn render_string(&mut self, font: FontHandle, text: &str, position: Vec2);

    /// Draws trajectory samples, shifted by the camera position.
    fn render_trajectory(&mut self, points: &[TrajectoryPoint], camera: Vec2);

    /// Called once after the last draw call of a frame.
    fn end_frame(&mut self) {}
}

//=== HeadlessRenderer ====================================================

/// Renderer that draws nothing and counts what it was asked to draw.
///
/// Used when no graphics backend is attached; draw calls show up at
/// `trace` level.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    frames: u64,
    draw_calls: usize,
    last_frame_draw_calls: usize,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed frames.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Draw calls issued during the last completed frame.
    pub fn last_frame_draw_calls(&self) -> usize {
        self.last_frame_draw_calls
    }
}

impl Renderer for HeadlessRenderer {
    fn begin_frame(&mut self) {
        self.draw_calls = 0;
    }

    fn render_texture(&mut self, texture: TextureHandle, rect: Rect) {
        trace!("texture #{} at {:?}", texture.0, rect);
        self.draw_calls += 1;
    }

    fn render_string(&mut self, font: FontHandle, text: &str, position: Vec2) {
        trace!("text '{}' (font #{}) at {:?}", text, font.0, position);
        self.draw_calls += 1;
    }

    fn render_trajectory(&mut self, points: &[TrajectoryPoint], camera: Vec2) {
        trace!("{} trajectory points, camera {:?}", points.len(), camera);
        self.draw_calls += 1;
    }

    fn end_frame(&mut self) {
        self.frames += 1;
        self.last_frame_draw_calls = self.draw_calls;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
