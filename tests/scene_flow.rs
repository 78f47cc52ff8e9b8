//=========================================================================
// Scene Flow
//
// Drives the full logic tick (input → bus → scene stack) without a
// window: menu → simulation → fire → landing → back to the menu.
//
//=========================================================================

use std::sync::{Arc, Mutex};

use glam::Vec2;

use projectile_lab::config::SimulationConfig;
use projectile_lab::core::assets::{FontHandle, TextureHandle};
use projectile_lab::core::input::{InputEvent, KeyCode, MouseButton};
use projectile_lab::core::platform_bridge::TickControl;
use projectile_lab::core::render::{Rect, Renderer};
use projectile_lab::core::CoreSystems;
use projectile_lab::game::{self, SceneId};
use projectile_lab::sim::TrajectoryPoint;

const DT: f32 = 1.0 / 60.0;

//=== Recording Renderer ==================================================

#[derive(Default)]
struct Frame {
    texts: Vec<String>,
    trajectory_points: usize,
}

struct Recorder(Arc<Mutex<Frame>>);

impl Renderer for Recorder {
    fn begin_frame(&mut self) {
        *self.0.lock().unwrap() = Frame::default();
    }

    fn render_texture(&mut self, _texture: TextureHandle, _rect: Rect) {}

    fn render_string(&mut self, _font: FontHandle, text: &str, _position: Vec2) {
        self.0.lock().unwrap().texts.push(text.to_owned());
    }

    fn render_trajectory(&mut self, points: &[TrajectoryPoint], _camera: Vec2) {
        self.0.lock().unwrap().trajectory_points = points.len();
    }
}

//=== Harness =============================================================

struct Harness {
    systems: CoreSystems<SceneId>,
    frame: Arc<Mutex<Frame>>,
}

impl Harness {
    fn new() -> Self {
        let config = SimulationConfig::default();
        let frame = Arc::new(Mutex::new(Frame::default()));

        let mut systems = CoreSystems::new(config.world.viewport_height as f32);
        systems.renderer = Box::new(Recorder(Arc::clone(&frame)));
        game::install(&mut systems, &config);
        systems.start().unwrap();

        Self { systems, frame }
    }

    fn tick(&mut self, batch: Vec<InputEvent>) -> TickControl {
        let batches = if batch.is_empty() { vec![] } else { vec![batch] };
        self.systems.tick(&batches, DT).unwrap()
    }

    fn tap(&mut self, key: KeyCode) -> TickControl {
        let control = self.tick(vec![InputEvent::KeyDown(key)]);
        self.tick(vec![InputEvent::KeyUp(key)]);
        control
    }

    fn idle(&mut self) {
        self.tick(vec![]);
    }

    fn active(&self) -> Option<SceneId> {
        self.systems.scenes.active_key()
    }

    fn trajectory_points(&self) -> usize {
        self.frame.lock().unwrap().trajectory_points
    }

    fn shows(&self, text: &str) -> bool {
        self.frame.lock().unwrap().texts.iter().any(|t| t == text)
    }
}

//=== Tests ===============================================================

#[test]
fn starts_on_the_menu() {
    let mut h = Harness::new();
    assert_eq!(h.active(), Some(SceneId::MainMenu));

    h.idle();
    assert!(h.shows("Start"));
    assert!(h.shows("Quit"));
}

#[test]
fn full_shot_round_trip() {
    let mut h = Harness::new();

    h.tap(KeyCode::Enter);
    assert_eq!(h.active(), Some(SceneId::Simulation));

    h.idle();
    assert_eq!(h.trajectory_points(), 0);
    assert!(h.shows("1000g"));
    assert!(h.shows("45"));

    h.tap(KeyCode::Space);

    let mut last = 0;
    for _ in 0..2_000 {
        h.idle();
        let points = h.trajectory_points();
        if points > 0 && points == last {
            break;
        }
        last = points;
    }
    assert!(last > 10, "projectile should leave a trail, got {last} points");
    assert!(h.shows("Missed!") || h.shows("Hit!"));

    h.tap(KeyCode::Escape);
    assert_eq!(h.active(), Some(SceneId::MainMenu));

    // Scenes keep their state between activations.
    h.tap(KeyCode::Enter);
    h.idle();
    assert_eq!(h.active(), Some(SceneId::Simulation));
    assert_eq!(h.trajectory_points(), last);

    h.tap(KeyCode::KeyR);
    h.idle();
    assert_eq!(h.trajectory_points(), 0);
}

#[test]
fn parameter_keys_update_the_panel() {
    let mut h = Harness::new();
    h.tap(KeyCode::Enter);

    h.tap(KeyCode::KeyW);
    h.tap(KeyCode::ArrowUp);
    h.tap(KeyCode::Digit2);
    h.idle();

    assert!(h.shows("1100g"));
    assert!(h.shows("46"));
    assert!(h.shows("2"));
}

#[test]
fn clicking_start_opens_the_simulation() {
    let mut h = Harness::new();

    // Start button spans (540..740, 360..410) in UI space; screen y is flipped.
    h.tick(vec![InputEvent::MouseMoved { x: 640.0, y: 720.0 - 380.0 }]);
    h.tick(vec![InputEvent::MouseButtonDown(MouseButton::Left)]);
    h.tick(vec![InputEvent::MouseButtonUp(MouseButton::Left)]);

    assert_eq!(h.active(), Some(SceneId::Simulation));
}

#[test]
fn escape_on_the_menu_exits() {
    let mut h = Harness::new();
    assert_eq!(h.tap(KeyCode::Escape), TickControl::Exit);
}

#[test]
fn stepper_click_raised_before_leaving_does_not_drive_the_menu() {
    let mut h = Harness::new();
    h.tap(KeyCode::Enter);
    assert_eq!(h.active(), Some(SceneId::Simulation));

    // Mass+ stepper sits at (1190..1204, 467..480) in UI space.
    h.tick(vec![InputEvent::MouseMoved { x: 1195.0, y: 720.0 - 470.0 }]);
    h.tick(vec![
        InputEvent::MouseButtonDown(MouseButton::Left),
        InputEvent::KeyDown(KeyCode::Escape),
    ]);
    assert_eq!(h.active(), Some(SceneId::MainMenu));

    // The stepper's queued action drains while the menu is active.
    h.tick(vec![
        InputEvent::MouseButtonUp(MouseButton::Left),
        InputEvent::KeyUp(KeyCode::Escape),
    ]);
    h.idle();
    assert_eq!(h.active(), Some(SceneId::MainMenu));
}
