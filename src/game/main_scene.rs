//=========================================================================
// Main Scene
//=========================================================================
//
// The cannon range: aiming, firing, camera panning and the HUD.
//
// Input paths:
//   Key event ─────────────────────────────→ on_key()
//   Mouse press → Button → UiAction(id) ──→ action_key(id) → on_key()
//
// Every UI button is an alias for a key press, so mouse and keyboard
// share one code path.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::iter;

use glam::Vec2;
use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::action;
use super::asset_names as names;
use super::widgets::Button;
use super::SceneId;
use crate::config::SimulationConfig;
use crate::core::assets::{AssetError, AssetFactory, FontHandle, TextureHandle};
use crate::core::event_bus::{ActionId, Event, EventTarget};
use crate::core::input::{KeyCode, KeyState};
use crate::core::render::{Rect, Renderer};
use crate::core::scene::{Scene, SceneContext};
use crate::sim::{Cannon, HitTest, Target};

//=== Layout ==============================================================

const PANEL_ROWS: [f32; 4] = [467.0, 482.0, 497.0, 512.0];
const UI_TEXT_X: [f32; 4] = [1150.0, 1143.0, 1160.0, 1160.0];
const STATUS_ORIGIN: Vec2 = Vec2::new(1125.0, 380.0);
const LINE_HEIGHT: f32 = 15.0;

const PLUS_X: f32 = 1190.0;
const MINUS_X: f32 = 1125.0;
const STEPPER_SIZE: Vec2 = Vec2::new(14.0, 13.0);

const HEADER_RECT: Rect = Rect::new(1000.0, 550.0, 228.0, 96.0);
const CONSOLE_RECT: Rect = Rect::new(1000.0, 454.0, 228.0, 96.0);
const STATUS_RECT: Rect = Rect::new(1000.0, 358.0, 228.0, 96.0);

const PROJECTILE_SIZE: f32 = 10.0;
const BARREL_THICKNESS: f32 = 12.0;
const BASE_SIZE: Vec2 = Vec2::new(60.0, 40.0);

fn stepper(id: ActionId, x: f32, row: usize) -> Button {
    Button::new(id, Rect::new(x, PANEL_ROWS[row], STEPPER_SIZE.x, STEPPER_SIZE.y))
}

//=== Hud =================================================================

/// Text shown in the status and settings panels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hud {
    /// Verdict, distance to target, distance travelled.
    pub status: [String; 3],
    /// Mass, material label, material index, angle.
    pub ui: [String; 4],
}

//=== Assets ==============================================================

struct Assets {
    background: TextureHandle,
    cannon_base: TextureHandle,
    cannon_barrel: TextureHandle,
    projectile: TextureHandle,
    target: TextureHandle,
    headers: [TextureHandle; 4],
    enabled: TextureHandle,
    disabled: TextureHandle,
    reload: TextureHandle,
    plus: TextureHandle,
    minus: TextureHandle,
    console: TextureHandle,
    status: TextureHandle,
    button: TextureHandle,
    font: FontHandle,
}

impl Assets {
    fn resolve(factory: &AssetFactory) -> Result<Self, AssetError> {
        let texture = |name: &str| factory.grab_asset::<TextureHandle>(name);

        Ok(Self {
            background: texture(names::MENU_BACKGROUND)?,
            cannon_base: texture(names::CANNON_BASE)?,
            cannon_barrel: texture(names::CANNON_BARREL)?,
            projectile: texture(names::PROJECTILE)?,
            target: texture(names::TARGET)?,
            headers: [
                texture(names::HEADERS[0])?,
                texture(names::HEADERS[1])?,
                texture(names::HEADERS[2])?,
                texture(names::HEADERS[3])?,
            ],
            enabled: texture(names::ENABLED)?,
            disabled: texture(names::DISABLED)?,
            reload: texture(names::RELOAD)?,
            plus: texture(names::PLUS)?,
            minus: texture(names::MINUS)?,
            console: texture(names::CONSOLE)?,
            status: texture(names::STATUS)?,
            button: texture(names::BUTTON)?,
            font: factory.grab_asset::<FontHandle>(names::VERSION_FONT)?,
        })
    }
}

//=== MainScene ===========================================================

pub struct MainScene {
    config: SimulationConfig,
    cannon: Cannon,
    target: Target,
    camera: Vec2,
    reload_pending: bool,
    flight_over: bool,
    hud: Hud,

    plus_buttons: [Button; 4],
    minus_buttons: [Button; 4],
    air_button: Button,
    reload_button: Button,
    back_button: Button,

    assets: Option<Assets>,
}

impl MainScene {
    pub fn new(config: SimulationConfig) -> Self {
        let cannon = Cannon::new(
            config.cannon.clone(),
            config.physics.clone(),
            config.world.trajectory_radius,
        );
        let target = Target::from_config(&config.target);

        let mut scene = Self {
            cannon,
            target,
            camera: Vec2::ZERO,
            reload_pending: false,
            flight_over: false,
            hud: Hud::default(),

            plus_buttons: [
                stepper(action::MASS_UP, PLUS_X, 0),
                stepper(action::MATERIAL_NEXT, PLUS_X, 1),
                stepper(action::MATERIAL_INDEX_NEXT, PLUS_X, 2),
                stepper(action::ANGLE_UP, PLUS_X, 3),
            ],
            minus_buttons: [
                stepper(action::MASS_DOWN, MINUS_X, 0),
                stepper(action::MATERIAL_PREVIOUS, MINUS_X, 1),
                stepper(action::MATERIAL_INDEX_PREVIOUS, MINUS_X, 2),
                stepper(action::ANGLE_DOWN, MINUS_X, 3),
            ],
            air_button: Button::new(action::AIR_RESISTANCE, Rect::new(1125.0, 428.0, 78.0, 14.0)),
            reload_button: Button::new(action::RELOAD, Rect::new(1126.0, 526.0, 78.0, 14.0)),
            back_button: Button::labelled(action::BACK, Rect::new(25.0, 600.0, 200.0, 50.0), "Back"),

            assets: None,
            config,
        };

        scene.refresh_hud();
        scene
    }

    //--- Input ------------------------------------------------------------

    fn on_key(&mut self, key: KeyCode, state: KeyState, ctx: &mut SceneContext<SceneId>) {
        match state {
            KeyState::Held => match key {
                KeyCode::ArrowLeft => self.pan_camera(-self.config.world.camera_speed),
                KeyCode::ArrowRight => self.pan_camera(self.config.world.camera_speed),
                _ => {}
            },

            KeyState::Pressed => match key {
                KeyCode::Escape => ctx.publish(Event::Back, true, Some(EventTarget::Stack)),
                KeyCode::Space => {
                    if !self.reload_pending && self.cannon.fire() {
                        self.reload_pending = true;
                        self.flight_over = false;
                    }
                }
                KeyCode::KeyR => {
                    self.cannon.reload();
                    self.reload_pending = false;
                    self.flight_over = false;
                    self.camera.x = 0.0;
                }
                key => {
                    self.cannon.on_input(key, state);
                }
            },

            KeyState::Released => {}
        }
    }

    /// Key press a UI action stands for.
    fn action_key(&self, id: ActionId) -> Option<KeyCode> {
        let material = self.cannon.material();

        let key = match id {
            action::MASS_UP => KeyCode::KeyW,
            action::MASS_DOWN => KeyCode::KeyS,
            action::ANGLE_UP => KeyCode::ArrowUp,
            action::ANGLE_DOWN => KeyCode::ArrowDown,
            action::MATERIAL_NEXT | action::MATERIAL_INDEX_NEXT => material.next().key(),
            action::MATERIAL_PREVIOUS | action::MATERIAL_INDEX_PREVIOUS => material.previous().key(),
            action::RELOAD => KeyCode::KeyR,
            action::AIR_RESISTANCE => KeyCode::KeyA,
            action::BACK => KeyCode::Escape,
            _ => return None,
        };
        Some(key)
    }

    /// Buttons that currently respond to clicks.
    fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.plus_buttons
            .iter()
            .chain(self.minus_buttons.iter())
            .chain(iter::once(&self.air_button))
            .chain(iter::once(&self.back_button))
            .chain(self.reload_pending.then_some(&self.reload_button))
    }

    fn pan_camera(&mut self, delta: f32) {
        self.camera.x = (self.camera.x + delta).clamp(0.0, self.config.world.camera_max_x);
    }

    //--- Simulation -------------------------------------------------------

    fn step_flight(&mut self, dt: f32) {
        if !self.cannon.projectile().is_fired() || self.flight_over {
            return;
        }

        self.cannon.advance(dt);

        if self.cannon.projectile().position.y < self.config.world.floor_y {
            self.flight_over = true;
            let result = self.hit_test();
            info!(
                "Flight over after {:.2}m: {}",
                self.cannon.projectile().distance_travelled(self.config.physics.metre),
                result.verdict().map_or("no verdict", |v| v.label())
            );
        }
    }

    fn refresh_hud(&mut self) {
        let result = self.hit_test();
        let projectile = self.cannon.projectile();
        let material = self.cannon.material();

        self.hud.status[0] = match result.verdict() {
            Some(verdict) if projectile.is_fired() => verdict.label().to_owned(),
            _ => String::new(),
        };
        self.hud.status[1] = format!("{:.2}m", result.distance_to_target.abs());
        self.hud.status[2] = format!("{:.2}m", projectile.distance_travelled(self.config.physics.metre));

        self.hud.ui[0] = format!("{}g", (self.cannon.mass() * 1000.0).round() as i32);
        self.hud.ui[1] = material.label().to_owned();
        self.hud.ui[2] = material.index().to_string();
        self.hud.ui[3] = (self.cannon.angle() as i32).to_string();
    }

    //--- Query API --------------------------------------------------------

    pub fn hit_test(&self) -> HitTest {
        self.target
            .hit_test(self.cannon.projectile().position, self.config.physics.metre)
    }

    pub fn cannon(&self) -> &Cannon {
        &self.cannon
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn camera(&self) -> Vec2 {
        self.camera
    }

    pub fn reload_pending(&self) -> bool {
        self.reload_pending
    }

    /// True once the projectile has dropped below the floor.
    pub fn flight_over(&self) -> bool {
        self.flight_over
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    //--- Rendering --------------------------------------------------------

    fn render_world(&self, renderer: &mut dyn Renderer, assets: &Assets) {
        let world = &self.config.world;
        let camera = self.camera;

        let backdrop = Rect::new(
            0.0,
            0.0,
            world.viewport_width as f32 + world.camera_max_x,
            world.viewport_height as f32,
        );
        renderer.render_texture(assets.background, backdrop.offset_by(camera));
        renderer.render_texture(assets.target, self.target.bounds().offset_by(camera));

        renderer.render_trajectory(self.cannon.trajectory().points(), camera);

        let projectile = self.cannon.projectile();
        if projectile.is_fired() {
            let half = PROJECTILE_SIZE / 2.0;
            let rect = Rect::new(
                projectile.position.x - half,
                projectile.position.y - half,
                PROJECTILE_SIZE,
                PROJECTILE_SIZE,
            );
            renderer.render_texture(assets.projectile, rect.offset_by(camera));
        }

        let pivot = self.cannon.pivot();
        let barrel = Rect::new(
            pivot.x,
            pivot.y - BARREL_THICKNESS / 2.0,
            self.config.cannon.barrel_length,
            BARREL_THICKNESS,
        );
        renderer.render_texture_rotated(assets.cannon_barrel, barrel.offset_by(camera), self.cannon.angle());

        let base = Rect::new(pivot.x - BASE_SIZE.x / 2.0, pivot.y - BASE_SIZE.y, BASE_SIZE.x, BASE_SIZE.y);
        renderer.render_texture(assets.cannon_base, base.offset_by(camera));
    }

    fn render_panel(&self, renderer: &mut dyn Renderer, assets: &Assets) {
        let header = assets.headers[usize::from(self.cannon.material().index()) - 1];
        renderer.render_texture(header, HEADER_RECT);

        self.back_button.render(renderer, assets.button, assets.font);
        renderer.render_texture(assets.status, STATUS_RECT);
        renderer.render_texture(assets.console, CONSOLE_RECT);

        let air = if self.cannon.drag_enabled() { assets.enabled } else { assets.disabled };
        renderer.render_texture(air, self.air_button.rect);

        if self.reload_pending {
            renderer.render_texture(assets.reload, self.reload_button.rect);
        }

        for (row, line) in self.hud.status.iter().enumerate() {
            if line.chars().count() > 1 {
                let position = STATUS_ORIGIN + Vec2::new(0.0, row as f32 * LINE_HEIGHT);
                renderer.render_string(assets.font, line, position);
            }
        }

        for (row, line) in self.hud.ui.iter().enumerate() {
            renderer.render_string(assets.font, line, Vec2::new(UI_TEXT_X[row], PANEL_ROWS[row]));
        }

        for button in &self.plus_buttons {
            renderer.render_texture(assets.plus, button.rect);
        }
        for button in &self.minus_buttons {
            renderer.render_texture(assets.minus, button.rect);
        }
    }
}

//=== Scene Implementation ================================================

impl Scene<SceneId> for MainScene {
    fn on_enter(&mut self, factory: Option<&AssetFactory>) -> Result<(), AssetError> {
        if let Some(factory) = factory {
            self.assets = Some(Assets::resolve(factory)?);
        }

        info!("Entered cannon range ({:?}, {}°)", self.cannon.material(), self.cannon.angle());
        self.refresh_hud();
        Ok(())
    }

    fn on_exit(&mut self) {
        debug!("Leaving cannon range");
    }

    fn on_input(&mut self, event: &Event, ctx: &mut SceneContext<SceneId>) {
        match *event {
            Event::Key { key, state } => self.on_key(key, state, ctx),

            Event::MouseButton { .. } => {
                let pressed: Vec<ActionId> = self.buttons().filter_map(|b| b.pressed_by(event)).collect();
                for id in pressed {
                    ctx.publish(Event::UiAction(id), false, None);
                }
            }

            Event::UiAction(id) => match self.action_key(id) {
                Some(key) => self.on_key(key, KeyState::Pressed, ctx),
                None => debug!("Unknown UI action {:?}", id),
            },

            Event::Back => {}
        }
    }

    fn on_update(&mut self, dt: f32, _ctx: &mut SceneContext<SceneId>) {
        self.step_flight(dt);
        self.refresh_hud();
    }

    fn on_render(&self, renderer: &mut dyn Renderer) {
        match &self.assets {
            Some(assets) => {
                self.render_world(renderer, assets);
                self.render_panel(renderer, assets);
            }
            None => renderer.render_trajectory(self.cannon.trajectory().points(), self.camera),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event_bus::EventBus;
    use crate::core::input::MouseButton;
    use crate::core::render::HeadlessRenderer;
    use crate::game::asset_catalog;
    use crate::sim::Material;

    const DT: f32 = 1.0 / 60.0;

    fn scene() -> MainScene {
        MainScene::new(SimulationConfig::default())
    }

    fn bus() -> EventBus<SceneId> {
        let mut bus = EventBus::new();
        bus.subscribe(EventTarget::Stack);
        bus
    }

    fn send(scene: &mut MainScene, bus: &mut EventBus<SceneId>, event: Event) {
        let mut ctx = SceneContext::new(bus);
        scene.on_input(&event, &mut ctx);
    }

    fn press(scene: &mut MainScene, bus: &mut EventBus<SceneId>, key: KeyCode) {
        send(scene, bus, Event::key_pressed(key));
    }

    fn tick(scene: &mut MainScene, bus: &mut EventBus<SceneId>, n: usize) {
        for _ in 0..n {
            let mut ctx = SceneContext::new(bus);
            scene.on_update(DT, &mut ctx);
        }
    }

    fn click(x: f32, y: f32) -> Event {
        Event::MouseButton {
            button: MouseButton::Left,
            state: KeyState::Pressed,
            x,
            y,
        }
    }

    //--- Keyboard ---------------------------------------------------------

    #[test]
    fn space_fires_once_until_reload() {
        let (mut s, mut b) = (scene(), bus());

        press(&mut s, &mut b, KeyCode::Space);
        assert!(s.reload_pending());
        assert!(s.cannon().projectile().is_fired());

        tick(&mut s, &mut b, 10);
        let start = s.cannon().projectile().start_position();
        press(&mut s, &mut b, KeyCode::Space);
        assert_eq!(s.cannon().projectile().start_position(), start);
        assert_eq!(s.cannon().trajectory().len(), 10);
    }

    #[test]
    fn reload_clears_flight_and_resets_camera() {
        let (mut s, mut b) = (scene(), bus());
        press(&mut s, &mut b, KeyCode::Space);
        tick(&mut s, &mut b, 5);
        for _ in 0..3 {
            send(&mut s, &mut b, Event::Key { key: KeyCode::ArrowRight, state: KeyState::Held });
        }
        assert_eq!(s.camera().x, 30.0);

        press(&mut s, &mut b, KeyCode::KeyR);
        assert!(!s.reload_pending());
        assert!(!s.cannon().projectile().is_fired());
        assert!(s.cannon().trajectory().is_empty());
        assert_eq!(s.camera().x, 0.0);
    }

    #[test]
    fn held_arrows_pan_within_bounds() {
        let (mut s, mut b) = (scene(), bus());
        send(&mut s, &mut b, Event::Key { key: KeyCode::ArrowLeft, state: KeyState::Held });
        assert_eq!(s.camera().x, 0.0);

        for _ in 0..500 {
            send(&mut s, &mut b, Event::Key { key: KeyCode::ArrowRight, state: KeyState::Held });
        }
        assert_eq!(s.camera().x, 1720.0);

        press(&mut s, &mut b, KeyCode::ArrowRight);
        assert_eq!(s.camera().x, 1720.0);
    }

    #[test]
    fn escape_publishes_back_to_stack_immediately() {
        let (mut s, mut b) = (scene(), bus());
        press(&mut s, &mut b, KeyCode::Escape);

        assert_eq!(b.pending_directed(), 1);
        assert_eq!(b.pending(), 0);
    }

    #[test]
    fn cannon_keys_are_forwarded() {
        let (mut s, mut b) = (scene(), bus());
        press(&mut s, &mut b, KeyCode::ArrowUp);
        press(&mut s, &mut b, KeyCode::Digit3);
        press(&mut s, &mut b, KeyCode::KeyW);

        assert_eq!(s.cannon().angle(), 46.0);
        assert_eq!(s.cannon().material(), Material::Copper);
        assert!((s.cannon().mass() - 1.1).abs() < 1e-6);
    }

    //--- UI Actions -------------------------------------------------------

    #[test]
    fn material_actions_cycle_through_digit_keys() {
        let (mut s, mut b) = (scene(), bus());

        send(&mut s, &mut b, Event::UiAction(action::MATERIAL_PREVIOUS));
        assert_eq!(s.cannon().material(), Material::Stone);

        send(&mut s, &mut b, Event::UiAction(action::MATERIAL_NEXT));
        send(&mut s, &mut b, Event::UiAction(action::MATERIAL_INDEX_NEXT));
        assert_eq!(s.cannon().material(), Material::Aluminium);
    }

    #[test]
    fn parameter_actions_alias_keys() {
        let (mut s, mut b) = (scene(), bus());

        send(&mut s, &mut b, Event::UiAction(action::ANGLE_DOWN));
        send(&mut s, &mut b, Event::UiAction(action::MASS_DOWN));
        send(&mut s, &mut b, Event::UiAction(action::AIR_RESISTANCE));

        assert_eq!(s.cannon().angle(), 44.0);
        assert!((s.cannon().mass() - 0.9).abs() < 1e-6);
        assert!(!s.cannon().drag_enabled());
    }

    #[test]
    fn back_action_behaves_like_escape() {
        let (mut s, mut b) = (scene(), bus());
        send(&mut s, &mut b, Event::UiAction(action::BACK));
        assert_eq!(b.pending_directed(), 1);
    }

    #[test]
    fn unknown_action_is_ignored() {
        let (mut s, mut b) = (scene(), bus());
        send(&mut s, &mut b, Event::UiAction(ActionId(999)));
        assert_eq!(s.cannon().angle(), 45.0);
    }

    //--- Mouse ------------------------------------------------------------

    #[test]
    fn clicking_a_stepper_queues_its_action() {
        let (mut s, mut b) = (scene(), bus());
        send(&mut s, &mut b, click(1195.0, 470.0));

        assert_eq!(b.pending(), 1);
        assert_eq!(s.cannon().mass(), 1.0);
    }

    #[test]
    fn reload_button_only_clickable_while_pending() {
        let (mut s, mut b) = (scene(), bus());
        send(&mut s, &mut b, click(1130.0, 530.0));
        assert_eq!(b.pending(), 0);

        press(&mut s, &mut b, KeyCode::Space);
        send(&mut s, &mut b, click(1130.0, 530.0));
        assert_eq!(b.pending(), 1);
    }

    #[test]
    fn click_on_empty_space_does_nothing() {
        let (mut s, mut b) = (scene(), bus());
        send(&mut s, &mut b, click(600.0, 300.0));
        assert_eq!(b.pending(), 0);
    }

    //--- Flight & HUD -----------------------------------------------------

    #[test]
    fn hud_reports_settings() {
        let s = scene();
        assert_eq!(s.hud().ui, ["1000g", "Iron", "1", "45"].map(String::from));
        assert_eq!(s.hud().status[0], "");
    }

    #[test]
    fn flight_stops_below_floor_with_verdict() {
        let (mut s, mut b) = (scene(), bus());
        press(&mut s, &mut b, KeyCode::Space);

        let mut ticks = 0;
        while !s.flight_over() && ticks < 10_000 {
            tick(&mut s, &mut b, 1);
            ticks += 1;
        }
        assert!(s.flight_over());

        let points = s.cannon().trajectory().len();
        tick(&mut s, &mut b, 30);
        assert_eq!(s.cannon().trajectory().len(), points);

        let verdict = s.hit_test().verdict().map(|v| v.label().to_owned());
        assert_eq!(Some(s.hud().status[0].clone()), verdict);
        assert!(s.hud().status[1].ends_with('m'));
        assert!(s.hud().status[2].ends_with('m'));
    }

    #[test]
    fn enter_resolves_assets_and_renders_panel() {
        let mut s = scene();
        let factory = asset_catalog();
        s.on_enter(Some(&factory)).unwrap();

        let mut renderer = HeadlessRenderer::new();
        renderer.begin_frame();
        s.on_render(&mut renderer);
        renderer.end_frame();
        assert!(renderer.last_frame_draw_calls() > 10);
    }

    #[test]
    fn enter_without_assets_fails() {
        let mut s = scene();
        let empty = AssetFactory::new();
        assert!(s.on_enter(Some(&empty)).is_err());
        assert!(s.on_enter(None).is_ok());
    }
}
