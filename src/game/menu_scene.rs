//=========================================================================
// Menu Scene
//=========================================================================
//
// Start screen. Enter/Space or the Start button open the cannon range;
// Escape or the Quit button end the application.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::action::{QUIT, START};
use super::asset_names as names;
use super::widgets::Button;
use super::SceneId;
use crate::config::WorldConfig;
use crate::core::assets::{AssetError, AssetFactory, FontHandle, TextureHandle};
use crate::core::event_bus::Event;
use crate::core::input::{KeyCode, KeyState};
use crate::core::render::{Rect, Renderer};
use crate::core::scene::{Scene, SceneContext};

//=== Layout ==============================================================

const TITLE: &str = "Projectile Lab";
const BUTTON_SIZE: Vec2 = Vec2::new(200.0, 50.0);

//=== MenuScene ===========================================================

pub struct MenuScene {
    viewport: Vec2,
    buttons: [Button; 2],
    assets: Option<(TextureHandle, TextureHandle, FontHandle)>,
}

impl MenuScene {
    pub fn new(world: &WorldConfig) -> Self {
        let viewport = Vec2::new(world.viewport_width as f32, world.viewport_height as f32);
        let x = (viewport.x - BUTTON_SIZE.x) / 2.0;
        let y = viewport.y / 2.0;

        Self {
            viewport,
            buttons: [
                Button::labelled(START, Rect::new(x, y, BUTTON_SIZE.x, BUTTON_SIZE.y), "Start"),
                Button::labelled(
                    QUIT,
                    Rect::new(x, y - BUTTON_SIZE.y * 1.6, BUTTON_SIZE.x, BUTTON_SIZE.y),
                    "Quit",
                ),
            ],
            assets: None,
        }
    }

    fn start(ctx: &mut SceneContext<SceneId>) {
        debug!("Menu: start");
        ctx.switch_to(SceneId::Simulation);
    }

    fn quit(ctx: &mut SceneContext<SceneId>) {
        info!("Menu: quit");
        ctx.request_exit();
    }
}

impl Scene<SceneId> for MenuScene {
    fn on_enter(&mut self, factory: Option<&AssetFactory>) -> Result<(), AssetError> {
        if let Some(factory) = factory {
            self.assets = Some((
                factory.grab_asset(names::MENU_BACKGROUND)?,
                factory.grab_asset(names::BUTTON)?,
                factory.grab_asset(names::VERSION_FONT)?,
            ));
        }
        debug!("Entered main menu");
        Ok(())
    }

    fn on_input(&mut self, event: &Event, ctx: &mut SceneContext<SceneId>) {
        match *event {
            Event::Key {
                key,
                state: KeyState::Pressed,
            } => match key {
                KeyCode::Enter | KeyCode::Space => Self::start(ctx),
                KeyCode::Escape => Self::quit(ctx),
                _ => {}
            },

            Event::MouseButton { .. } => {
                for button in &self.buttons {
                    if let Some(id) = button.pressed_by(event) {
                        ctx.publish(Event::UiAction(id), false, None);
                    }
                }
            }

            Event::UiAction(START) => Self::start(ctx),
            Event::UiAction(QUIT) => Self::quit(ctx),

            _ => {}
        }
    }

    fn on_update(&mut self, _dt: f32, _ctx: &mut SceneContext<SceneId>) {}

    fn on_render(&self, renderer: &mut dyn Renderer) {
        let Some((background, button, font)) = self.assets else {
            return;
        };

        renderer.render_texture(background, Rect::new(0.0, 0.0, self.viewport.x, self.viewport.y));
        renderer.render_string(font, TITLE, Vec2::new(self.viewport.x / 2.0 - 70.0, self.viewport.y * 0.75));

        for b in &self.buttons {
            b.render(renderer, button, font);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
