//=========================================================================
// Cannon Range Game
//
// Scenes, widgets and asset catalogue for the projectile lab.
//
// Setup order:
//   push(MainMenu) → push(Simulation) → start_from(MainMenu)
//     → enable_factory(asset_catalog())
//
// The stack enters the menu only when the runtime starts, so the
// factory is already available to the first `on_enter`.
//
//=========================================================================

//=== Submodules ==========================================================

mod main_scene;
mod menu_scene;
pub mod widgets;

//=== Public API ==========================================================

pub use main_scene::{Hud, MainScene};
pub use menu_scene::MenuScene;

//=== Internal Dependencies ===============================================

use crate::config::SimulationConfig;
use crate::core::assets::AssetFactory;
use crate::core::scene::SceneKey;
use crate::core::CoreSystems;

//=== SceneId =============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneId {
    MainMenu,
    Simulation,
}

impl SceneKey for SceneId {}

//=== Actions =============================================================

/// Ids of every UI button in the game.
///
/// `UiAction` events are queued and reach whichever scene is active when
/// the bus drains, so ids must not repeat across scenes.
pub mod action {
    use crate::core::event_bus::ActionId;

    //--- Menu -------------------------------------------------------------
    pub const START: ActionId = ActionId(1);
    pub const QUIT: ActionId = ActionId(2);

    //--- Cannon range -----------------------------------------------------
    pub const MASS_UP: ActionId = ActionId(10);
    pub const MATERIAL_NEXT: ActionId = ActionId(11);
    pub const MATERIAL_INDEX_NEXT: ActionId = ActionId(12);
    pub const ANGLE_UP: ActionId = ActionId(13);
    pub const MASS_DOWN: ActionId = ActionId(14);
    pub const MATERIAL_PREVIOUS: ActionId = ActionId(15);
    pub const MATERIAL_INDEX_PREVIOUS: ActionId = ActionId(16);
    pub const ANGLE_DOWN: ActionId = ActionId(17);
    pub const RELOAD: ActionId = ActionId(18);
    pub const AIR_RESISTANCE: ActionId = ActionId(19);
    pub const BACK: ActionId = ActionId(20);

    pub const ALL: [ActionId; 13] = [
        START,
        QUIT,
        MASS_UP,
        MATERIAL_NEXT,
        MATERIAL_INDEX_NEXT,
        ANGLE_UP,
        MASS_DOWN,
        MATERIAL_PREVIOUS,
        MATERIAL_INDEX_PREVIOUS,
        ANGLE_DOWN,
        RELOAD,
        AIR_RESISTANCE,
        BACK,
    ];
}

//=== Asset Names =========================================================

pub mod asset_names {
    pub const MENU_BACKGROUND: &str = "MenuBackground";
    pub const CANNON_BASE: &str = "CannonBase";
    pub const CANNON_BARREL: &str = "CannonBarrel";
    pub const PROJECTILE: &str = "Projectile";
    pub const TARGET: &str = "Target";
    pub const HEADERS: [&str; 4] = ["Header1", "Header2", "Header3", "Header4"];
    pub const ENABLED: &str = "Enabled";
    pub const DISABLED: &str = "Disabled";
    pub const RELOAD: &str = "Reload";
    pub const PLUS: &str = "Plus";
    pub const MINUS: &str = "Minus";
    pub const CONSOLE: &str = "Console";
    pub const STATUS: &str = "Status";
    pub const BUTTON: &str = "Button";

    pub const VERSION_FONT: &str = "Version";

    pub const TEXTURES: [&str; 17] = [
        MENU_BACKGROUND,
        CANNON_BASE,
        CANNON_BARREL,
        PROJECTILE,
        TARGET,
        HEADERS[0],
        HEADERS[1],
        HEADERS[2],
        HEADERS[3],
        ENABLED,
        DISABLED,
        RELOAD,
        PLUS,
        MINUS,
        CONSOLE,
        STATUS,
        BUTTON,
    ];
}

/// Registers every texture and font the game scenes resolve.
pub fn asset_catalog() -> AssetFactory {
    let mut factory = AssetFactory::new();
    for name in asset_names::TEXTURES {
        factory.register_texture(name);
    }
    factory.register_font(asset_names::VERSION_FONT);
    factory
}

//=== Installation ========================================================

/// Pushes the game scenes onto the stack and enables the asset factory.
pub fn install(systems: &mut CoreSystems<SceneId>, config: &SimulationConfig) {
    let scenes = &mut systems.scenes;

    scenes.push(SceneId::MainMenu, Box::new(MenuScene::new(&config.world)));
    scenes.push(SceneId::Simulation, Box::new(MainScene::new(config.clone())));
    scenes.start_from(SceneId::MainMenu);
    scenes.enable_factory(asset_catalog());
}

//=========================================================================
// Unit Tests
//=========================================================================
