//=========================================================================
// projectile-lab
//
// Usage: projectile-lab [config.json]
//
// Without an argument the built-in defaults are used. Log verbosity
// follows RUST_LOG (default: info).
//
//=========================================================================

use std::process::ExitCode;

use log::{error, info};

use projectile_lab::config::SimulationConfig;
use projectile_lab::game::{self, SceneId};
use projectile_lab::EngineBuilder;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => match SimulationConfig::load(&path) {
            Ok(config) => {
                info!("Loaded configuration from {}", path);
                config
            }
            Err(e) => {
                error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => SimulationConfig::default(),
    };

    let result = EngineBuilder::<SceneId>::from_config(&config)
        .build()
        .init(|systems| game::install(systems, &config))
        .run();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
