pub mod admin;
pub mod combat;
pub mod config;
pub mod entities;
pub mod persistence;
pub mod scripting;
pub mod telemetry;
pub mod world;

pub use config::{AppConfig, ConfigError, CostumeConfig};
pub use persistence::costume_table::{CatalogError, FileSource, StaticSource};
pub use scripting::hooks::{
    CombatObserver, CostumeHost, CostumeSource, ItemUseGate, MapChangeObserver, PlayerHandle,
    TickObserver, UseDecision, UseRejection, WorldObserver,
};
pub use world::costumes::CostumeService;
pub use world::time::Timestamp;

use admin::console::{Console, ConsoleState};
use std::io::BufRead;

pub fn run(args: &[String]) -> Result<(), String> {
    let config = AppConfig::from_args(args).map_err(|err| err.to_string())?;
    telemetry::logging::init(&config.log_level)?;
    let source = FileSource::new(&config.config_path, &config.catalog_path);
    let mut console = Console::start(source);

    println!("costumes: startup");
    println!("- config: {}", config.config_path.display());
    println!(
        "- catalog: {} ({} costumes)",
        config.catalog_path.display(),
        console.service.catalog().len()
    );
    println!("- enabled: {}", console.service.config().enabled);
    println!("- trigger spell: {}", console.service.config().spell_id);

    match config.script_path.as_ref() {
        Some(path) => {
            let script = std::fs::read_to_string(path)
                .map_err(|err| format!("failed to read {}: {}", path.display(), err))?;
            for line in script.lines() {
                replay_line(&mut console, line);
                if console.state() == ConsoleState::Stopped {
                    break;
                }
            }
        }
        None => {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = line.map_err(|err| format!("stdin read failed: {}", err))?;
                replay_line(&mut console, &line);
                if console.state() == ConsoleState::Stopped {
                    break;
                }
            }
        }
    }

    if console.state() == ConsoleState::Running {
        console.service.on_shutdown();
    }
    Ok(())
}

fn replay_line<S: CostumeSource>(console: &mut Console<S>, line: &str) {
    for output in console.execute_line(line) {
        println!("{}", output);
    }
}
