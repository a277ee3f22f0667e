use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_SPELL_ID: u32 = 18282;
pub const DEFAULT_DURATION_SECONDS: i32 = 60;
pub const DEFAULT_COOLDOWN_SECONDS: i64 = 240;
/// Vanish visual, played on every apply and demorph.
pub const DEFAULT_VISUAL_SPELL_ID: u32 = 24222;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("usage: {0}")]
    Usage(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug)]
pub struct AppConfig {
    pub config_path: PathBuf,
    pub catalog_path: PathBuf,
    pub script_path: Option<PathBuf>,
    pub log_level: String,
}

impl AppConfig {
    pub fn from_args(args: &[String]) -> Result<Self, ConfigError> {
        if args.len() < 3 {
            return Err(ConfigError::Usage(
                "costumes <config.yaml> <catalog.yaml> [script]".to_string(),
            ));
        }
        let config_path = Path::new(&args[1]).to_path_buf();
        let catalog_path = Path::new(&args[2]).to_path_buf();
        let script_path = args.get(3).map(PathBuf::from);
        let log_level = std::env::var("COSTUMES_LOG")
            .ok()
            .map(|value| value.trim().to_ascii_lowercase())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| "info".to_string());
        Ok(Self {
            config_path,
            catalog_path,
            script_path,
            log_level,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CostumeConfig {
    pub enabled: bool,
    /// Items whose on-use spell matches this id are costume items.
    pub spell_id: u32,
    pub duration: i32,
    pub cooldown: i64,
    pub can_use_in_combat: bool,
    pub can_use_in_battleground: bool,
    pub can_use_in_arena: bool,
    pub visual_spell_id: u32,
}

impl Default for CostumeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            spell_id: DEFAULT_SPELL_ID,
            duration: DEFAULT_DURATION_SECONDS,
            cooldown: DEFAULT_COOLDOWN_SECONDS,
            can_use_in_combat: false,
            can_use_in_battleground: false,
            can_use_in_arena: false,
            visual_spell_id: DEFAULT_VISUAL_SPELL_ID,
        }
    }
}

impl CostumeConfig {
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content, path),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}
