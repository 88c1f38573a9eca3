use std::io::Read;
use std::path::{Path, PathBuf};

use crate::core::MIN_SIZE;
use crate::session::SessionSettings;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Config {
    #[serde(default = "defaults::size")]
    pub size: usize,
    /// Chance that a spawned tile is a 4 (0..=1).
    #[serde(default = "defaults::four_probability")]
    pub four_probability: f64,
    /// Delay between a committed move and the tile it spawns, in the interactive game.
    #[serde(default = "defaults::spawn_delay_ms")]
    pub spawn_delay_ms: u64,
    #[serde(default = "defaults::store_path")]
    pub store_path: PathBuf,
    /// Key the session is stored under.
    #[serde(default = "defaults::game_key")]
    pub game_key: String,
    #[serde(default)]
    pub muted: bool,
    #[serde(default = "defaults::log_file")]
    pub log_file: PathBuf,
    /// Fixed RNG seed; omit to seed from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            size: defaults::size(),
            four_probability: defaults::four_probability(),
            spawn_delay_ms: defaults::spawn_delay_ms(),
            store_path: defaults::store_path(),
            game_key: defaults::game_key(),
            muted: false,
            log_file: defaults::log_file(),
            seed: None,
        }
    }
}

impl Config {
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = std::fs::File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size < MIN_SIZE {
            return Err(ConfigError::Invalid(format!(
                "size must be at least {MIN_SIZE}, got {}",
                self.size
            )));
        }
        if !(0.0..=1.0).contains(&self.four_probability) {
            return Err(ConfigError::Invalid(format!(
                "four_probability must be within [0, 1], got {}",
                self.four_probability
            )));
        }
        if self.game_key.is_empty() {
            return Err(ConfigError::Invalid("game_key must not be empty".into()));
        }
        Ok(())
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            size: self.size,
            four_probability: self.four_probability,
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    pub fn size() -> usize {
        crate::core::DEFAULT_SIZE
    }

    pub fn four_probability() -> f64 {
        crate::core::DEFAULT_FOUR_PROBABILITY
    }

    pub fn spawn_delay_ms() -> u64 {
        250
    }

    pub fn store_path() -> PathBuf {
        PathBuf::from("slide_merge_store.json")
    }

    pub fn game_key() -> String {
        "2048".to_string()
    }

    pub fn log_file() -> PathBuf {
        PathBuf::from("slide_merge.log")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg = Config::from_toml_str("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.session_settings(), SessionSettings::default());
    }

    #[test]
    fn overrides_are_read() {
        let cfg = Config::from_toml_str(
            r#"
size = 5
four_probability = 0.1
spawn_delay_ms = 0
game_key = "five"
muted = true
seed = 42
"#,
        )
        .unwrap();
        assert_eq!(cfg.size, 5);
        assert_eq!(cfg.four_probability, 0.1);
        assert_eq!(cfg.spawn_delay_ms, 0);
        assert_eq!(cfg.game_key, "five");
        assert!(cfg.muted);
        assert_eq!(cfg.seed, Some(42));
    }

    #[test]
    fn rejects_tiny_grid() {
        let result = Config::from_toml_str("size = 1");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_probability_above_one() {
        let result = Config::from_toml_str("four_probability = 1.5");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_unparseable_toml() {
        let result = Config::from_toml_str("size = \"big\"");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }
}
