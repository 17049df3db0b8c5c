// src/config.rs
//! Service configuration: TOML file + environment overrides.
//!
//! Resolution order:
//! 1) $EMOTION_CONFIG_PATH (must exist)
//! 2) config/app.toml (optional)
//! 3) built-in defaults
//!
//! Then `EMOTION_BIND_ADDR`, `EMOTION_MAX_INPUT_CHARS` and `EMOTION_DEBOUNCE_MS`
//! override single values. Unparsable env values are ignored.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

pub const DEFAULT_CONFIG_PATH: &str = "config/app.toml";

pub const ENV_CONFIG_PATH: &str = "EMOTION_CONFIG_PATH";
pub const ENV_BIND_ADDR: &str = "EMOTION_BIND_ADDR";
pub const ENV_MAX_INPUT_CHARS: &str = "EMOTION_MAX_INPUT_CHARS";
pub const ENV_DEBOUNCE_MS: &str = "EMOTION_DEBOUNCE_MS";

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSection,
    pub create_mode: CreateModeSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind_addr: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CreateModeSection {
    /// Longest sentence (in chars) the API accepts.
    pub max_input_chars: usize,
    pub debounce_ms: u64,
    pub saved_capacity: usize,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
        }
    }
}

impl Default for CreateModeSection {
    fn default() -> Self {
        Self {
            max_input_chars: 200,
            debounce_ms: 500,
            saved_capacity: 10,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let mut cfg: AppConfig = toml::from_str(s)?;
        cfg.sanitize();
        Ok(cfg)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("parsing config at {}", path.display()))
    }

    /// Load using env var + fallbacks, then apply env overrides.
    pub fn load() -> Result<Self> {
        let mut cfg = if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!(
                    "{} points to non-existent path {}",
                    ENV_CONFIG_PATH,
                    pb.display()
                ));
            }
            Self::load_from(&pb)?
        } else {
            let default = PathBuf::from(DEFAULT_CONFIG_PATH);
            if default.exists() {
                Self::load_from(&default)?
            } else {
                info!(path = DEFAULT_CONFIG_PATH, "no config file, using defaults");
                Self::default()
            }
        };
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(addr) = std::env::var(ENV_BIND_ADDR) {
            let addr = addr.trim();
            if !addr.is_empty() {
                self.server.bind_addr = addr.to_string();
            }
        }
        match parse_env_number(std::env::var(ENV_MAX_INPUT_CHARS).ok()) {
            Some(v) => self.create_mode.max_input_chars = v as usize,
            None => warn_if_set(ENV_MAX_INPUT_CHARS),
        }
        match parse_env_number(std::env::var(ENV_DEBOUNCE_MS).ok()) {
            Some(v) => self.create_mode.debounce_ms = v,
            None => warn_if_set(ENV_DEBOUNCE_MS),
        }
        self.sanitize();
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.create_mode.debounce_ms)
    }

    fn sanitize(&mut self) {
        let cm = &mut self.create_mode;
        cm.max_input_chars = cm.max_input_chars.clamp(1, 10_000);
        cm.debounce_ms = cm.debounce_ms.min(10_000);
        cm.saved_capacity = cm.saved_capacity.clamp(1, 100);
    }
}

fn parse_env_number(raw: Option<String>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
}

fn warn_if_set(name: &str) {
    if let Ok(v) = std::env::var(name) {
        warn!(var = name, value = %v, "ignoring unparsable env override");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = AppConfig::from_toml_str(
            r#"
[create_mode]
max_input_chars = 120
"#,
        )
        .unwrap();
        assert_eq!(cfg.create_mode.max_input_chars, 120);
        assert_eq!(cfg.create_mode.debounce_ms, 500);
        assert_eq!(cfg.server.bind_addr, "0.0.0.0:8000");
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let cfg = AppConfig::from_toml_str(
            r#"
[create_mode]
max_input_chars = 0
saved_capacity = 5000
debounce_ms = 99999
"#,
        )
        .unwrap();
        assert_eq!(cfg.create_mode.max_input_chars, 1);
        assert_eq!(cfg.create_mode.saved_capacity, 100);
        assert_eq!(cfg.debounce(), Duration::from_millis(10_000));
    }

    #[test]
    fn bad_toml_is_an_error() {
        assert!(AppConfig::from_toml_str("[create_mode\nmax_input_chars = 1").is_err());
        assert!(AppConfig::from_toml_str("[create_mode]\nmax_input_chars = \"many\"").is_err());
    }

    #[test]
    fn env_numbers_parse_leniently() {
        assert_eq!(parse_env_number(Some(" 250 ".into())), Some(250));
        assert_eq!(parse_env_number(Some("-3".into())), None);
        assert_eq!(parse_env_number(None), None);
    }

    #[test]
    fn shipped_config_parses() {
        let cfg = AppConfig::from_toml_str(include_str!("../config/app.toml")).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }
}
