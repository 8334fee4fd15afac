//! User configuration, read from `<config dir>/spcplay/config.toml`.
//! Command-line flags win over the config file; the config file wins over
//! the built-in defaults.

use std::path::PathBuf;

use log::warn;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Default render length when neither --seconds nor the ID666 tag
    /// provide one.
    pub seconds: Option<u64>,
    /// Default directory for rendered files.
    pub out_dir: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Self {
        let Some(base) = dirs::config_dir() else {
            return Self::default();
        };
        let path = base.join("spcplay").join("config.toml");
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(_) => return Self::default(),
        };
        match toml::from_str(&text) {
            Ok(config) => config,
            Err(err) => {
                warn!("{}: {err}", path.display());
                Self::default()
            }
        }
    }
}
