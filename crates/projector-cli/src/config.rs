use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const CONFIG_FILE: &str = "projector.toml";
const ENV_PREFIX: &str = "PROJECTOR_";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// Location of the SQLite database file.
    pub database_path: PathBuf,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// Accept due dates before today when adding occurrences.
    pub allow_past_due: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            log_level: "warn".to_string(),
            allow_past_due: false,
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }
}

/// `~/.local/share/projector/projector.db`, or `projector.db` in the working
/// directory when no home directory can be found.
pub fn default_database_path() -> PathBuf {
    match home::home_dir() {
        Some(home) => home
            .join(".local")
            .join("share")
            .join("projector")
            .join("projector.db"),
        None => PathBuf::from("projector.db"),
    }
}
