use std::env;
use std::path::PathBuf;

use crate::errors::ConfigError;

pub const DATA_DIR_VARIABLE: &str = "MOVIEDB_DATA_DIR";
pub const PRETTY_JSON_VARIABLE: &str = "MOVIEDB_PRETTY_JSON";

const DEFAULT_DATA_DIR: &str = "data";

/// Settings read from the environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// The directory holding the JSON documents.
    pub data_dir: PathBuf,

    /// Whether documents are pretty-printed when saved.
    pub pretty_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            pretty_json: false,
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(get_variable)
    }

    /// Reads the configuration through the given variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(data_dir) = lookup(DATA_DIR_VARIABLE) {
            if data_dir.trim().is_empty() {
                return Err(ConfigError::EmptyPath {
                    name: DATA_DIR_VARIABLE,
                });
            }

            config.data_dir = PathBuf::from(data_dir);
        }

        if let Some(flag) = lookup(PRETTY_JSON_VARIABLE) {
            config.pretty_json = parse_flag(PRETTY_JSON_VARIABLE, flag)?;
        }

        Ok(config)
    }
}

/// Returns the value of the named environment variable, if it is set
/// to valid Unicode.
pub fn get_variable(name: &str) -> Option<String> {
    env::var(name).ok()
}

fn parse_flag(name: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim() {
        "0" | "" => Ok(false),
        "1" => Ok(true),
        _ => Err(ConfigError::InvalidFlag { name, value }),
    }
}
