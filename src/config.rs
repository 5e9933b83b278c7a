//! Configuration file for the `biesc` binary.
//!
//! A JSON object whose keys are all optional:
//!
//! ```json
//! { "output": "out.txt", "error": "errors.txt", "trace": 1, "max_depth": 64, "emit": "source" }
//! ```
//!
//! Command-line flags take precedence over the file.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

/// Name of the configuration file looked up in the working directory when
/// none is given.
pub const DEFAULT_CONFIG_FILE: &str = ".config_biesc.json";

/// What the binary writes for a successfully parsed program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Emit {
    /// The `{:#?}` dump of the tree
    #[default]
    Ast,
    /// The program pretty-printed back to source
    Source,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub output: Option<PathBuf>,
    pub error: Option<PathBuf>,
    pub trace: Option<u8>,
    pub max_depth: Option<usize>,
    pub emit: Option<Emit>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("trace level {0} is out of range (expected 0-2)")]
    TraceLevel(u8),
}

impl Config {
    pub fn from_json(path: &Path, text: &str) -> Result<Config, ConfigError> {
        let config: Config = serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        match config.trace {
            Some(level) if level > 2 => Err(ConfigError::TraceLevel(level)),
            _ => Ok(config),
        }
    }

    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Config::from_json(path, &text)
    }

    /// Loads `path` if given, which must then exist. Otherwise loads the
    /// default file when present and falls back to an empty config.
    pub fn resolve(path: Option<&Path>) -> Result<Config, ConfigError> {
        match path {
            Some(path) => Config::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Config::load(default)
                } else {
                    tracing::trace!("no config file, using defaults");
                    Ok(Config::default())
                }
            }
        }
    }
}
