use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use tracing::Level;

use crate::{
    config::{Config, Emit},
    parser::parser::{ParserOptions, DEFAULT_MAX_DEPTH},
};

/// biesc parses .bies source files and reports the first syntax error
#[derive(Debug, Parser)]
#[command(name = "biesc", author, version)]
pub struct BiescArgs {
    /// The .bies file to parse
    #[arg()]
    pub file: PathBuf,

    /// Where to write the parsed program (default: stdout)
    #[arg(long = "o", value_name = "OUTFILE")]
    pub output: Option<PathBuf>,

    /// Where to write diagnostics (default: stderr)
    #[arg(long = "e", value_name = "ERRFILE")]
    pub error: Option<PathBuf>,

    /// Trace level: 0 warnings only, 1 debug, 2 trace
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=2))]
    pub trace: Option<u8>,

    /// Configuration file (default: .config_biesc.json if present)
    #[arg(long = "use-config", value_name = "FILE")]
    pub use_config: Option<PathBuf>,

    /// What to write for a parsed program
    #[arg(long, value_enum)]
    pub emit: Option<Emit>,

    /// Maximum nesting of blocks and expressions
    #[arg(long)]
    pub max_depth: Option<usize>,
}

/// Settings after layering flags over the config file over defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub output: Option<PathBuf>,
    pub error: Option<PathBuf>,
    pub trace: u8,
    pub emit: Emit,
    pub parser: ParserOptions,
}

impl BiescArgs {
    pub fn resolve(&self, config: Config) -> Settings {
        Settings {
            output: self.output.clone().or(config.output),
            error: self.error.clone().or(config.error),
            trace: self.trace.or(config.trace).unwrap_or(0),
            emit: self.emit.or(config.emit).unwrap_or_default(),
            parser: ParserOptions {
                max_depth: self
                    .max_depth
                    .or(config.max_depth)
                    .unwrap_or(DEFAULT_MAX_DEPTH),
            },
        }
    }
}

impl Settings {
    pub fn max_level(&self) -> Level {
        match self.trace {
            0 => Level::WARN,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

/// Only `.bies` files are accepted.
pub fn validate_filename(path: &Path) -> anyhow::Result<()> {
    match path.extension().and_then(|extension| extension.to_str()) {
        Some("bies") => Ok(()),
        _ => bail!("{} is not a .bies file", path.display()),
    }
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    Config::resolve(path).context("could not load configuration")
}
