//! Optional TOML configuration, overridden by command-line flags.
//!
//! ```toml
//! rows = 24
//! cols = 60
//!
//! [solver]
//! step_delay_ms = 10
//! path_frames = 20
//! ```

use std::fs;
use std::path::Path;

use pathviz_paths::SolverConfig;
use serde::Deserialize;

use crate::error::CliError;

pub const DEFAULT_ROWS: i32 = 20;
pub const DEFAULT_COLS: i32 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub rows: i32,
    pub cols: i32,
    pub solver: SolverConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            solver: SolverConfig::default(),
        }
    }
}

impl CliConfig {
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| CliError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}
