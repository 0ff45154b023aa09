use std::io;
use std::path::PathBuf;

use pathviz_core::GridError;
use pathviz_paths::RunError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Run(#[from] RunError),

    #[error("terminal: {0}")]
    Terminal(#[from] io::Error),
}
