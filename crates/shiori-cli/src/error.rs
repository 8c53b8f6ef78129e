use thiserror::Error;

use shiori_api::JikanError;
use shiori_core::error::ShioriError;
use shiori_runtime::RuntimeError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ShioriError),

    #[error(transparent)]
    Api(#[from] JikanError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Toml(#[from] toml::ser::Error),
}
