use std::path::PathBuf;

use thiserror::Error;

use crate::gemini::GeminiError;

/// Errors that stop the application shell before or outside the pipeline.
///
/// The verdict pipeline itself never fails; see `OracleError` and
/// `ExportError` for the failures it recovers from.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Failed to read {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to set up the Gemini client: {0}")]
    Client(#[from] GeminiError),

    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}
