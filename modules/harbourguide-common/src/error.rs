use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarbourGuideError {
    /// A raw dataset could not be parsed into its container shape. Fatal at startup.
    #[error("Malformed {dataset} payload: {reason}")]
    MalformedPayload { dataset: &'static str, reason: String },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl HarbourGuideError {
    pub fn malformed(dataset: &'static str, reason: impl std::fmt::Display) -> Self {
        Self::MalformedPayload {
            dataset,
            reason: reason.to_string(),
        }
    }
}
