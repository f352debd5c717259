use std::path::PathBuf;

use thiserror::Error;

use stream_capture_core::CaptureError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Capture(#[from] CaptureError),
}
