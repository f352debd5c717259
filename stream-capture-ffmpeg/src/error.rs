use thiserror::Error;

use stream_capture_core::CaptureError;

/// Errors raised by the ffmpeg backend.
#[derive(Debug, Error)]
pub enum FfmpegError {
    #[error("failed to spawn {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("ffprobe failed: {0}")]
    ProbeFailed(String),

    #[error("ffprobe timed out after {0}s")]
    ProbeTimeout(u64),

    #[error("invalid ffprobe output: {0}")]
    ProbeOutput(#[from] serde_json::Error),

    #[error("unsupported stream URL: {0}")]
    UnsupportedUrl(String),
}

impl From<FfmpegError> for CaptureError {
    fn from(e: FfmpegError) -> Self {
        match e {
            FfmpegError::UnsupportedUrl(_) => CaptureError::InvalidInput(e.to_string()),
            FfmpegError::Spawn { .. } => CaptureError::EngineRejected(e.to_string()),
            _ => CaptureError::EngineFault(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_to_capture_errors() {
        let spawn = FfmpegError::Spawn {
            binary: "ffmpeg".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(matches!(
            CaptureError::from(spawn),
            CaptureError::EngineRejected(_)
        ));
        assert!(matches!(
            CaptureError::from(FfmpegError::UnsupportedUrl("-i".into())),
            CaptureError::InvalidInput(_)
        ));
        assert!(matches!(
            CaptureError::from(FfmpegError::ProbeTimeout(30)),
            CaptureError::EngineFault(_)
        ));
    }
}
