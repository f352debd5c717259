use thiserror::Error;

/// Errors that can occur during stream capture operations.
///
/// Engine-side failures (`InvalidInput`, `EngineRejected`, `EngineFault`) are
/// recorded as the failure reason of a session and surfaced through its
/// status. `AlreadyStarted` and `Disposed` signal misuse of an orchestrator
/// and are the only variants returned from `start`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("engine rejected capture: {0}")]
    EngineRejected(String),

    #[error("engine fault: {0}")]
    EngineFault(String),

    #[error("capture already started")]
    AlreadyStarted,

    #[error("capture session disposed")]
    Disposed,

    #[error("configuration failed: {0}")]
    Configuration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_detail() {
        let err = CaptureError::EngineRejected("engine declined playback".into());
        assert_eq!(err.to_string(), "engine rejected capture: engine declined playback");
    }
}
