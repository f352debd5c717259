use serde::{Deserialize, Serialize};

/// Capture status state machine.
///
/// State transitions:
/// ```text
/// pending → downloading → finished
///    ↓           ↓
///    └────────→ failed
/// ```
///
/// There is no cancelled state: disposing an orchestrator leaves the status
/// at whatever it last was.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureStatus {
    #[default]
    Pending,
    Downloading,
    Finished,
    Failed,
}

impl CaptureStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_downloading(&self) -> bool {
        matches!(self, Self::Downloading)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished | Self::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Downloading => "downloading",
            Self::Finished => "finished",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for CaptureStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time view of a capture, read under a single lock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptureSnapshot {
    pub status: CaptureStatus,
    /// Percentage in `0.0..=100.0`.
    pub progress: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_pending() {
        assert_eq!(CaptureStatus::default(), CaptureStatus::Pending);
        assert!(CaptureStatus::default().is_pending());
    }

    #[test]
    fn only_finished_and_failed_are_terminal() {
        assert!(!CaptureStatus::Pending.is_terminal());
        assert!(!CaptureStatus::Downloading.is_terminal());
        assert!(CaptureStatus::Finished.is_terminal());
        assert!(CaptureStatus::Failed.is_terminal());
    }

    #[test]
    fn display_uses_lowercase_names() {
        assert_eq!(CaptureStatus::Downloading.to_string(), "downloading");
        assert_eq!(CaptureStatus::Failed.to_string(), "failed");
    }

    #[test]
    fn snapshot_starts_pending_at_zero() {
        let snapshot = CaptureSnapshot::default();
        assert_eq!(snapshot.status, CaptureStatus::Pending);
        assert_eq!(snapshot.progress, 0.0);
    }
}
