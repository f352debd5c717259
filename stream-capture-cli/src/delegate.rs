use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use stream_capture_core::{CaptureDelegate, CaptureError, CaptureStatus};

/// CaptureDelegate that forwards capture events to the log.
pub struct LogDelegate {
    label: String,
    last_percent: AtomicI32,
}

impl LogDelegate {
    pub fn new(label: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            label: label.into(),
            last_percent: AtomicI32::new(-1),
        })
    }

    /// Record `percent`; returns whether it differs from the last one logged.
    fn advance(&self, percent: i32) -> bool {
        self.last_percent.swap(percent, Ordering::Relaxed) != percent
    }
}

impl CaptureDelegate for LogDelegate {
    fn on_status_changed(&self, status: CaptureStatus) {
        log::info!("[{}] status: {}", self.label, status);
    }

    fn on_progress_changed(&self, progress: f32) {
        // One line per whole percent.
        if self.advance(progress.floor() as i32) {
            log::info!("[{}] progress: {:.0}%", self.label, progress);
        }
    }

    fn on_error(&self, error: &CaptureError) {
        log::error!("[{}] capture error: {}", self.label, error);
    }
}
