use crate::models::error::CaptureError;
use crate::models::state::CaptureStatus;

/// Change notifications for a capture session.
///
/// Methods are called from whichever thread produced the change: the caller
/// of `start` or an engine thread. Implementations should marshal to the UI
/// thread if needed.
pub trait CaptureDelegate: Send + Sync {
    /// Called when the status changes.
    fn on_status_changed(&self, status: CaptureStatus);

    /// Called with every progress update (percentage, 0-100).
    fn on_progress_changed(&self, progress: f32);

    /// Called when the capture fails, right before the `Failed` status change.
    fn on_error(&self, error: &CaptureError);
}
