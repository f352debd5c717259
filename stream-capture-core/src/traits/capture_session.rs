use std::path::Path;

use async_trait::async_trait;

use crate::models::error::CaptureError;
use crate::models::state::CaptureStatus;

/// Main capture session interface.
///
/// Lets presentation code hold a capture as `Box<dyn CaptureSession>`
/// regardless of the engine behind it.
#[async_trait]
pub trait CaptureSession: Send + Sync {
    /// Current status.
    fn status(&self) -> CaptureStatus;

    /// Current progress percentage (0-100).
    fn progress(&self) -> f32;

    /// Reason of the last failure, if the session failed.
    fn failure(&self) -> Option<CaptureError>;

    /// Capture `stream_url` into `destination`. Transitions: pending → downloading/failed.
    async fn start(&self, stream_url: &str, destination: &Path) -> Result<(), CaptureError>;

    /// Stop the engine and release its resources. Idempotent.
    fn dispose(&self);
}
