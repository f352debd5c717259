use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::models::config::CaptureConfiguration;
use crate::models::error::CaptureError;
use crate::models::state::{CaptureSnapshot, CaptureStatus};
use crate::traits::capture_delegate::CaptureDelegate;
use crate::traits::capture_session::CaptureSession;
use crate::traits::media_engine::{EngineEvent, EngineEventCallback, MediaEngine};

/// Observable change produced by a transition, published outside the lock.
#[derive(Debug)]
enum Change {
    Downloading,
    Progress(f32),
    Finished,
    Failed(CaptureError),
}

/// Internal mutable session state, protected by `parking_lot::Mutex`.
///
/// Every mutation goes through the methods below, so the disposed and
/// terminal checks apply to the `start` path and engine callbacks alike.
struct SessionState {
    status: CaptureStatus,
    progress: f32,
    failure: Option<CaptureError>,
    started: bool,
    disposed: bool,
}

impl SessionState {
    fn new() -> Self {
        Self {
            status: CaptureStatus::Pending,
            progress: 0.0,
            failure: None,
            started: false,
            disposed: false,
        }
    }

    fn accepts_changes(&self, what: &str) -> bool {
        if self.disposed {
            log::debug!("Dropping {} after dispose", what);
            return false;
        }
        if self.status.is_terminal() {
            log::debug!("Ignoring {} in terminal state {}", what, self.status);
            return false;
        }
        true
    }

    fn begin_downloading(&mut self) -> Option<Change> {
        if !self.accepts_changes("playback start") || !self.status.is_pending() {
            return None;
        }
        self.status = CaptureStatus::Downloading;
        Some(Change::Downloading)
    }

    fn fail(&mut self, error: CaptureError) -> Option<Change> {
        if !self.accepts_changes("failure") {
            return None;
        }
        self.status = CaptureStatus::Failed;
        self.progress = 0.0;
        self.failure = Some(error.clone());
        Some(Change::Failed(error))
    }

    fn apply_event(&mut self, event: EngineEvent) -> Option<Change> {
        if !self.accepts_changes("engine event") {
            return None;
        }
        match event {
            EngineEvent::PositionChanged(fraction) => {
                self.progress = fraction * 100.0;
                Some(Change::Progress(self.progress))
            }
            EngineEvent::EncounteredError(message) => {
                let message = message.unwrap_or_else(|| "playback error".into());
                self.fail(CaptureError::EngineFault(message))
            }
            EngineEvent::EndReached => {
                self.status = CaptureStatus::Finished;
                self.progress = 100.0;
                Some(Change::Finished)
            }
        }
    }
}

/// Engine-agnostic capture orchestrator.
///
/// Drives a single record-to-file capture through a `MediaEngine` and
/// translates engine callbacks into the capture state machine:
/// ```text
/// start ─ create_media → parse (await) → subscribe → play ─┬→ downloading
///                                                           └→ failed
/// engine events: position → progress, error → failed, end → finished
/// ```
/// One orchestrator performs one capture; create a new one to retry.
pub struct CaptureOrchestrator<E: MediaEngine> {
    engine: E,
    config: CaptureConfiguration,
    session_state: Arc<Mutex<SessionState>>,
    media: Mutex<Option<E::Media>>,
    delegate: Option<Arc<dyn CaptureDelegate>>,
}

impl<E: MediaEngine> CaptureOrchestrator<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            config: CaptureConfiguration::default(),
            session_state: Arc::new(Mutex::new(SessionState::new())),
            media: Mutex::new(None),
            delegate: None,
        }
    }

    pub fn with_config(engine: E, config: CaptureConfiguration) -> Result<Self, CaptureError> {
        config.validate()?;
        let mut orchestrator = Self::new(engine);
        orchestrator.config = config;
        Ok(orchestrator)
    }

    pub fn set_delegate(&mut self, delegate: Arc<dyn CaptureDelegate>) {
        self.delegate = Some(delegate);
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn config(&self) -> &CaptureConfiguration {
        &self.config
    }

    pub fn status(&self) -> CaptureStatus {
        self.session_state.lock().status
    }

    pub fn progress(&self) -> f32 {
        self.session_state.lock().progress
    }

    pub fn snapshot(&self) -> CaptureSnapshot {
        let s = self.session_state.lock();
        CaptureSnapshot {
            status: s.status,
            progress: s.progress,
        }
    }

    pub fn failure(&self) -> Option<CaptureError> {
        self.session_state.lock().failure.clone()
    }

    pub fn is_disposed(&self) -> bool {
        self.session_state.lock().disposed
    }

    /// Capture `stream_url` into `destination`.
    ///
    /// Suspends only while the engine parses the media. Engine failures end
    /// in `CaptureStatus::Failed` and still return `Ok(())`; `Err` is
    /// reserved for calling `start` twice or after `dispose`.
    pub async fn start(
        &self,
        stream_url: &str,
        destination: impl AsRef<Path>,
    ) -> Result<(), CaptureError> {
        {
            let mut s = self.session_state.lock();
            if s.disposed {
                return Err(CaptureError::Disposed);
            }
            if s.started {
                log::warn!("Ignoring second start for {}", stream_url);
                return Err(CaptureError::AlreadyStarted);
            }
            s.started = true;
        }

        if stream_url.trim().is_empty() {
            self.fail(CaptureError::InvalidInput("no stream URL supplied".into()));
            return Ok(());
        }

        let destination = destination.as_ref();
        if self.config.create_parent_dirs {
            if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    log::error!("Failed to create output directory {}: {}", parent.display(), e);
                    self.fail(CaptureError::InvalidInput(format!(
                        "cannot create {}: {}",
                        parent.display(),
                        e
                    )));
                    return Ok(());
                }
            }
        }

        let options = self.config.media_options(destination);
        let media = match self.engine.create_media(stream_url, &options) {
            Ok(media) => media,
            Err(e) => {
                log::error!("Engine could not create media for {}: {}", stream_url, e);
                self.fail(match e {
                    CaptureError::EngineRejected(_) | CaptureError::InvalidInput(_) => e,
                    other => CaptureError::EngineRejected(other.to_string()),
                });
                return Ok(());
            }
        };

        // Parse outcome is not surfaced; play decides.
        if let Err(e) = self.engine.parse(&media).await {
            log::warn!("Parsing {} failed, trying playback anyway: {}", stream_url, e);
        }

        self.engine.subscribe(self.event_sink());

        {
            let s = self.session_state.lock();
            if s.disposed {
                drop(s);
                log::debug!("Session disposed while parsing {}, releasing media", stream_url);
                self.engine.release_media(media);
                return Ok(());
            }
            *self.media.lock() = Some(media);
        }

        let accepted = {
            let media = self.media.lock();
            media.as_ref().is_some_and(|m| self.engine.play(m))
        };

        if accepted {
            let change = self.session_state.lock().begin_downloading();
            if let Some(change) = change {
                log::info!("Capturing {} into {}", stream_url, destination.display());
                publish(&self.delegate, change);
            }
        } else {
            self.fail(CaptureError::EngineRejected("engine declined playback".into()));
        }

        Ok(())
    }

    /// Stop the engine and release the media and player.
    ///
    /// Idempotent and callable from any state. Leaves the status untouched;
    /// engine events delivered afterwards are dropped.
    pub fn dispose(&self) {
        let status = {
            let mut s = self.session_state.lock();
            if s.disposed {
                return;
            }
            s.disposed = true;
            s.status
        };

        log::debug!("Disposing capture session in state {}", status);

        self.engine.stop();
        if let Some(media) = self.media.lock().take() {
            self.engine.release_media(media);
        }
        self.engine.release();
    }

    // --- Internal helpers ---

    fn fail(&self, error: CaptureError) {
        let change = self.session_state.lock().fail(error);
        if let Some(change) = change {
            publish(&self.delegate, change);
        }
    }

    /// Engine callback feeding the shared transition path.
    fn event_sink(&self) -> EngineEventCallback {
        let session_state = Arc::clone(&self.session_state);
        let delegate = self.delegate.clone();

        Arc::new(move |event: EngineEvent| {
            let change = session_state.lock().apply_event(event);
            if let Some(change) = change {
                publish(&delegate, change);
            }
        })
    }
}

fn publish(delegate: &Option<Arc<dyn CaptureDelegate>>, change: Change) {
    match &change {
        Change::Finished => log::info!("Capture finished"),
        Change::Failed(e) => log::warn!("Capture failed: {}", e),
        _ => {}
    }

    let Some(d) = delegate else {
        return;
    };
    match change {
        Change::Downloading => d.on_status_changed(CaptureStatus::Downloading),
        Change::Progress(progress) => d.on_progress_changed(progress),
        Change::Finished => {
            d.on_progress_changed(100.0);
            d.on_status_changed(CaptureStatus::Finished);
        }
        Change::Failed(error) => {
            d.on_error(&error);
            d.on_progress_changed(0.0);
            d.on_status_changed(CaptureStatus::Failed);
        }
    }
}

impl<E: MediaEngine> Drop for CaptureOrchestrator<E> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[async_trait]
impl<E: MediaEngine> CaptureSession for CaptureOrchestrator<E> {
    fn status(&self) -> CaptureStatus {
        CaptureOrchestrator::status(self)
    }

    fn progress(&self) -> f32 {
        CaptureOrchestrator::progress(self)
    }

    fn failure(&self) -> Option<CaptureError> {
        CaptureOrchestrator::failure(self)
    }

    async fn start(&self, stream_url: &str, destination: &Path) -> Result<(), CaptureError> {
        CaptureOrchestrator::start(self, stream_url, destination).await
    }

    fn dispose(&self) {
        CaptureOrchestrator::dispose(self)
    }
}
