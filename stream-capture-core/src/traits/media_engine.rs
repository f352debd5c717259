use std::sync::Arc;

use async_trait::async_trait;

use crate::models::config::MediaOptions;
use crate::models::error::CaptureError;

/// Player events reported by an engine while a media reference plays.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Playback position as a fraction in `0.0..=1.0`.
    PositionChanged(f32),
    /// The engine hit an unrecoverable error; carries the engine's message if any.
    EncounteredError(Option<String>),
    /// The source ended and the sink was finalized.
    EndReached,
}

/// Callback invoked for every engine event.
///
/// Fires on an engine-owned thread, possibly concurrently with teardown.
pub type EngineEventCallback = Arc<dyn Fn(EngineEvent) + Send + Sync + 'static>;

/// Interface for external streaming/playback engines.
///
/// One engine value backs one player: `release` disposes that player, and
/// `release_media` disposes a media reference created by `create_media`.
/// Implemented by:
/// - `FfmpegEngine` (stream-capture-ffmpeg)
#[async_trait]
pub trait MediaEngine: Send + Sync {
    /// Engine-side media reference.
    type Media: Send + Sync + 'static;

    /// Create a media reference for `url` carrying a record-to-file sink.
    fn create_media(&self, url: &str, options: &MediaOptions) -> Result<Self::Media, CaptureError>;

    /// Resolve metadata of the media reference (duration, tracks).
    async fn parse(&self, media: &Self::Media) -> Result<(), CaptureError>;

    /// Begin playback/recording. Returns `true` if the engine accepted it.
    fn play(&self, media: &Self::Media) -> bool;

    /// Register the event callback. A later call replaces the previous callback.
    fn subscribe(&self, callback: EngineEventCallback);

    /// Stop playback. Must not block on the output being finalized.
    fn stop(&self);

    /// Release a media reference.
    fn release_media(&self, media: Self::Media);

    /// Release the player. No events may be delivered once this returns.
    fn release(&self);
}
