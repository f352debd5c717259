//! # stream-capture-core
//!
//! Engine-agnostic stream capture core library.
//!
//! Provides the capture state machine, the media engine abstraction and the
//! audio language selection used to pick a track on multi-language streams.
//! Concrete engines (e.g. the ffmpeg backend) implement the `MediaEngine`
//! trait and plug into the generic `CaptureOrchestrator`.
//!
//! ## Architecture
//!
//! ```text
//! stream-capture-core (this crate)
//! ├── traits/    ← MediaEngine, CaptureSession, CaptureDelegate
//! ├── models/    ← CaptureError, CaptureStatus, CaptureConfiguration, content descriptors
//! ├── language/  ← language code tables, AudioTrackSelector
//! ├── session/   ← CaptureOrchestrator (generic state machine)
//! └── storage/   ← output file naming
//! ```

pub mod language;
pub mod models;
pub mod session;
pub mod storage;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use language::codes::{is_informational_channel, language_name, two_letter_code, LanguageCodes};
pub use language::selector::{select_track, AudioTrackSelector, LanguagePreference};
pub use models::config::{CaptureConfiguration, MediaOptions, MuxFormat};
pub use models::content::{AudioTrackInfo, ContentDescriptor, ContentType, PlayableContent};
pub use models::error::CaptureError;
pub use models::state::{CaptureSnapshot, CaptureStatus};
pub use session::orchestrator::CaptureOrchestrator;
pub use storage::output_path::{recording_path, sanitize_file_name};
pub use traits::capture_delegate::CaptureDelegate;
pub use traits::capture_session::CaptureSession;
pub use traits::media_engine::{EngineEvent, EngineEventCallback, MediaEngine};
