//! # stream-capture-ffmpeg
//!
//! ffmpeg backend for stream-capture-kit.
//!
//! Provides:
//! - `FfmpegEngine`: `MediaEngine` that records with an `ffmpeg` child process
//! - `probe`: stream metadata (duration, audio tracks) via `ffprobe`
//! - `progress`: parsing of ffmpeg's `-progress` output
//!
//! ## Requirements
//! - `ffmpeg` and `ffprobe` on `PATH`, or configured via `FfmpegConfig`
//!
//! ## Usage
//! ```ignore
//! use stream_capture_core::CaptureOrchestrator;
//! use stream_capture_ffmpeg::FfmpegEngine;
//!
//! let orchestrator = CaptureOrchestrator::new(FfmpegEngine::new());
//! orchestrator.start("https://example.com/live.m3u8", "race.ts").await?;
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod probe;
pub mod progress;

pub use config::FfmpegConfig;
pub use engine::{FfmpegEngine, FfmpegMedia};
pub use error::FfmpegError;
pub use probe::ProbeInfo;
