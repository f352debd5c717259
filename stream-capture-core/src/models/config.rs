use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::CaptureError;

/// Container format the engine muxes the captured stream into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MuxFormat {
    /// MPEG transport stream, written as a single file.
    #[default]
    Ts,
    Mp4,
    Mkv,
}

impl MuxFormat {
    /// Muxer name in VLC stream-output syntax.
    pub fn sout_mux(&self) -> &'static str {
        match self {
            Self::Ts => "ts",
            Self::Mp4 => "mp4",
            Self::Mkv => "mkv",
        }
    }

    /// Muxer name as understood by ffmpeg's `-f`.
    pub fn ffmpeg_format(&self) -> &'static str {
        match self {
            Self::Ts => "mpegts",
            Self::Mp4 => "mp4",
            Self::Mkv => "matroska",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Ts => "ts",
            Self::Mp4 => "mp4",
            Self::Mkv => "mkv",
        }
    }
}

/// Configuration for a capture orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfiguration {
    /// Output container (default: MPEG-TS).
    pub mux: MuxFormat,

    /// Audio language candidates, in priority order, forwarded to the engine.
    /// Usually the output of `AudioTrackSelector`. Empty = engine default track.
    pub audio_languages: Vec<String>,

    /// Create the destination's parent directory before starting (default: true).
    pub create_parent_dirs: bool,

    /// Engine-specific raw options appended to the media reference.
    pub extra_options: Vec<String>,
}

impl CaptureConfiguration {
    pub fn validate(&self) -> Result<(), CaptureError> {
        if self.audio_languages.iter().any(|code| code.trim().is_empty()) {
            return Err(CaptureError::Configuration(
                "audio language candidates must not be blank".into(),
            ));
        }
        if self.extra_options.iter().any(|opt| opt.trim().is_empty()) {
            return Err(CaptureError::Configuration(
                "extra engine options must not be blank".into(),
            ));
        }
        Ok(())
    }

    /// Build the media options for one capture into `destination`.
    pub fn media_options(&self, destination: &Path) -> MediaOptions {
        MediaOptions {
            destination: destination.to_path_buf(),
            mux: self.mux,
            audio_languages: self.audio_languages.clone(),
            extra_options: self.extra_options.clone(),
        }
    }
}

impl Default for CaptureConfiguration {
    fn default() -> Self {
        Self {
            mux: MuxFormat::Ts,
            audio_languages: Vec::new(),
            create_parent_dirs: true,
            extra_options: Vec::new(),
        }
    }
}

/// Options attached to an engine media reference: a record-to-file sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaOptions {
    pub destination: PathBuf,
    pub mux: MuxFormat,
    pub audio_languages: Vec<String>,
    pub extra_options: Vec<String>,
}

impl MediaOptions {
    /// Record-to-file sink with the default transport stream muxer.
    pub fn record_to_file(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
            mux: MuxFormat::Ts,
            audio_languages: Vec::new(),
            extra_options: Vec::new(),
        }
    }

    /// Stream-output option for VLC-style engines,
    /// e.g. `:sout=#std{access=file,mux=ts,dst="out.ts"}`.
    pub fn to_sout_option(&self) -> String {
        format!(
            ":sout=#std{{access=file,mux={},dst=\"{}\"}}",
            self.mux.sout_mux(),
            self.destination.display()
        )
    }
}
