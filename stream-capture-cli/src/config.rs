use std::fs;
use std::path::Path;

use serde::Deserialize;

use stream_capture_core::CaptureConfiguration;
use stream_capture_ffmpeg::FfmpegConfig;

use crate::error::CliError;

/// JSON config file: `{ "capture": { ... }, "ffmpeg": { ... } }`.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub capture: CaptureConfiguration,
    #[serde(default)]
    pub ffmpeg: FfmpegConfig,
}

impl FileConfig {
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let json = fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stream_capture_core::MuxFormat;

    #[test]
    fn empty_object_uses_defaults() {
        let config = FileConfig::from_json("{}").unwrap();
        assert_eq!(config.capture, CaptureConfiguration::default());
        assert_eq!(config.ffmpeg, FfmpegConfig::default());
    }

    #[test]
    fn reads_both_sections() {
        let config = FileConfig::from_json(
            r#"{
                "capture": { "mux": "mkv", "audio_languages": ["nld", "nl"] },
                "ffmpeg": { "ffmpeg_path": "/usr/local/bin/ffmpeg", "probe_timeout_secs": 5 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.capture.mux, MuxFormat::Mkv);
        assert_eq!(config.capture.audio_languages, vec!["nld", "nl"]);
        assert!(config.capture.create_parent_dirs);
        assert_eq!(config.ffmpeg.ffmpeg_path, "/usr/local/bin/ffmpeg");
        assert_eq!(config.ffmpeg.probe_timeout_secs, 5);
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let err = FileConfig::load(Some(Path::new("/nonexistent/capture.json"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/capture.json"));
    }

    #[test]
    fn no_path_means_defaults() {
        assert!(FileConfig::load(None).is_ok());
    }
}
