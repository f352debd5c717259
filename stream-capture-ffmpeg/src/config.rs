use serde::{Deserialize, Serialize};

/// ffmpeg backend configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FfmpegConfig {
    /// Path to the ffmpeg binary.
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,
    /// Path to the ffprobe binary.
    #[serde(default = "default_ffprobe_path")]
    pub ffprobe_path: String,
    /// Additional input arguments (before `-i`).
    #[serde(default)]
    pub input_args: Vec<String>,
    /// Additional output arguments (before the muxer).
    #[serde(default)]
    pub output_args: Vec<String>,
    /// How long ffprobe may take to read the stream headers.
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,
    /// User agent sent to HTTP sources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

fn default_ffprobe_path() -> String {
    "ffprobe".to_string()
}

fn default_probe_timeout() -> u64 {
    30
}

impl Default for FfmpegConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            ffprobe_path: default_ffprobe_path(),
            input_args: Vec::new(),
            output_args: Vec::new(),
            probe_timeout_secs: default_probe_timeout(),
            user_agent: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = FfmpegConfig::default();
        assert_eq!(config.ffmpeg_path, "ffmpeg");
        assert_eq!(config.ffprobe_path, "ffprobe");
        assert_eq!(config.probe_timeout_secs, 30);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config: FfmpegConfig =
            serde_json::from_str(r#"{ "ffmpeg_path": "/opt/ffmpeg/bin/ffmpeg" }"#).unwrap();
        assert_eq!(config.ffmpeg_path, "/opt/ffmpeg/bin/ffmpeg");
        assert_eq!(config.ffprobe_path, "ffprobe");
        assert!(config.input_args.is_empty());
        assert!(config.user_agent.is_none());
    }
}
