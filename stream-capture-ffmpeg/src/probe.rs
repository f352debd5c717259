//! Stream metadata via ffprobe.

use std::process::Stdio;
use std::time::Duration;

use serde::Deserialize;
use tokio::process::Command;

use stream_capture_core::AudioTrackInfo;

use crate::config::FfmpegConfig;
use crate::error::FfmpegError;

/// What ffprobe learned about a source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeInfo {
    /// Total duration in seconds; `None` for live sources.
    pub duration_secs: Option<f64>,
    pub audio_tracks: Vec<AudioTrackInfo>,
}

#[derive(Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    format: Option<ProbeFormat>,
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

#[derive(Deserialize)]
struct ProbeStream {
    index: usize,
    codec_type: Option<String>,
    #[serde(default)]
    tags: Option<ProbeTags>,
}

#[derive(Deserialize)]
struct ProbeTags {
    language: Option<String>,
    title: Option<String>,
}

/// Parse `ffprobe -print_format json -show_format -show_streams` output.
pub fn parse_probe_output(json: &str) -> Result<ProbeInfo, FfmpegError> {
    let output: ProbeOutput = serde_json::from_str(json)?;

    let duration_secs = output
        .format
        .and_then(|f| f.duration)
        .and_then(|d| d.trim().parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d > 0.0);

    let audio_tracks = output
        .streams
        .into_iter()
        .filter(|s| s.codec_type.as_deref() == Some("audio"))
        .map(|s| {
            let (language, title) = match s.tags {
                Some(tags) => (tags.language, tags.title),
                None => (None, None),
            };
            AudioTrackInfo {
                index: s.index,
                language,
                title,
            }
        })
        .collect();

    Ok(ProbeInfo {
        duration_secs,
        audio_tracks,
    })
}

fn build_probe_args(config: &FfmpegConfig, url: &str) -> Vec<String> {
    let mut args = vec![
        "-v".to_string(),
        "error".to_string(),
        "-print_format".to_string(),
        "json".to_string(),
        "-show_format".to_string(),
        "-show_streams".to_string(),
    ];
    if let Some(ref ua) = config.user_agent {
        args.extend(["-user_agent".to_string(), ua.clone()]);
    }
    args.push(url.to_string());
    args
}

/// Run ffprobe against `url`.
pub async fn probe(config: &FfmpegConfig, url: &str) -> Result<ProbeInfo, FfmpegError> {
    let args = build_probe_args(config, url);
    log::debug!("Probing {} with args: {:?}", url, args);

    let run = Command::new(&config.ffprobe_path)
        .args(&args)
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output();

    let output = tokio::time::timeout(Duration::from_secs(config.probe_timeout_secs), run)
        .await
        .map_err(|_| FfmpegError::ProbeTimeout(config.probe_timeout_secs))?
        .map_err(|source| FfmpegError::Spawn {
            binary: config.ffprobe_path.clone(),
            source,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let message = stderr
            .lines()
            .last()
            .map(str::to_string)
            .unwrap_or_else(|| output.status.to_string());
        return Err(FfmpegError::ProbeFailed(message));
    }

    parse_probe_output(&String::from_utf8_lossy(&output.stdout))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VOD_OUTPUT: &str = r#"{
        "streams": [
            { "index": 0, "codec_type": "video", "codec_name": "h264" },
            { "index": 1, "codec_type": "audio", "tags": { "language": "eng", "title": "English" } },
            { "index": 2, "codec_type": "audio", "tags": { "language": "obc" } },
            { "index": 3, "codec_type": "audio" },
            { "index": 4, "codec_type": "data" }
        ],
        "format": { "format_name": "hls", "duration": "5400.120000" }
    }"#;

    #[test]
    fn parses_duration_and_audio_tracks() {
        let info = parse_probe_output(VOD_OUTPUT).unwrap();
        assert_eq!(info.duration_secs, Some(5400.12));
        assert_eq!(info.audio_tracks.len(), 3);
        assert_eq!(info.audio_tracks[0].index, 1);
        assert_eq!(info.audio_tracks[0].language.as_deref(), Some("eng"));
        assert_eq!(info.audio_tracks[0].title.as_deref(), Some("English"));
        assert_eq!(info.audio_tracks[1].language.as_deref(), Some("obc"));
        assert_eq!(info.audio_tracks[2].language, None);
    }

    #[test]
    fn live_sources_have_no_duration() {
        let info = parse_probe_output(r#"{ "streams": [], "format": { "duration": "N/A" } }"#).unwrap();
        assert_eq!(info.duration_secs, None);

        let info = parse_probe_output(r#"{ "streams": [] }"#).unwrap();
        assert_eq!(info, ProbeInfo::default());
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            parse_probe_output("not json"),
            Err(FfmpegError::ProbeOutput(_))
        ));
    }

    #[test]
    fn probe_args_end_with_url() {
        let config = FfmpegConfig {
            user_agent: Some("capture/1.0".into()),
            ..Default::default()
        };
        let args = build_probe_args(&config, "https://example.com/live.m3u8");
        assert_eq!(args.last().map(String::as_str), Some("https://example.com/live.m3u8"));
        assert!(args.windows(2).any(|w| w == ["-user_agent", "capture/1.0"]));
    }
}
