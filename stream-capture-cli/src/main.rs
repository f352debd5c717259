mod config;
mod delegate;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use stream_capture_core::{
    language_name, recording_path, AudioTrackSelector, CaptureOrchestrator, CaptureStatus,
    ContentDescriptor, ContentType, MuxFormat,
};
use stream_capture_ffmpeg::FfmpegEngine;

use config::FileConfig;
use delegate::LogDelegate;
use error::CliError;

/// Capture a live stream to a local file.
#[derive(Debug, Parser)]
#[command(name = "stream-capture", version, about)]
struct Args {
    /// Stream URL (HLS playlist, DASH manifest, TS...)
    url: String,

    /// Output file; derived from --name in --output-dir when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for derived output names
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Content kind
    #[arg(long, value_enum, default_value_t = ContentKind::Session)]
    content_type: ContentKind,

    /// Content or channel name (e.g. "Main Feed", "DATA")
    #[arg(long, default_value = "")]
    name: String,

    /// Default audio language (e.g. "deu"); English when empty
    #[arg(short, long, default_value = "")]
    language: String,

    /// Output container (overrides the config file)
    #[arg(long, value_enum)]
    mux: Option<MuxArg>,

    /// JSON config file with "capture" and "ffmpeg" sections
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Status poll interval in milliseconds
    #[arg(long, default_value_t = 1000)]
    poll_interval_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ContentKind {
    Channel,
    Session,
    Episode,
    Video,
}

impl From<ContentKind> for ContentType {
    fn from(kind: ContentKind) -> Self {
        match kind {
            ContentKind::Channel => ContentType::Channel,
            ContentKind::Session => ContentType::Session,
            ContentKind::Episode => ContentType::Episode,
            ContentKind::Video => ContentType::Video,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MuxArg {
    /// MPEG transport stream
    Ts,
    Mp4,
    /// Matroska
    Mkv,
}

impl From<MuxArg> for MuxFormat {
    fn from(mux: MuxArg) -> Self {
        match mux {
            MuxArg::Ts => MuxFormat::Ts,
            MuxArg::Mp4 => MuxFormat::Mp4,
            MuxArg::Mkv => MuxFormat::Mkv,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match run(args).await {
        Ok(CaptureStatus::Finished) => ExitCode::SUCCESS,
        Ok(status) => {
            log::warn!("Capture ended in state {}", status);
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<CaptureStatus, CliError> {
    let mut file_config = FileConfig::load(args.config.as_deref())?;
    if let Some(mux) = args.mux {
        file_config.capture.mux = mux.into();
    }

    let content = ContentDescriptor::new(args.content_type.into(), args.name.clone());
    let preference = AudioTrackSelector::select(&content, &args.language);
    log::info!(
        "Preferred audio: {} ({}), candidates: {:?}",
        preference.preferred,
        language_name(&preference.preferred).unwrap_or("unknown"),
        preference.candidates
    );
    if file_config.capture.audio_languages.is_empty() {
        file_config.capture.audio_languages = preference.candidates.clone();
    }

    let destination = args.output.clone().unwrap_or_else(|| {
        recording_path(&args.output_dir, &args.name, file_config.capture.mux)
    });

    let engine = FfmpegEngine::with_config(file_config.ffmpeg);
    match engine.version() {
        Some(version) => log::debug!("Using {}", version),
        None => log::warn!("{} not found or not runnable", engine.config().ffmpeg_path),
    }

    let mut orchestrator = CaptureOrchestrator::with_config(engine, file_config.capture)?;
    orchestrator.set_delegate(LogDelegate::new(destination.display().to_string()));

    orchestrator.start(&args.url, &destination).await?;

    let mut interval = tokio::time::interval(Duration::from_millis(args.poll_interval_ms.max(50)));
    let interrupted = tokio::signal::ctrl_c();
    tokio::pin!(interrupted);
    loop {
        tokio::select! {
            _ = &mut interrupted => {
                log::info!("Interrupted, stopping capture");
                break;
            }
            _ = interval.tick() => {
                let snapshot = orchestrator.snapshot();
                if snapshot.status.is_terminal() {
                    break;
                }
                log::debug!("{} {:.1}%", snapshot.status, snapshot.progress);
            }
        }
    }

    let status = orchestrator.status();
    if let Some(failure) = orchestrator.failure() {
        log::error!("Capture of {} failed: {}", args.url, failure);
    }
    orchestrator.dispose();
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_args() {
        let args = Args::try_parse_from(["stream-capture", "https://example.com/live.m3u8"]).unwrap();
        assert_eq!(args.url, "https://example.com/live.m3u8");
        assert_eq!(args.content_type, ContentKind::Session);
        assert!(args.output.is_none());
        assert!(args.mux.is_none());
    }

    #[test]
    fn parses_channel_args() {
        let args = Args::try_parse_from([
            "stream-capture",
            "https://example.com/live.m3u8",
            "--content-type",
            "channel",
            "--name",
            "PIT LANE",
            "-l",
            "deu",
            "--mux",
            "mkv",
            "-o",
            "pit.mkv",
        ])
        .unwrap();

        assert_eq!(ContentType::from(args.content_type), ContentType::Channel);
        assert_eq!(args.name, "PIT LANE");
        assert_eq!(args.language, "deu");
        assert_eq!(args.mux.map(MuxFormat::from), Some(MuxFormat::Mkv));
        assert_eq!(args.output, Some(PathBuf::from("pit.mkv")));
    }

    #[test]
    fn rejects_unknown_content_type() {
        assert!(Args::try_parse_from([
            "stream-capture",
            "https://example.com/live.m3u8",
            "--content-type",
            "podcast",
        ])
        .is_err());
    }

    #[test]
    fn rejects_unknown_mux() {
        assert!(Args::try_parse_from([
            "stream-capture",
            "https://example.com/live.m3u8",
            "--mux",
            "avi",
        ])
        .is_err());
    }
}
