//! ffmpeg process engine.
//!
//! Records a source into a single file with `ffmpeg -c copy`, reporting
//! progress from `-progress pipe:1` on a dedicated reader thread.

use std::io::{self, BufRead, BufReader, Read};
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use async_trait::async_trait;
use parking_lot::Mutex;

use stream_capture_core::{
    select_track, CaptureError, EngineEvent, EngineEventCallback, LanguagePreference,
    MediaEngine, MediaOptions,
};

use crate::config::FfmpegConfig;
use crate::error::FfmpegError;
use crate::probe::{self, ProbeInfo};
use crate::progress;

/// Media reference: a source URL plus its sink options and probe results.
pub struct FfmpegMedia {
    url: String,
    options: MediaOptions,
    probe: Mutex<Option<ProbeInfo>>,
}

impl FfmpegMedia {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn options(&self) -> &MediaOptions {
        &self.options
    }

    pub fn probe_info(&self) -> Option<ProbeInfo> {
        self.probe.lock().clone()
    }
}

/// ffmpeg-based media engine.
///
/// One engine drives at most one ffmpeg process at a time. Events are
/// delivered on the `ffmpeg-progress` thread and stop as soon as `stop` or
/// `release` is called.
pub struct FfmpegEngine {
    config: FfmpegConfig,
    callback: Arc<Mutex<Option<EngineEventCallback>>>,
    child: Arc<Mutex<Option<Child>>>,
    running: Arc<AtomicBool>,
    progress_reader: Mutex<Option<thread::JoinHandle<()>>>,
    stderr_reader: Arc<Mutex<Option<thread::JoinHandle<()>>>>,
}

impl FfmpegEngine {
    /// Create a new engine with default configuration.
    pub fn new() -> Self {
        Self::with_config(FfmpegConfig::default())
    }

    pub fn with_config(config: FfmpegConfig) -> Self {
        Self {
            config,
            callback: Arc::new(Mutex::new(None)),
            child: Arc::new(Mutex::new(None)),
            running: Arc::new(AtomicBool::new(false)),
            progress_reader: Mutex::new(None),
            stderr_reader: Arc::new(Mutex::new(None)),
        }
    }

    pub fn config(&self) -> &FfmpegConfig {
        &self.config
    }

    /// First line of `ffmpeg -version`, if the binary runs.
    pub fn version(&self) -> Option<String> {
        Command::new(&self.config.ffmpeg_path)
            .arg("-version")
            .output()
            .ok()
            .and_then(|output| {
                String::from_utf8(output.stdout)
                    .ok()
                    .and_then(|s| s.lines().next().map(|l| l.to_string()))
            })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Build ffmpeg command arguments for `media`.
    pub fn build_args(&self, media: &FfmpegMedia) -> Vec<String> {
        let options = &media.options;
        let mut args = Vec::new();

        // 1. Overwrite output, machine-readable progress on stdout
        args.extend(
            [
                "-y", "-hide_banner", "-nostdin", "-loglevel", "error", "-nostats", "-progress",
                "pipe:1",
            ]
            .map(String::from),
        );

        // 2. Input options
        args.extend(self.config.input_args.clone());
        if let Some(ref ua) = self.config.user_agent {
            args.extend(["-user_agent".to_string(), ua.clone()]);
        }
        args.extend(["-i".to_string(), media.url.clone()]);

        // 3. Audio track selection
        if let Some(index) = self.selected_audio_stream(media) {
            args.extend([
                "-map".to_string(),
                "0:v?".to_string(),
                "-map".to_string(),
                format!("0:{}", index),
            ]);
        }

        // 4. Output options
        args.extend(["-c".to_string(), "copy".to_string()]);
        args.extend(self.config.output_args.clone());
        args.extend(options.extra_options.clone());
        args.extend(["-f".to_string(), options.mux.ffmpeg_format().to_string()]);
        args.push(options.destination.to_string_lossy().to_string());

        args
    }

    /// Stream index of the audio track matching the requested languages.
    fn selected_audio_stream(&self, media: &FfmpegMedia) -> Option<usize> {
        let candidates = &media.options.audio_languages;
        let preferred = candidates.first()?.clone();
        let preference = LanguagePreference {
            preferred,
            candidates: candidates.clone(),
        };

        let probe = media.probe.lock();
        let tracks = &probe.as_ref()?.audio_tracks;
        let track = select_track(&preference, tracks);
        match track {
            Some(track) => log::debug!(
                "Selected audio stream {} ({:?}) for {}",
                track.index,
                track.language,
                media.url
            ),
            None => log::debug!(
                "No audio stream matches {:?}, using ffmpeg default for {}",
                candidates,
                media.url
            ),
        }
        track.map(|t| t.index)
    }

    fn join_readers(&self) {
        let handles = [self.progress_reader.lock().take(), self.stderr_reader.lock().take()];
        for handle in handles.into_iter().flatten() {
            if handle.thread().id() == thread::current().id() {
                // Released from inside an event callback; the thread ends on its own.
                continue;
            }
            let _ = handle.join();
        }
    }
}

impl Default for FfmpegEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Deliver `event` unless the engine was stopped.
fn emit(
    callback: &Mutex<Option<EngineEventCallback>>,
    running: &AtomicBool,
    event: EngineEvent,
) {
    if !running.load(Ordering::SeqCst) {
        return;
    }
    let callback = callback.lock().clone();
    if let Some(callback) = callback {
        callback(event);
    }
}

/// Spawn a named thread feeding each line of `reader` to `handle_line`.
///
/// Lines are decoded lossily so stray non-UTF-8 bytes never stop the
/// reader; only EOF or an I/O error does.
fn spawn_line_reader<R, F>(
    name: &str,
    reader: R,
    mut handle_line: F,
) -> io::Result<thread::JoinHandle<()>>
where
    R: Read + Send + 'static,
    F: FnMut(&str) + Send + 'static,
{
    thread::Builder::new().name(name.into()).spawn(move || {
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf);
                    handle_line(line.trim_end_matches(['\r', '\n']));
                }
                Err(e) => {
                    log::error!("Error reading ffmpeg output: {}", e);
                    break;
                }
            }
        }
    })
}

#[async_trait]
impl MediaEngine for FfmpegEngine {
    type Media = FfmpegMedia;

    fn create_media(&self, url: &str, options: &MediaOptions) -> Result<FfmpegMedia, CaptureError> {
        let url = url.trim();
        // A leading dash would be read as an ffmpeg option.
        if url.starts_with('-') || url.contains(['\n', '\r']) {
            return Err(FfmpegError::UnsupportedUrl(url.to_string()).into());
        }

        Ok(FfmpegMedia {
            url: url.to_string(),
            options: options.clone(),
            probe: Mutex::new(None),
        })
    }

    async fn parse(&self, media: &FfmpegMedia) -> Result<(), CaptureError> {
        let info = probe::probe(&self.config, &media.url).await?;
        log::debug!(
            "Probed {}: duration {:?}, {} audio track(s)",
            media.url,
            info.duration_secs,
            info.audio_tracks.len()
        );
        *media.probe.lock() = Some(info);
        Ok(())
    }

    fn play(&self, media: &FfmpegMedia) -> bool {
        if self.running.swap(true, Ordering::SeqCst) {
            log::warn!("ffmpeg already running, refusing to play {}", media.url);
            return false;
        }

        let args = self.build_args(media);
        log::info!("Starting ffmpeg capture of {} with args: {:?}", media.url, args);

        let spawned = Command::new(&self.config.ffmpeg_path)
            .args(&args)
            .env("LC_ALL", "C")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                log::error!("Failed to spawn {}: {}", self.config.ffmpeg_path, e);
                self.running.store(false, Ordering::SeqCst);
                return false;
            }
        };

        let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
            log::error!("Failed to capture ffmpeg output pipes");
            let _ = child.kill();
            let _ = child.wait();
            self.running.store(false, Ordering::SeqCst);
            return false;
        };
        *self.child.lock() = Some(child);

        // Keep the last error line for the failure event.
        let last_error = Arc::new(Mutex::new(None::<String>));
        let stderr_reader = {
            let last_error = Arc::clone(&last_error);
            spawn_line_reader("ffmpeg-stderr", stderr, move |line| {
                log::debug!("ffmpeg: {}", line);
                if !line.trim().is_empty() {
                    *last_error.lock() = Some(line.trim().to_string());
                }
            })
        };
        match stderr_reader {
            Ok(handle) => *self.stderr_reader.lock() = Some(handle),
            Err(e) => {
                log::error!("Failed to spawn ffmpeg reader thread: {}", e);
                self.stop();
                return false;
            }
        }

        let duration = media.probe.lock().as_ref().and_then(|p| p.duration_secs);
        let callback = Arc::clone(&self.callback);
        let running = Arc::clone(&self.running);
        let child_slot = Arc::clone(&self.child);
        let stderr_slot = Arc::clone(&self.stderr_reader);

        // The stdout reader owns the end of the process: on EOF it reaps the
        // child, drains stderr and reports end/error, unless stop() got there
        // first.
        let stdout = ProgressPipe {
            inner: stdout,
            on_eof: Some(Box::new(move || {
                let child = child_slot.lock().take();
                let Some(mut child) = child else {
                    return;
                };
                let exit = child.wait();
                // stderr closes with the process; its last line is the error.
                let stderr_reader = stderr_slot.lock().take();
                if let Some(handle) = stderr_reader {
                    let _ = handle.join();
                }
                let event = match exit {
                    Ok(status) if status.success() => EngineEvent::EndReached,
                    Ok(status) => {
                        let message = last_error
                            .lock()
                            .clone()
                            .unwrap_or_else(|| format!("ffmpeg exited with {}", status));
                        EngineEvent::EncounteredError(Some(message))
                    }
                    Err(e) => EngineEvent::EncounteredError(Some(e.to_string())),
                };
                emit(&callback, &running, event);
                running.store(false, Ordering::SeqCst);
            })),
        };

        let callback = Arc::clone(&self.callback);
        let running = Arc::clone(&self.running);
        let progress_reader = spawn_line_reader("ffmpeg-progress", stdout, move |line| {
            let fraction = if progress::is_progress_end(line) {
                duration.map(|_| 1.0)
            } else {
                progress::parse_out_time(line)
                    .and_then(|secs| progress::position_fraction(secs, duration))
            };
            if let Some(fraction) = fraction {
                emit(&callback, &running, EngineEvent::PositionChanged(fraction));
            }
        });

        match progress_reader {
            Ok(handle) => {
                *self.progress_reader.lock() = Some(handle);
                true
            }
            Err(e) => {
                log::error!("Failed to spawn ffmpeg reader thread: {}", e);
                self.stop();
                false
            }
        }
    }

    fn subscribe(&self, callback: EngineEventCallback) {
        *self.callback.lock() = Some(callback);
    }

    fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        let child = self.child.lock().take();
        if let Some(mut child) = child {
            log::info!("Stopping ffmpeg (pid {})", child.id());
            let _ = child.kill();
            let _ = child.wait();
        }
    }

    fn release_media(&self, media: FfmpegMedia) {
        log::debug!("Releasing media {}", media.url);
    }

    fn release(&self) {
        self.stop();
        self.join_readers();
        *self.callback.lock() = None;
    }
}

/// Reader that runs a hook once the underlying pipe hits EOF or fails.
struct ProgressPipe<R> {
    inner: R,
    on_eof: Option<Box<dyn FnOnce() + Send>>,
}

impl<R> ProgressPipe<R> {
    fn finish(&mut self) {
        if let Some(on_eof) = self.on_eof.take() {
            on_eof();
        }
    }
}

impl<R: Read> Read for ProgressPipe<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.inner.read(buf) {
            Ok(0) if !buf.is_empty() => {
                self.finish();
                Ok(0)
            }
            Ok(n) => Ok(n),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Err(e),
            Err(e) => {
                self.finish();
                Err(e)
            }
        }
    }
}
