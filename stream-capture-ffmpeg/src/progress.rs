//! ffmpeg progress parsing.
//!
//! The engine runs ffmpeg with `-progress pipe:1`, which prints `key=value`
//! lines (`out_time=00:00:04.000000`, `progress=continue`, ...). Plain stats
//! lines (`frame=... time=00:00:04.00 ...`) are accepted as well.

/// Parse time string in HH:MM:SS.ms format to seconds.
pub fn parse_time(time_str: &str) -> Option<f64> {
    let parts: Vec<&str> = time_str.trim().split(':').collect();
    if parts.len() != 3 {
        return None;
    }

    let hours: f64 = parts[0].parse().ok()?;
    let minutes: f64 = parts[1].parse().ok()?;
    let seconds: f64 = parts[2].parse().ok()?;

    Some(hours * 3600.0 + minutes * 60.0 + seconds)
}

/// Parse time field from a stats line (e.g., "time=00:01:30.50").
pub fn parse_time_field(line: &str) -> Option<f64> {
    let time_start = line.find("time=")?;
    let time_str = &line[time_start + 5..];
    let end = time_str.find(' ').unwrap_or(time_str.len());
    parse_time(&time_str[..end])
}

/// Media time written so far, in seconds, if the line reports it.
pub fn parse_out_time(line: &str) -> Option<f64> {
    let line = line.trim();
    if let Some(value) = line.strip_prefix("out_time=") {
        return parse_time(value);
    }
    if line.starts_with("frame=") || line.starts_with("size=") {
        return parse_time_field(line);
    }
    None
}

/// Whether the line is ffmpeg's final `progress=end` marker.
pub fn is_progress_end(line: &str) -> bool {
    line.trim() == "progress=end"
}

/// Position fraction for `seconds` written out of `duration` seconds.
///
/// `None` when the duration is unknown (live sources); clamped to `0.0..=1.0`.
pub fn position_fraction(seconds: f64, duration: Option<f64>) -> Option<f32> {
    let duration = duration.filter(|d| d.is_finite() && *d > 0.0)?;
    Some((seconds / duration).clamp(0.0, 1.0) as f32)
}
