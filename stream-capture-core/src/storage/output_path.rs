use std::path::{Path, PathBuf};

use crate::models::config::MuxFormat;

/// Characters that are invalid in Windows filenames.
const INVALID_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Device names Windows refuses as file stems.
const WINDOWS_RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Make `title` safe to use as a file name on Windows, Linux and macOS.
///
/// Invalid and control characters become `_` (runs collapse to one),
/// leading/trailing spaces and dots are trimmed, reserved device names
/// (`CON`, `COM1`, ...) get a `_` prefix, and an empty result becomes
/// `"recording"`.
pub fn sanitize_file_name(title: &str) -> String {
    let mut result = String::with_capacity(title.len());
    let mut last_was_replacement = false;

    for c in title.chars() {
        if c.is_control() || INVALID_CHARS.contains(&c) {
            if !last_was_replacement {
                result.push('_');
                last_was_replacement = true;
            }
        } else {
            result.push(c);
            last_was_replacement = false;
        }
    }

    let trimmed = result.trim_matches(|c| c == ' ' || c == '.');
    if trimmed.is_empty() {
        return "recording".to_string();
    }

    let upper = trimmed.to_uppercase();
    let stem = upper.split('.').next().unwrap_or(&upper);
    if WINDOWS_RESERVED_NAMES.contains(&stem.trim_end()) {
        return format!("_{}", trimmed);
    }

    trimmed.to_string()
}

/// Destination for a capture of `title` inside `output_directory`,
/// with the extension of the chosen muxer.
pub fn recording_path(output_directory: &Path, title: &str, mux: MuxFormat) -> PathBuf {
    output_directory.join(format!("{}.{}", sanitize_file_name(title), mux.extension()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_invalid_characters() {
        assert_eq!(sanitize_file_name("Race: Monaco / Onboard"), "Race_ Monaco _ Onboard");
        assert_eq!(sanitize_file_name("a??b"), "a_b");
    }

    #[test]
    fn trims_dots_and_spaces() {
        assert_eq!(sanitize_file_name("  Qualifying... "), "Qualifying");
    }

    #[test]
    fn empty_titles_get_a_default_name() {
        assert_eq!(sanitize_file_name(""), "recording");
        assert_eq!(sanitize_file_name(" . "), "recording");
    }

    #[test]
    fn prefixes_windows_device_names() {
        assert_eq!(sanitize_file_name("CON"), "_CON");
        assert_eq!(sanitize_file_name("com1.backup"), "_com1.backup");
        assert_eq!(sanitize_file_name("Console"), "Console");
        assert_eq!(
            recording_path(Path::new("/captures"), "nul", MuxFormat::Ts),
            PathBuf::from("/captures/_nul.ts")
        );
    }

    #[test]
    fn keeps_unicode() {
        assert_eq!(sanitize_file_name("Großer Preis"), "Großer Preis");
    }

    #[test]
    fn path_uses_mux_extension() {
        let path = recording_path(Path::new("/captures"), "Sprint | DATA", MuxFormat::Ts);
        assert_eq!(path, PathBuf::from("/captures/Sprint _ DATA.ts"));
    }
}
