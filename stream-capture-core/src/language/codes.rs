//! Well-known audio language codes and channel names.
//!
//! Stream sources label audio tracks with ISO 639-2 codes; some players only
//! match the ISO 639-1 short form, so both are offered as candidates.

/// Language code constants.
pub struct LanguageCodes;

impl LanguageCodes {
    pub const ENGLISH: &'static str = "eng";

    /// Onboard/team radio audio. Not an ISO code; stream sources use it to
    /// label the in-car track. Has no two-letter form.
    pub const ONBOARD: &'static str = "obc";
}

/// Channels carrying no commentary of their own (world feed, tracker,
/// data, pit lane). They play normal spoken-language audio.
pub const INFORMATIONAL_CHANNELS: &[&str] = &["WIF", "TRACKER", "DATA", "PIT LANE"];

/// ISO 639-2 code, ISO 639-1 code, English name.
const LANGUAGES: &[(&str, &str, &str)] = &[
    ("eng", "en", "English"),
    ("deu", "de", "German"),
    ("ger", "de", "German"),
    ("fra", "fr", "French"),
    ("fre", "fr", "French"),
    ("spa", "es", "Spanish"),
    ("nld", "nl", "Dutch"),
    ("dut", "nl", "Dutch"),
    ("por", "pt", "Portuguese"),
    ("ita", "it", "Italian"),
    ("jpn", "ja", "Japanese"),
    ("zho", "zh", "Chinese"),
    ("chi", "zh", "Chinese"),
    ("kor", "ko", "Korean"),
    ("rus", "ru", "Russian"),
    ("pol", "pl", "Polish"),
    ("hun", "hu", "Hungarian"),
    ("fin", "fi", "Finnish"),
    ("swe", "sv", "Swedish"),
    ("dan", "da", "Danish"),
    ("nor", "no", "Norwegian"),
    ("ara", "ar", "Arabic"),
    ("tur", "tr", "Turkish"),
];

fn lookup(code: &str) -> Option<&'static (&'static str, &'static str, &'static str)> {
    let code = code.trim();
    LANGUAGES
        .iter()
        .find(|(full, _, _)| full.eq_ignore_ascii_case(code))
}

/// Two-letter short code for a full language code, if one exists.
///
/// Only full codes are mapped: `two_letter_code("deu") == Some("de")`, while
/// `"de"`, sentinels like `"obc"` and unknown codes yield `None`.
pub fn two_letter_code(code: &str) -> Option<&'static str> {
    lookup(code).map(|(_, short, _)| *short)
}

/// English display name for a full code (`"Onboard"` for the sentinel).
pub fn language_name(code: &str) -> Option<&'static str> {
    if code.trim().eq_ignore_ascii_case(LanguageCodes::ONBOARD) {
        return Some("Onboard");
    }
    lookup(code).map(|(_, _, name)| *name)
}

pub fn is_informational_channel(name: &str) -> bool {
    let name = name.trim();
    INFORMATIONAL_CHANNELS
        .iter()
        .any(|channel| channel.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_maps_to_en() {
        assert_eq!(two_letter_code(LanguageCodes::ENGLISH), Some("en"));
        assert_eq!(two_letter_code("ENG"), Some("en"));
    }

    #[test]
    fn bibliographic_variants_share_short_code() {
        assert_eq!(two_letter_code("ger"), two_letter_code("deu"));
        assert_eq!(two_letter_code("fre"), Some("fr"));
    }

    #[test]
    fn sentinels_and_short_codes_have_no_mapping() {
        assert_eq!(two_letter_code(LanguageCodes::ONBOARD), None);
        assert_eq!(two_letter_code("de"), None);
        assert_eq!(two_letter_code(""), None);
        assert_eq!(two_letter_code("xyz"), None);
    }

    #[test]
    fn names() {
        assert_eq!(language_name("nld"), Some("Dutch"));
        assert_eq!(language_name("obc"), Some("Onboard"));
        assert_eq!(language_name("zzz"), None);
    }

    #[test]
    fn informational_channels_match_case_insensitively() {
        assert!(is_informational_channel("Data"));
        assert!(is_informational_channel("pit lane"));
        assert!(is_informational_channel(" WIF "));
        assert!(is_informational_channel("Tracker"));
        assert!(!is_informational_channel("Main Feed"));
        assert!(!is_informational_channel(""));
    }
}
