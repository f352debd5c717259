use serde::{Deserialize, Serialize};

use super::codes::{is_informational_channel, two_letter_code, LanguageCodes};
use crate::models::content::{AudioTrackInfo, ContentType, PlayableContent};

/// Audio language to request, with fallbacks in negotiation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePreference {
    pub preferred: String,
    /// Never empty; the first entry is `preferred`. May contain repeats.
    pub candidates: Vec<String>,
}

/// Resolves which audio language to request for a piece of content.
pub struct AudioTrackSelector;

impl AudioTrackSelector {
    /// Preferred audio language for `content`.
    ///
    /// Ordinary channels get the onboard sentinel. Everything else, including
    /// informational channels, gets `default_language` or English when blank.
    pub fn preferred_language(content: &dyn PlayableContent, default_language: &str) -> String {
        let onboard = content.content_type() == ContentType::Channel
            && !is_informational_channel(content.name());

        if onboard {
            return LanguageCodes::ONBOARD.to_string();
        }

        let default_language = default_language.trim();
        if default_language.is_empty() {
            LanguageCodes::ENGLISH.to_string()
        } else {
            default_language.to_string()
        }
    }

    /// Candidate codes in priority order: preferred, its short form if
    /// known, then English and its short form unless preferred is English.
    pub fn audio_languages(content: &dyn PlayableContent, default_language: &str) -> Vec<String> {
        Self::select(content, default_language).candidates
    }

    pub fn select(content: &dyn PlayableContent, default_language: &str) -> LanguagePreference {
        let preferred = Self::preferred_language(content, default_language);
        let mut candidates = vec![preferred.clone()];

        if let Some(short) = two_letter_code(&preferred) {
            candidates.push(short.to_string());
        }

        if preferred != LanguageCodes::ENGLISH {
            candidates.push(LanguageCodes::ENGLISH.to_string());
            if let Some(short) = two_letter_code(LanguageCodes::ENGLISH) {
                candidates.push(short.to_string());
            }
        }

        LanguagePreference {
            preferred,
            candidates,
        }
    }
}

/// First track matching the candidates, in candidate priority order.
///
/// Language tags are compared ASCII case-insensitively; tracks without a tag
/// never match.
pub fn select_track<'a>(
    preference: &LanguagePreference,
    tracks: &'a [AudioTrackInfo],
) -> Option<&'a AudioTrackInfo> {
    preference.candidates.iter().find_map(|candidate| {
        tracks.iter().find(|track| {
            track
                .language
                .as_deref()
                .is_some_and(|lang| lang.trim().eq_ignore_ascii_case(candidate))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::content::ContentDescriptor;

    fn track(index: usize, language: Option<&str>) -> AudioTrackInfo {
        AudioTrackInfo {
            index,
            language: language.map(str::to_string),
            title: None,
        }
    }

    #[test]
    fn data_channel_with_blank_default_uses_english() {
        let content = ContentDescriptor::channel("Data");
        let preference = AudioTrackSelector::select(&content, "");

        assert_eq!(preference.preferred, "eng");
        assert_eq!(preference.candidates, vec!["eng", "en"]);
    }

    #[test]
    fn ordinary_channel_uses_onboard_then_english() {
        let content = ContentDescriptor::channel("Main Feed");
        let preference = AudioTrackSelector::select(&content, "fr");

        assert_eq!(preference.preferred, LanguageCodes::ONBOARD);
        assert_eq!(preference.candidates, vec!["obc", "eng", "en"]);
    }

    #[test]
    fn non_channel_uses_default_then_english() {
        let content = ContentDescriptor::new(ContentType::Session, "Race");
        let preference = AudioTrackSelector::select(&content, "de");

        assert_eq!(preference.preferred, "de");
        assert_eq!(preference.candidates, vec!["de", "eng", "en"]);
    }

    #[test]
    fn full_default_code_adds_its_short_form() {
        let content = ContentDescriptor::new(ContentType::Episode, "Highlights");
        assert_eq!(
            AudioTrackSelector::audio_languages(&content, "nld"),
            vec!["nld", "nl", "eng", "en"]
        );
    }

    #[test]
    fn english_default_is_not_repeated() {
        let content = ContentDescriptor::new(ContentType::Video, "Onboard lap");
        assert_eq!(
            AudioTrackSelector::audio_languages(&content, "eng"),
            vec!["eng", "en"]
        );
    }

    #[test]
    fn informational_channels_ignore_onboard() {
        for name in ["WIF", "TRACKER", "DATA", "PIT LANE", "pit lane"] {
            let content = ContentDescriptor::channel(name);
            assert_eq!(AudioTrackSelector::preferred_language(&content, "spa"), "spa");
        }
    }

    #[test]
    fn blank_channel_name_is_an_ordinary_channel() {
        let content = ContentDescriptor::channel("");
        assert_eq!(AudioTrackSelector::preferred_language(&content, "de"), "obc");
    }

    #[test]
    fn whitespace_default_falls_back_to_english() {
        let content = ContentDescriptor::new(ContentType::Session, "Qualifying");
        assert_eq!(AudioTrackSelector::preferred_language(&content, "   "), "eng");
    }

    #[test]
    fn english_short_form_duplicates_are_kept() {
        let content = ContentDescriptor::new(ContentType::Session, "Sprint");
        assert_eq!(
            AudioTrackSelector::audio_languages(&content, "en"),
            vec!["en", "eng", "en"]
        );
    }

    #[test]
    fn select_track_follows_candidate_priority() {
        let tracks = vec![
            track(1, Some("eng")),
            track(2, None),
            track(3, Some("OBC")),
        ];
        let preference = AudioTrackSelector::select(&ContentDescriptor::channel("Main Feed"), "");

        assert_eq!(select_track(&preference, &tracks).map(|t| t.index), Some(3));
    }

    #[test]
    fn select_track_falls_back_to_short_code() {
        let tracks = vec![track(0, Some("fr")), track(1, Some("en"))];
        let preference = AudioTrackSelector::select(&ContentDescriptor::channel("Data"), "deu");

        assert_eq!(select_track(&preference, &tracks).map(|t| t.index), Some(1));
    }

    #[test]
    fn select_track_without_match() {
        let tracks = vec![track(0, Some("jpn")), track(1, None)];
        let preference = AudioTrackSelector::select(&ContentDescriptor::channel("Data"), "");

        assert!(select_track(&preference, &tracks).is_none());
        assert!(select_track(&preference, &[]).is_none());
    }
}
