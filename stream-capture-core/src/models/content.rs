use serde::{Deserialize, Serialize};

/// Kind of playable content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// A live feed inside a session (main feed, onboard camera, data feed...).
    Channel,
    Session,
    Episode,
    Video,
}

/// Read-only view of something that can be played or captured.
pub trait PlayableContent {
    fn content_type(&self) -> ContentType;

    /// Display name; for channels this is the channel name (e.g. "DATA").
    fn name(&self) -> &str;
}

/// Plain content descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDescriptor {
    pub content_type: ContentType,
    pub name: String,
}

impl ContentDescriptor {
    pub fn new(content_type: ContentType, name: impl Into<String>) -> Self {
        Self {
            content_type,
            name: name.into(),
        }
    }

    pub fn channel(name: impl Into<String>) -> Self {
        Self::new(ContentType::Channel, name)
    }
}

impl PlayableContent for ContentDescriptor {
    fn content_type(&self) -> ContentType {
        self.content_type
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// An audio track offered by a stream source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioTrackInfo {
    /// Engine-side track/stream index.
    pub index: usize,
    pub language: Option<String>,
    pub title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_exposes_kind_and_name() {
        let content = ContentDescriptor::channel("PIT LANE");
        assert_eq!(content.content_type(), ContentType::Channel);
        assert_eq!(content.name(), "PIT LANE");
    }
}
