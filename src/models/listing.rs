//! Wire types for the gallery listing service.
//!
//! A `Listing` is the complete state of one gallery path as reported by the
//! backend: sub-directories, images, videos, and the video conversion formats
//! the backend can serve. Field names on the wire are camelCase; every fetch
//! replaces the previous listing wholesale, so these types stay immutable
//! once deserialized.

use serde::Deserialize;

/// A sub-directory entry in the listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Directory {
    /// Display name of the directory.
    pub name: String,
    /// Listing URL for this directory, fed back into the next fetch.
    pub path: String,
}

/// A single image or video entry.
///
/// `media_path` is a URL template: `{width}`/`{height}` for images,
/// `{conversionFormat}` for videos. Token resolution happens in
/// [`crate::templates`]; an item without a media path resolves to an empty
/// URL rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaItem {
    pub media_path: Option<String>,
    pub filename: Option<String>,
    pub content_type: Option<String>,
}

impl MediaItem {
    /// Item with only a media path, the common case in fixtures.
    pub fn with_path(media_path: impl Into<String>) -> Self {
        Self {
            media_path: Some(media_path.into()),
            ..Self::default()
        }
    }
}

/// Complete listing for one gallery path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Listing {
    pub directories: Vec<Directory>,
    pub images: Vec<MediaItem>,
    pub videos: Vec<MediaItem>,
    /// Listing URL of the parent path; absent at a gallery root.
    pub previous_path: Option<String>,
    /// Human-readable form of the current path; absent at a gallery root.
    pub current_path_display: Option<String>,
    /// Conversion formats the backend can serve videos in, in server
    /// preference order.
    pub video_formats: Vec<String>,
}
