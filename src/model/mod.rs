// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Domain models and core data structures.
//!
//! This module defines the central entities of the application: tracks,
//! media kinds and the media-type acceptance rules applied when files are
//! dropped onto the player.

pub(crate) mod playlist;

use std::path::Path;

use thiserror::Error;

/// Which of the two playback elements a track is rendered through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MediaKind {
    Audio,
    Video,
}

impl MediaKind {
    /// Maps a media type string to the element kind that plays it.
    ///
    /// This match is the entire acceptance set: `audio/mpeg`, `audio/mp3`
    /// and `video/mp4`. Anything else is rejected with a notice.
    pub(crate) fn from_media_type(media_type: &str) -> Option<Self> {
        match media_type {
            "audio/mpeg" | "audio/mp3" => Some(MediaKind::Audio),
            "video/mp4" => Some(MediaKind::Video),
            _ => None,
        }
    }
}

/// Derives the media type string for a path from its file extension.
///
/// Terminal drops carry no content-type metadata, so the extension stands in
/// for the MIME type the file would otherwise declare.
pub(crate) fn media_type_of(path: &Path) -> String {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "mp3" => "audio/mpeg".to_string(),
        "mp4" => "video/mp4".to_string(),
        "" => "application/octet-stream".to_string(),
        other => format!("application/x-{}", other),
    }
}

/// One ingested playable item.
///
/// The `source` is the locally-resolvable handle bound to a playback element
/// when the track is loaded. Tracks are owned exclusively by the playlist.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Track {
    pub(crate) title: String,
    pub(crate) source: String,
    pub(crate) kind: MediaKind,
}

impl Track {
    pub(crate) fn new(title: String, source: String, kind: MediaKind) -> Self {
        Self {
            title,
            source,
            kind,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum IngestError {
    #[error("'{path}' rejected: unsupported media type '{media_type}', drop MP3 or MP4 files")]
    UnsupportedMediaType { path: String, media_type: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mp3_maps_to_audio() {
        let media_type = media_type_of(Path::new("/music/a.mp3"));
        assert_eq!(media_type, "audio/mpeg");
        assert_eq!(
            MediaKind::from_media_type(&media_type),
            Some(MediaKind::Audio)
        );
    }

    #[test]
    fn legacy_mp3_media_type_accepted() {
        assert_eq!(
            MediaKind::from_media_type("audio/mp3"),
            Some(MediaKind::Audio)
        );
    }

    #[test]
    fn mp4_maps_to_video() {
        let media_type = media_type_of(Path::new("clip.MP4"));
        assert_eq!(media_type, "video/mp4");
        assert_eq!(
            MediaKind::from_media_type(&media_type),
            Some(MediaKind::Video)
        );
    }

    #[test]
    fn executable_rejected() {
        let media_type = media_type_of(Path::new("b.exe"));
        assert_eq!(media_type, "application/x-exe");
        assert_eq!(MediaKind::from_media_type(&media_type), None);
    }

    #[test]
    fn extensionless_rejected() {
        let media_type = media_type_of(Path::new("README"));
        assert_eq!(MediaKind::from_media_type(&media_type), None);
    }
}
