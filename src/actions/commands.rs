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

//! Asynchronous application command processing.
//!
//! This module implements the command pattern used to offload potentially
//! blocking work from the main UI thread, chiefly the ingestion of dropped
//! paths, which probes each file's tags on disk. It provides a dedicated
//! worker loop that translates [`AppCommand`] requests into operations and
//! broadcasts the results back to the application via [`AppEvent`]s.
//!
//! # Ingestion
//!
//! Every dropped path is screened by its media type: only `audio/mpeg`,
//! `audio/mp3` and `video/mp4` are accepted. A rejected file surfaces a
//! notice and never blocks acceptance of the files that follow it. Dropped
//! directories are expanded to the supported files they contain, in walk
//! order.

use anyhow::Result;
use lofty::prelude::*;
use lofty::probe::Probe;
use std::{
    path::Path,
    sync::mpsc::{Receiver, Sender},
    thread,
};
use walkdir::WalkDir;

use crate::{
    actions::events::AppEvent,
    model::{self, IngestError, MediaKind, Track},
};

#[derive(Debug)]
pub(crate) enum AppCommand {
    IngestPaths(Vec<String>),

    DeleteAll,
    SetRepeat(bool),
    SetVolume(f64),
    ToggleListVisibility,

    ExitApplication,
}

/// Spawns a background thread to process application commands.
///
/// The worker enters a blocking loop, listening for incoming
/// [`AppCommand`]s until the sending side of the channel is dropped.
///
/// # Arguments
///
/// * `command_rx` - The receiving end of the command channel.
/// * `event_tx` - The sending end of the channel for broadcasting results.
pub(crate) fn spawn_command_worker(command_rx: Receiver<AppCommand>, event_tx: Sender<AppEvent>) {
    thread::spawn(move || {
        while let Ok(request) = command_rx.recv() {
            if let Err(e) = handle_command(request, &event_tx) {
                let _ = event_tx.send(AppEvent::Error(e.to_string()));
            }
        }
    });
}

/// Orchestrates the execution of a single command.
///
/// Ingestion is performed here on the worker thread; the purely UI-facing
/// commands are forwarded to the event loop unchanged.
fn handle_command(command: AppCommand, event_tx: &Sender<AppEvent>) -> Result<()> {
    match command {
        AppCommand::IngestPaths(paths) => {
            ingest_paths(&paths, event_tx)?;
        }
        AppCommand::DeleteAll => {
            event_tx.send(AppEvent::DeleteAll)?;
        }
        AppCommand::SetRepeat(repeating) => {
            event_tx.send(AppEvent::SetRepeat(repeating))?;
        }
        AppCommand::SetVolume(level) => {
            event_tx.send(AppEvent::SetVolumeLevel(level))?;
        }
        AppCommand::ToggleListVisibility => {
            event_tx.send(AppEvent::ToggleListVisibility)?;
        }
        AppCommand::ExitApplication => {
            event_tx.send(AppEvent::ExitApplication)?;
        }
    }

    Ok(())
}

/// Resolves a batch of dropped paths into playlist tracks.
///
/// Acceptance follows input order. Rejections are reported as notices as
/// they occur; the accepted tracks are delivered in a single batch at the
/// end so the playlist grows atomically per drop.
fn ingest_paths(paths: &[String], event_tx: &Sender<AppEvent>) -> Result<()> {
    let mut accepted = Vec::new();

    for raw in paths {
        let path = Path::new(raw.trim());
        if path.as_os_str().is_empty() {
            continue;
        }

        if path.is_dir() {
            // A dropped folder contributes only its supported files;
            // everything else inside it is skipped without a notice.
            for entry in WalkDir::new(path)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
            {
                if let Ok(track) = track_for_path(entry.path()) {
                    accepted.push(track);
                }
            }
        } else {
            match track_for_path(path) {
                Ok(track) => accepted.push(track),
                Err(e) => event_tx.send(AppEvent::Notice(e.to_string()))?,
            }
        }
    }

    if !accepted.is_empty() {
        event_tx.send(AppEvent::TracksIngested(accepted))?;
    }

    Ok(())
}

/// Screens one path against the accepted media types and builds its track.
///
/// The track title comes from the file's tags when present, falling back to
/// the file name.
fn track_for_path(path: &Path) -> Result<Track, IngestError> {
    let media_type = model::media_type_of(path);

    let Some(kind) = MediaKind::from_media_type(&media_type) else {
        return Err(IngestError::UnsupportedMediaType {
            path: path.display().to_string(),
            media_type,
        });
    };

    let title = probe_title(path).unwrap_or_else(|| {
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    });

    Ok(Track::new(title, path.to_string_lossy().into_owned(), kind))
}

// Reads the title tag, if the file has one.
fn probe_title(path: &Path) -> Option<String> {
    let tagged_file = Probe::open(path).and_then(|p| p.read()).ok()?;
    let tag = tagged_file.primary_tag().or_else(|| tagged_file.first_tag())?;
    tag.title().map(|title| title.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn mp3_path_accepted_as_audio() {
        let track = track_for_path(Path::new("/music/song.mp3")).unwrap();
        assert_eq!(track.kind, MediaKind::Audio);
        assert_eq!(track.source, "/music/song.mp3");
        // No file on disk, so the title falls back to the file name.
        assert_eq!(track.title, "song.mp3");
    }

    #[test]
    fn mp4_path_accepted_as_video() {
        let track = track_for_path(Path::new("clip.mp4")).unwrap();
        assert_eq!(track.kind, MediaKind::Video);
    }

    #[test]
    fn unsupported_path_rejected() {
        let err = track_for_path(Path::new("b.exe")).unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedMediaType { .. }));
    }

    #[test]
    fn mixed_drop_accepts_supported_files_and_notices_the_rest() {
        let (event_tx, event_rx) = mpsc::channel();
        let paths = vec![
            "a.mp3".to_string(),
            "b.exe".to_string(),
            "c.mp4".to_string(),
        ];

        ingest_paths(&paths, &event_tx).unwrap();
        drop(event_tx);

        let events: Vec<AppEvent> = event_rx.iter().collect();
        assert_eq!(events.len(), 2);

        match &events[0] {
            AppEvent::Notice(notice) => assert!(notice.contains("b.exe")),
            other => panic!("expected a notice, got {:?}", other),
        }
        match &events[1] {
            AppEvent::TracksIngested(tracks) => {
                let sources: Vec<&str> = tracks.iter().map(|t| t.source.as_str()).collect();
                assert_eq!(sources, vec!["a.mp3", "c.mp4"]);
            }
            other => panic!("expected ingested tracks, got {:?}", other),
        }
    }

    #[test]
    fn empty_and_blank_paths_are_skipped() {
        let (event_tx, event_rx) = mpsc::channel();
        ingest_paths(&["".to_string(), "   ".to_string()], &event_tx).unwrap();
        drop(event_tx);
        assert_eq!(event_rx.iter().count(), 0);
    }
}
