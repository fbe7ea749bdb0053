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

//! Application event distribution and orchestration.
//!
//! This module defines the central event-handling logic for the application,
//! bridging the gap between user input (keyboard and pasted drops),
//! background worker updates (ingestion, the playback elements), and the UI
//! rendering pipeline.
//!
//! # Architecture
//!
//! The system follows a reactive event-loop pattern:
//!
//! 1. **Capture**: Events are received via the [`AppEvent`] enum through an
//!    asynchronous channel.
//! 2. **Process**: The [`process_events`] function updates the [`App`]
//!    state, drives the playlist controller, and dispatches commands to the
//!    background workers.
//! 3. **Render**: After each event is processed, the UI is re-drawn using
//!    the `ratatui` terminal, which re-derives the playing-row highlight
//!    from the playlist cursor.
//!
//! All state transitions happen inside this single loop; one event is
//! handled to completion before the next begins, so the playlist controller
//! needs no locking.

use std::io::Stdout;

use anyhow::{Result, bail};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{
    App,
    actions::commands::AppCommand,
    components::PlaylistAction,
    model::{MediaKind, Track},
    player::PlayerState,
    render::draw,
};

const VOLUME_STEP: f64 = 0.05;

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),

    /// Paths delivered by a terminal drag-and-drop (bracketed paste).
    PathsDropped(Vec<String>),
    /// Accepted tracks resolved by the ingest worker, in input order.
    TracksIngested(Vec<Track>),

    /// Load and play the track at this playlist index.
    ActivateTrack(usize),
    DeleteTrack(usize),
    DeleteAll,

    SetRepeat(bool),
    SetVolumeLevel(f64),
    ToggleListVisibility,

    MetadataLoaded(MediaKind),
    TrackFinished(MediaKind),
    PlayerStateChanged(MediaKind, PlayerState),
    TimeChanged(MediaKind, f64),
    DurationChanged(MediaKind, u64),
    VolumeChanged(MediaKind, u32),

    Tick,

    ExitApplication,

    /// A user-facing notice shown on the status line, e.g. a rejected drop.
    Notice(String),
    Error(String),
    FatalError(String),
}

/// Runs the main application loop, handling events and rendering the UI in
/// the terminal.
///
/// This function loops until a 'quit' event is received or the event channel
/// is closed.
///
/// # Errors
///
/// Returns an error if a playback worker reports a fatal failure or if
/// rendering fails.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    while let Ok(event) = app.event_rx.recv() {
        if matches!(event, AppEvent::ExitApplication) {
            break;
        }

        match event {
            AppEvent::Key(key) => process_key_event(app, key)?,

            AppEvent::PathsDropped(paths) => {
                app.command_tx.send(AppCommand::IngestPaths(paths))?;
            }
            AppEvent::TracksIngested(tracks) => {
                app.notice = Some(format!("Added {} track(s)", tracks.len()));
                app.playlist.add_tracks(tracks);
            }

            AppEvent::ActivateTrack(index) => {
                app.playlist.load_track(index, &mut app.players)?;
                app.playlist.play(&mut app.players)?;
            }
            AppEvent::DeleteTrack(index) => {
                app.playlist.delete_track(index, &mut app.players)?;
                app.playlist_view.clamp_selection(app.playlist.len());
            }
            AppEvent::DeleteAll => {
                app.playlist.delete_all(&mut app.players)?;
                app.playlist_view.clamp_selection(0);
                app.player_time = None;
                app.player_duration = None;
                app.player_position = None;
            }

            AppEvent::SetRepeat(repeating) => app.playlist.set_repeat(repeating),
            AppEvent::SetVolumeLevel(level) => {
                app.volume_level = level.clamp(0.0, 1.0);
                app.playlist.set_volume(app.volume_level, &mut app.players)?;
            }
            AppEvent::ToggleListVisibility => app.show_list = !app.show_list,

            // Playback element lifecycle; events from whichever element is
            // not active are stale and dropped.
            AppEvent::MetadataLoaded(kind) => {
                app.playlist.on_metadata_loaded(kind, &mut app.players)?;
            }
            AppEvent::TrackFinished(kind) => {
                app.player_time = app.player_duration;
                app.playlist.on_track_ended(kind, &mut app.players)?;
            }
            AppEvent::PlayerStateChanged(kind, state) => {
                if app.playlist.active_kind() == Some(kind) {
                    app.player_state = state;
                }
            }
            AppEvent::DurationChanged(kind, duration) => {
                if app.playlist.active_kind() == Some(kind) {
                    app.player_duration = Some(duration);
                }
            }
            AppEvent::TimeChanged(kind, seconds) => {
                if app.playlist.active_kind() == Some(kind) {
                    app.player_time = Some(seconds as u64);
                    if let Some(duration) = app.player_duration {
                        app.player_position = if duration > 0 {
                            Some(seconds / duration as f64)
                        } else {
                            None
                        };
                    }
                }
            }
            AppEvent::VolumeChanged(kind, volume) => {
                if app.playlist.active_kind() == Some(kind) {
                    app.volume = Some(volume);
                }
            }

            AppEvent::Notice(notice) => app.notice = Some(notice),
            AppEvent::Error(message) => app.notice = Some(message),
            AppEvent::FatalError(message) => bail!(message),

            AppEvent::Tick => {}

            AppEvent::ExitApplication => {}
        }

        // Render after every event processed
        terminal.draw(|f| draw(f, app))?;
    }

    Ok(())
}

/// Maps keyboard input to playlist and playback commands.
///
/// Routing order follows the focus discipline: the commander swallows input
/// while it is active, then the playlist view gets a chance to act on
/// selection keys, and finally the global transport bindings apply.
fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    let handled = app.commander.handle_key(key, &mut app.command_tx);
    if handled {
        return Ok(());
    }

    if app.show_list {
        if let Some(action) = app.playlist_view.process_key(key, app.playlist.len()) {
            match action {
                PlaylistAction::Activate(index) => {
                    app.event_tx.send(AppEvent::ActivateTrack(index))?;
                }
                PlaylistAction::Delete(index) => {
                    app.event_tx.send(AppEvent::DeleteTrack(index))?;
                }
            }
            return Ok(());
        }
    }

    process_global_key_event(app, key)
}

fn process_global_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('q') => {
            app.event_tx.send(AppEvent::ExitApplication)?;
        }

        // Transport
        KeyCode::Char(' ') => {
            if app.playlist.is_playing() {
                app.playlist.pause(&mut app.players)?;
            } else {
                app.playlist.play(&mut app.players)?;
            }
        }
        KeyCode::Char('s') => app.playlist.stop(&mut app.players)?,
        KeyCode::Char('n') => app.playlist.next(&mut app.players)?,
        KeyCode::Char('b') => app.playlist.previous(&mut app.players)?,
        KeyCode::Char('r') => {
            let repeating = !app.playlist.is_repeating();
            app.playlist.set_repeat(repeating);
        }
        KeyCode::Char('a') => app.playlist.play_all(&mut app.players)?,
        KeyCode::Char('x') => app.playlist.play_random(&mut app.players)?,

        // List management
        KeyCode::Char('D') => app.command_tx.send(AppCommand::DeleteAll)?,
        KeyCode::Char('v') => app.command_tx.send(AppCommand::ToggleListVisibility)?,

        // Volume
        KeyCode::Char('-') => {
            let level = (app.volume_level - VOLUME_STEP).clamp(0.0, 1.0);
            app.command_tx.send(AppCommand::SetVolume(level))?;
        }
        KeyCode::Char('=') | KeyCode::Char('+') => {
            let level = (app.volume_level + VOLUME_STEP).clamp(0.0, 1.0);
            app.command_tx.send(AppCommand::SetVolume(level))?;
        }

        _ => {}
    }

    Ok(())
}
