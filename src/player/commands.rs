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

//! MPV-backed playback worker and event processing.
//!
//! This module hosts the worker thread behind each [`MediaPlayer`] element,
//! leveraging `libmpv` for media decoding and rendering. Two workers run per
//! application session: the audio worker is built with a null video output,
//! while the video worker owns an MPV window whose video track is toggled by
//! the element's visibility.
//!
//! # Architecture
//!
//! Each worker operates a dual-channel communication pattern:
//! 1. **Command Channel**: Receives [`PlayerCommand`]s from the element
//!    handle on the main thread.
//! 2. **Event Channel**: Broadcasts [`AppEvent`]s tagged with the worker's
//!    media kind, so the event loop can discard events from whichever
//!    element is not currently active.

use anyhow::{Context, Result};
use mpv::Format;
use std::{
    sync::mpsc::{self, Receiver, Sender},
    thread,
};

use crate::{
    actions::events::AppEvent,
    model::MediaKind,
    player::{self, PlayerState},
};

#[derive(Debug)]
pub(crate) enum PlayerCommand {
    /// Replace the current source and hold paused at position zero.
    Load(String),
    SetPause(bool),
    SeekAbsolute(f64),
    SetVolume(f64),
    SetVisible(bool),
    /// Unload the current source entirely.
    Stop,
}

/// Spawns the playback worker thread for one media kind.
///
/// This function takes ownership of the command receiver and the event
/// sender, moving them into a dedicated background thread. A fatal event is
/// broadcast only when the worker itself dies, in practice when the MPV
/// context fails to initialize; failures of individual commands are
/// reported as ordinary error notices and the worker keeps running.
pub(crate) fn spawn_player_worker(
    kind: MediaKind,
    start_volume: u32,
    command_rx: Receiver<PlayerCommand>,
    event_tx: Sender<AppEvent>,
) {
    let error_tx = event_tx.clone();

    thread::spawn(move || {
        if let Err(e) = player_worker(kind, start_volume, command_rx, event_tx) {
            let _ = error_tx.send(AppEvent::FatalError(format!(
                "MPV worker failure ({:?}): {:?}",
                kind, e
            )));
        }
    });
}

/// The primary execution loop for one playback element backend.
///
/// Initializes a local `libmpv` context configured for the worker's media
/// kind, then alternates between draining pending commands and polling MPV
/// for lifecycle events.
///
/// # Errors
///
/// Returns an error if the MPV context fails to initialize or if the
/// command/event loops encounter an unrecoverable failure.
fn player_worker(
    kind: MediaKind,
    start_volume: u32,
    command_rx: Receiver<PlayerCommand>,
    event_tx: Sender<AppEvent>,
) -> Result<()> {
    let mut handler = (|| {
        let mut builder = mpv::MpvHandlerBuilder::new().context("Failed to create MPV builder")?;
        if kind == MediaKind::Audio {
            builder
                .set_option("vo", "null")
                .context("Failed to set no video output")?;
        }
        builder
            .set_option("volume", start_volume as f64)
            .context("Failed to set initial volume")?;
        builder.build().context("Failed to build MPV handler")
    })()?;

    handler
        .observe_property::<f64>("duration", 0)
        .context("Failed to observe duration")?;
    handler
        .observe_property::<bool>("pause", 0)
        .context("Failed to observe pause")?;
    handler
        .observe_property::<f64>("time-pos", 0)
        .context("Failed to observe time-pos")?;
    handler
        .observe_property::<f64>("volume", 0)
        .context("Failed to observe volume")?;
    handler
        .observe_property::<bool>("idle-active", 0)
        .context("Failed to observe idle-active")?;

    let mut is_paused = false;
    let mut is_idle = true;

    let mut player_state = PlayerState::Stopped;

    loop {
        process_commands(kind, &mut handler, &command_rx, &event_tx)?;
        process_mpv_events(
            kind,
            &mut handler,
            &mut is_paused,
            &mut is_idle,
            &mut player_state,
            &event_tx,
        )?;
    }
}

/// Drains and executes all pending commands from the element handle.
///
/// A command can legitimately fail against the current MPV state, e.g. a
/// seek arriving after the context has gone idle at end of file. Such
/// failures surface as an error notice and never tear the worker down.
fn process_commands(
    kind: MediaKind,
    handler: &mut mpv::MpvHandler,
    command_rx: &mpsc::Receiver<PlayerCommand>,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<()> {
    while let Ok(command) = command_rx.try_recv() {
        if let Err(e) = run_command(kind, handler, command) {
            event_tx
                .send(AppEvent::Error(format!("Playback command failed: {:#}", e)))
                .context("Failed to send error event")?;
        }
    }

    Ok(())
}

fn run_command(
    kind: MediaKind,
    handler: &mut mpv::MpvHandler,
    command: PlayerCommand,
) -> Result<()> {
    match command {
        PlayerCommand::Load(source) => {
            handler
                .command(&["loadfile", &source, "replace"])
                .context(format!("Failed to load source: {}", &source))?;
            handler.set_property("pause", true)?;
        }
        PlayerCommand::SetPause(paused) => {
            handler.set_property("pause", paused)?;
        }
        PlayerCommand::SeekAbsolute(seconds) => {
            handler.command(&["seek", &seconds.to_string(), "absolute"])?;
        }
        PlayerCommand::SetVolume(volume) => {
            handler.set_property("volume", volume)?;
        }
        PlayerCommand::SetVisible(visible) => {
            // Only the video worker has a surface to show or hide; the
            // audio worker was built with a null video output.
            if kind == MediaKind::Video {
                handler.set_property("vid", if visible { "auto" } else { "no" })?;
            }
        }
        PlayerCommand::Stop => {
            handler.command(&["stop"])?;
        }
    }

    Ok(())
}

/// Polls for MPV events and synchronizes the application state.
///
/// Waits for up to 50ms for an event from the MPV context. If an event
/// occurs, internal flags are updated and any necessary [`AppEvent`]s are
/// broadcast to the UI, tagged with this worker's media kind.
fn process_mpv_events(
    kind: MediaKind,
    handler: &mut mpv::MpvHandler,
    is_paused: &mut bool,
    is_idle: &mut bool,
    current_state: &mut PlayerState,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<()> {
    if let Some(mpv_event) = handler.wait_event(0.05) {
        let app_event = match mpv_event {
            mpv::Event::PropertyChange { name, change, .. } => match (name, change) {
                ("duration", Format::Double(duration)) => {
                    Some(AppEvent::DurationChanged(kind, duration as u64))
                }
                ("pause", Format::Flag(pause)) => {
                    *is_paused = pause;
                    None
                }
                ("time-pos", Format::Double(seconds)) if seconds >= 0.0 => {
                    Some(AppEvent::TimeChanged(kind, seconds))
                }
                ("volume", Format::Double(volume)) => {
                    Some(AppEvent::VolumeChanged(kind, volume.round() as u32))
                }
                ("idle-active", Format::Flag(idle_active)) => {
                    *is_idle = idle_active;
                    None
                }
                _ => None,
            },
            // The closest analogue of a media element's `loadedmetadata`.
            mpv::Event::FileLoaded => Some(AppEvent::MetadataLoaded(kind)),
            mpv::Event::EndFile(result) => {
                if let Ok(reason) = result {
                    match reason {
                        mpv::EndFileReason::MPV_END_FILE_REASON_EOF => {
                            Some(AppEvent::TrackFinished(kind))
                        }
                        _ => None,
                    }
                } else {
                    None
                }
            }
            _ => None,
        };

        let new_player_state = player::player_state(*is_paused, *is_idle);

        if new_player_state != *current_state {
            *current_state = new_player_state;
            event_tx
                .send(AppEvent::PlayerStateChanged(kind, new_player_state))
                .context("Failed to send player state event")?;
        }

        if let Some(event) = app_event {
            event_tx.send(event).context("Failed to send event")?;
        }
    }

    Ok(())
}
