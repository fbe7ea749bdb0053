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

//! Playback elements and playback state management.
//!
//! This module defines the [`PlaybackElement`] abstraction the playlist
//! controller drives, and the MPV-backed [`MediaPlayer`] implementation of
//! it. The application owns a [`PlayerPair`] (one audio element and one
//! video element) and the controller guarantees that at most one of the two
//! is active at any time.
//!
//! [`MediaPlayer`] acts as a command proxy; it does not perform any media
//! processing itself but instead sends instructions to a background worker
//! thread that owns a libmpv context.

pub(crate) mod commands;

use std::sync::mpsc;

use anyhow::Result;

use crate::{actions::events::AppEvent, model::MediaKind, player::commands::PlayerCommand};

/// Represents the current playback status of a playback element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum PlayerState {
    Playing,
    Paused,
    Stopped,
}

// Maps the raw backend flags to a simplified [`PlayerState`].
pub(crate) fn player_state(is_paused: bool, is_idle: bool) -> PlayerState {
    if is_idle {
        PlayerState::Stopped
    } else if is_paused {
        PlayerState::Paused
    } else {
        PlayerState::Playing
    }
}

/// A host-supplied media rendering primitive.
///
/// The playlist controller manipulates elements exclusively through this
/// trait, which keeps the controller free of any backend detail and lets the
/// unit tests substitute a recording fake.
///
/// Commands are fire-and-forget: completion is reported later through
/// lifecycle events (`MetadataLoaded`, `TrackFinished`) on the application
/// event channel.
pub(crate) trait PlaybackElement {
    /// Binds a new source handle without starting playback.
    fn assign_source(&mut self, source: &str) -> Result<()>;

    /// Loads the currently assigned source, paused at position zero.
    fn load(&mut self) -> Result<()>;

    /// Resumes playback of the loaded source.
    fn play(&mut self) -> Result<()>;

    /// Pauses playback, keeping the current position.
    fn pause(&mut self) -> Result<()>;

    /// Seeks to an absolute position in seconds.
    fn set_position(&mut self, seconds: f64) -> Result<()>;

    /// Sets the volume as a normalized fraction in `[0.0, 1.0]`.
    fn set_volume(&mut self, level: f64) -> Result<()>;

    /// Shows or hides the element's visual surface.
    fn set_visible(&mut self, visible: bool) -> Result<()>;

    /// Unbinds the current source, leaving the element blank.
    fn clear_source(&mut self) -> Result<()>;
}

/// The two playback elements the application shares, one per media kind.
pub(crate) struct PlayerPair<P: PlaybackElement> {
    pub(crate) audio: P,
    pub(crate) video: P,
}

impl<P: PlaybackElement> PlayerPair<P> {
    pub(crate) fn new(audio: P, video: P) -> Self {
        Self { audio, video }
    }

    pub(crate) fn element_mut(&mut self, kind: MediaKind) -> &mut P {
        match kind {
            MediaKind::Audio => &mut self.audio,
            MediaKind::Video => &mut self.video,
        }
    }
}

/// A handle to one MPV-backed playback element.
pub(crate) struct MediaPlayer {
    /// Channel for sending commands to the background worker thread.
    command_tx: mpsc::Sender<PlayerCommand>,
    /// Source handle bound by `assign_source`, consumed by `load`.
    pending_source: Option<String>,
}

impl MediaPlayer {
    /// Spawns the playback worker thread for one media kind and returns a
    /// new element handle.
    ///
    /// # Arguments
    ///
    /// * `kind` - The media kind this element renders; the worker for
    ///   [`MediaKind::Audio`] runs without any video output.
    /// * `event_tx` - A channel for broadcasting lifecycle and progress
    ///   events back to the main event loop.
    /// * `start_volume` - The initial volume in MPV's `0..=100` range.
    pub(crate) fn new(
        kind: MediaKind,
        event_tx: mpsc::Sender<AppEvent>,
        start_volume: u32,
    ) -> Result<Self> {
        let (command_tx, command_rx) = mpsc::channel::<PlayerCommand>();

        commands::spawn_player_worker(kind, start_volume, command_rx, event_tx);

        Ok(Self {
            command_tx,
            pending_source: None,
        })
    }
}

impl PlaybackElement for MediaPlayer {
    fn assign_source(&mut self, source: &str) -> Result<()> {
        self.pending_source = Some(source.to_string());
        Ok(())
    }

    fn load(&mut self) -> Result<()> {
        if let Some(source) = &self.pending_source {
            self.command_tx.send(PlayerCommand::Load(source.clone()))?;
        }
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.command_tx.send(PlayerCommand::SetPause(false))?;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.command_tx.send(PlayerCommand::SetPause(true))?;
        Ok(())
    }

    fn set_position(&mut self, seconds: f64) -> Result<()> {
        self.command_tx.send(PlayerCommand::SeekAbsolute(seconds))?;
        Ok(())
    }

    fn set_volume(&mut self, level: f64) -> Result<()> {
        let volume = (level.clamp(0.0, 1.0) * 100.0).round();
        self.command_tx.send(PlayerCommand::SetVolume(volume))?;
        Ok(())
    }

    fn set_visible(&mut self, visible: bool) -> Result<()> {
        self.command_tx.send(PlayerCommand::SetVisible(visible))?;
        Ok(())
    }

    fn clear_source(&mut self) -> Result<()> {
        self.pending_source = None;
        self.command_tx.send(PlayerCommand::Stop)?;
        Ok(())
    }
}
