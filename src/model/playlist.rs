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

//! Playlist state and playback control.
//!
//! This module is the heart of the application: a [`Playlist`] owns the
//! ordered track list, the cursor, the repeat flag and the active-player
//! state, and mediates every transport command and every playback lifecycle
//! event. It performs no I/O of its own; all effects on the outside world go
//! through the [`PlaybackElement`] pair passed into each operation, which is
//! what makes the whole state machine testable without a rendered view or a
//! real media backend.
//!
//! # Invariants
//!
//! * Indices are dense `0..len` after any mutation; deletion compacts.
//! * At most one playback element is active at a time, enforced by
//!   [`Playlist::activate`], the single transition function over
//!   [`ActivePlayer`].
//! * The cursor is a valid index whenever a player is active; an empty list
//!   implies [`ActivePlayer::None`].
//! * Index-based commands with an out-of-range index are silent no-ops,
//!   never errors.

use anyhow::Result;
use rand::RngExt;

use crate::{
    model::{MediaKind, Track},
    player::{PlaybackElement, PlayerPair},
};

/// Which playback element currently holds a bound source, if any.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ActivePlayer {
    None,
    Audio(String),
    Video(String),
}

impl ActivePlayer {
    fn for_track(track: &Track) -> Self {
        match track.kind {
            MediaKind::Audio => ActivePlayer::Audio(track.source.clone()),
            MediaKind::Video => ActivePlayer::Video(track.source.clone()),
        }
    }

    pub(crate) fn kind(&self) -> Option<MediaKind> {
        match self {
            ActivePlayer::None => None,
            ActivePlayer::Audio(_) => Some(MediaKind::Audio),
            ActivePlayer::Video(_) => Some(MediaKind::Video),
        }
    }

    fn source(&self) -> Option<&str> {
        match self {
            ActivePlayer::None => None,
            ActivePlayer::Audio(source) | ActivePlayer::Video(source) => Some(source),
        }
    }
}

/// The play-all sweep, driven forward one step per `ended` event.
///
/// Modelled as an explicit state machine rather than chained one-shot
/// callbacks, so the end-of-list condition is a single check in
/// [`Playlist::on_track_ended`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum PlayAll {
    Stopped,
    PlayingIndex(usize),
}

/// The playlist and its playback state.
pub(crate) struct Playlist {
    tracks: Vec<Track>,
    current_index: usize,
    active: ActivePlayer,
    is_repeating: bool,
    is_playing: bool,
    play_all: PlayAll,
}

impl Playlist {
    pub(crate) fn new() -> Self {
        Self {
            tracks: vec![],
            current_index: 0,
            active: ActivePlayer::None,
            is_repeating: false,
            is_playing: false,
            play_all: PlayAll::Stopped,
        }
    }

    pub(crate) fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub(crate) fn len(&self) -> usize {
        self.tracks.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// The row the view should highlight as "playing". Exactly one row for a
    /// non-empty list; the view re-derives this on every render.
    pub(crate) fn playing_index(&self) -> Option<usize> {
        if self.tracks.is_empty() {
            None
        } else {
            Some(self.current_index)
        }
    }

    pub(crate) fn current(&self) -> Option<&Track> {
        self.tracks.get(self.current_index)
    }

    pub(crate) fn active_kind(&self) -> Option<MediaKind> {
        self.active.kind()
    }

    pub(crate) fn is_repeating(&self) -> bool {
        self.is_repeating
    }

    pub(crate) fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Appends accepted tracks, preserving their input order.
    pub(crate) fn add_tracks(&mut self, tracks: Vec<Track>) {
        self.tracks.extend(tracks);
    }

    /// Takes effect at the next `ended` event, nothing happens immediately.
    pub(crate) fn set_repeat(&mut self, repeating: bool) {
        self.is_repeating = repeating;
    }

    /// Loads the track at `index` without starting playback.
    ///
    /// Any explicit selection ends a play-all sweep in progress; the sweep
    /// only survives its own internal chaining.
    pub(crate) fn load_track<P: PlaybackElement>(
        &mut self,
        index: usize,
        players: &mut PlayerPair<P>,
    ) -> Result<()> {
        self.play_all = PlayAll::Stopped;
        self.load_track_at(index, players)
    }

    fn load_track_at<P: PlaybackElement>(
        &mut self,
        index: usize,
        players: &mut PlayerPair<P>,
    ) -> Result<()> {
        let Some(track) = self.tracks.get(index) else {
            return Ok(());
        };

        let target = ActivePlayer::for_track(track);
        self.current_index = index;
        self.activate(target, players)
    }

    /// The single transition function over [`ActivePlayer`].
    ///
    /// Stops and resets whichever element was active, hides it, then binds
    /// and reveals the target. Mutual exclusion of the two elements rests
    /// entirely on deactivation always preceding activation here.
    fn activate<P: PlaybackElement>(
        &mut self,
        target: ActivePlayer,
        players: &mut PlayerPair<P>,
    ) -> Result<()> {
        if let Some(kind) = self.active.kind() {
            let element = players.element_mut(kind);
            element.pause()?;
            element.set_position(0.0)?;
            element.set_visible(false)?;
        }

        if let (Some(kind), Some(source)) = (target.kind(), target.source()) {
            let element = players.element_mut(kind);
            element.set_visible(true)?;
            element.assign_source(source)?;
            element.load()?;
        }

        self.active = target;
        self.is_playing = false;
        Ok(())
    }

    /// Resumes the active element. No-op when nothing is loaded.
    pub(crate) fn play<P: PlaybackElement>(&mut self, players: &mut PlayerPair<P>) -> Result<()> {
        if let Some(kind) = self.active.kind() {
            players.element_mut(kind).play()?;
            self.is_playing = true;
        }
        Ok(())
    }

    /// Pauses the active element. No-op when nothing is loaded.
    pub(crate) fn pause<P: PlaybackElement>(&mut self, players: &mut PlayerPair<P>) -> Result<()> {
        if let Some(kind) = self.active.kind() {
            players.element_mut(kind).pause()?;
            self.is_playing = false;
        }
        Ok(())
    }

    /// Pause plus a seek back to zero. No-op when nothing is loaded.
    pub(crate) fn stop<P: PlaybackElement>(&mut self, players: &mut PlayerPair<P>) -> Result<()> {
        if let Some(kind) = self.active.kind() {
            let element = players.element_mut(kind);
            element.pause()?;
            element.set_position(0.0)?;
            self.is_playing = false;
        }
        Ok(())
    }

    /// Loads and plays the next track, treating the list as circular.
    pub(crate) fn next<P: PlaybackElement>(&mut self, players: &mut PlayerPair<P>) -> Result<()> {
        if self.tracks.is_empty() {
            return Ok(());
        }
        let index = (self.current_index + 1) % self.tracks.len();
        self.load_track(index, players)?;
        self.play(players)
    }

    /// Loads and plays the previous track, treating the list as circular.
    pub(crate) fn previous<P: PlaybackElement>(
        &mut self,
        players: &mut PlayerPair<P>,
    ) -> Result<()> {
        if self.tracks.is_empty() {
            return Ok(());
        }
        let index = (self.current_index + self.tracks.len() - 1) % self.tracks.len();
        self.load_track(index, players)?;
        self.play(players)
    }

    /// Starts a sweep over the whole list from index zero.
    ///
    /// The sweep chains forward on each `ended` event and terminates at the
    /// end of the list with the cursor reset to zero. Unlike plain
    /// advancement it neither wraps around nor honors the repeat flag.
    pub(crate) fn play_all<P: PlaybackElement>(
        &mut self,
        players: &mut PlayerPair<P>,
    ) -> Result<()> {
        if self.tracks.is_empty() {
            return Ok(());
        }
        self.load_track_at(0, players)?;
        self.play_all = PlayAll::PlayingIndex(0);
        self.play(players)
    }

    /// Loads and plays a uniformly random track. No-op on an empty list.
    pub(crate) fn play_random<P: PlaybackElement>(
        &mut self,
        players: &mut PlayerPair<P>,
    ) -> Result<()> {
        if self.tracks.is_empty() {
            return Ok(());
        }
        let index = rand::rng().random_range(0..self.tracks.len());
        self.load_track(index, players)?;
        self.play(players)
    }

    /// Removes one track and compacts the list.
    ///
    /// If the removed track was the active one, the active element is
    /// stopped and blanked. Otherwise the cursor keeps referring to the same
    /// track it did before, shifting its index if necessary.
    pub(crate) fn delete_track<P: PlaybackElement>(
        &mut self,
        index: usize,
        players: &mut PlayerPair<P>,
    ) -> Result<()> {
        if index >= self.tracks.len() {
            return Ok(());
        }

        let was_active = index == self.current_index && self.active != ActivePlayer::None;
        self.tracks.remove(index);

        if was_active {
            self.blank(players)?;
        } else if let PlayAll::PlayingIndex(playing) = self.play_all {
            if index < playing {
                self.play_all = PlayAll::PlayingIndex(playing - 1);
            }
        }

        if index < self.current_index {
            self.current_index -= 1;
        } else if self.current_index >= self.tracks.len() {
            self.current_index = 0;
        }

        Ok(())
    }

    /// Clears the list and blanks the active element unconditionally.
    pub(crate) fn delete_all<P: PlaybackElement>(
        &mut self,
        players: &mut PlayerPair<P>,
    ) -> Result<()> {
        self.tracks.clear();
        self.current_index = 0;
        self.blank(players)
    }

    /// Applies a normalized volume level to the active element.
    ///
    /// Dropped entirely when nothing is active; levels are not queued.
    pub(crate) fn set_volume<P: PlaybackElement>(
        &mut self,
        level: f64,
        players: &mut PlayerPair<P>,
    ) -> Result<()> {
        if let Some(kind) = self.active.kind() {
            players.element_mut(kind).set_volume(level.clamp(0.0, 1.0))?;
        }
        Ok(())
    }

    /// Resets the freshly loaded element to position zero.
    ///
    /// Events from the element that is no longer active are stale and
    /// ignored; loading a new track supersedes interest in the old one.
    pub(crate) fn on_metadata_loaded<P: PlaybackElement>(
        &mut self,
        kind: MediaKind,
        players: &mut PlayerPair<P>,
    ) -> Result<()> {
        if self.active.kind() == Some(kind) {
            players.element_mut(kind).set_position(0.0)?;
        }
        Ok(())
    }

    /// The single end-of-track transition.
    ///
    /// Precedence: an in-progress play-all sweep chains (or terminates at
    /// the end of the list), otherwise the repeat flag replays the same
    /// track from zero, otherwise plain wrap-around advancement. The sweep
    /// deliberately does not consult the repeat flag; the two behaviors are
    /// kept as distinct as they are in the command surface.
    ///
    /// Replaying reloads the track rather than seeking; the backend unloads
    /// the file at end of file, so there is nothing left to seek in.
    pub(crate) fn on_track_ended<P: PlaybackElement>(
        &mut self,
        kind: MediaKind,
        players: &mut PlayerPair<P>,
    ) -> Result<()> {
        if self.active.kind() != Some(kind) {
            return Ok(());
        }

        self.is_playing = false;

        match self.play_all {
            PlayAll::PlayingIndex(index) => {
                let next_index = index + 1;
                if next_index < self.tracks.len() {
                    self.load_track_at(next_index, players)?;
                    self.play_all = PlayAll::PlayingIndex(next_index);
                    self.play(players)?;
                } else {
                    // Sweep exhausted: cursor back to the start, no wrap.
                    self.play_all = PlayAll::Stopped;
                    self.current_index = 0;
                }
            }
            PlayAll::Stopped => {
                if self.is_repeating {
                    self.load_track_at(self.current_index, players)?;
                    self.play(players)?;
                } else {
                    self.next(players)?;
                }
            }
        }

        Ok(())
    }

    /// Stops, unbinds and hides the active element.
    fn blank<P: PlaybackElement>(&mut self, players: &mut PlayerPair<P>) -> Result<()> {
        if let Some(kind) = self.active.kind() {
            let element = players.element_mut(kind);
            element.pause()?;
            element.set_position(0.0)?;
            element.clear_source()?;
            element.set_visible(false)?;
        }
        self.active = ActivePlayer::None;
        self.is_playing = false;
        self.play_all = PlayAll::Stopped;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        AssignSource(String),
        Load,
        Play,
        Pause,
        SetPosition(f64),
        SetVolume(f64),
        SetVisible(bool),
        ClearSource,
    }

    /// Recording stand-in for a real playback element.
    #[derive(Default)]
    struct FakeElement {
        calls: Vec<Call>,
        source: Option<String>,
        visible: bool,
    }

    impl PlaybackElement for FakeElement {
        fn assign_source(&mut self, source: &str) -> Result<()> {
            self.source = Some(source.to_string());
            self.calls.push(Call::AssignSource(source.to_string()));
            Ok(())
        }

        fn load(&mut self) -> Result<()> {
            self.calls.push(Call::Load);
            Ok(())
        }

        fn play(&mut self) -> Result<()> {
            self.calls.push(Call::Play);
            Ok(())
        }

        fn pause(&mut self) -> Result<()> {
            self.calls.push(Call::Pause);
            Ok(())
        }

        fn set_position(&mut self, seconds: f64) -> Result<()> {
            self.calls.push(Call::SetPosition(seconds));
            Ok(())
        }

        fn set_volume(&mut self, level: f64) -> Result<()> {
            self.calls.push(Call::SetVolume(level));
            Ok(())
        }

        fn set_visible(&mut self, visible: bool) -> Result<()> {
            self.visible = visible;
            self.calls.push(Call::SetVisible(visible));
            Ok(())
        }

        fn clear_source(&mut self) -> Result<()> {
            self.source = None;
            self.calls.push(Call::ClearSource);
            Ok(())
        }
    }

    fn players() -> PlayerPair<FakeElement> {
        PlayerPair::new(FakeElement::default(), FakeElement::default())
    }

    fn audio_track(name: &str) -> Track {
        Track::new(
            name.to_string(),
            format!("/media/{}.mp3", name),
            MediaKind::Audio,
        )
    }

    fn video_track(name: &str) -> Track {
        Track::new(
            name.to_string(),
            format!("/media/{}.mp4", name),
            MediaKind::Video,
        )
    }

    fn playlist_of(count: usize) -> Playlist {
        let mut playlist = Playlist::new();
        playlist.add_tracks((0..count).map(|i| audio_track(&format!("t{}", i))).collect());
        playlist
    }

    #[test]
    fn add_tracks_preserves_input_order() {
        let mut playlist = Playlist::new();
        playlist.add_tracks(vec![audio_track("a"), video_track("b"), audio_track("c")]);
        let titles: Vec<&str> = playlist.tracks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
        assert_eq!(playlist.len(), 3);
    }

    #[test]
    fn load_track_out_of_range_is_noop() {
        let mut playlist = playlist_of(2);
        let mut pair = players();
        playlist.load_track(5, &mut pair).unwrap();
        assert_eq!(playlist.active_kind(), None);
        assert!(pair.audio.calls.is_empty());
        assert!(pair.video.calls.is_empty());
    }

    #[test]
    fn load_track_binds_source_without_playing() {
        let mut playlist = playlist_of(2);
        let mut pair = players();
        playlist.load_track(1, &mut pair).unwrap();
        assert_eq!(playlist.playing_index(), Some(1));
        assert_eq!(playlist.active_kind(), Some(MediaKind::Audio));
        assert!(!playlist.is_playing());
        assert_eq!(
            pair.audio.calls,
            vec![
                Call::SetVisible(true),
                Call::AssignSource("/media/t1.mp3".to_string()),
                Call::Load,
            ]
        );
    }

    #[test]
    fn switching_kinds_deactivates_the_other_element() {
        let mut playlist = Playlist::new();
        playlist.add_tracks(vec![audio_track("a"), video_track("v")]);
        let mut pair = players();

        playlist.load_track(0, &mut pair).unwrap();
        playlist.load_track(1, &mut pair).unwrap();

        assert_eq!(playlist.active_kind(), Some(MediaKind::Video));
        // The audio element was paused, reset and hidden before the video
        // element became visible.
        assert_eq!(
            pair.audio.calls[3..],
            [Call::Pause, Call::SetPosition(0.0), Call::SetVisible(false)]
        );
        assert!(!pair.audio.visible);
        assert!(pair.video.visible);
    }

    #[test]
    fn play_pause_stop_are_noops_with_nothing_loaded() {
        let mut playlist = playlist_of(2);
        let mut pair = players();
        playlist.play(&mut pair).unwrap();
        playlist.pause(&mut pair).unwrap();
        playlist.stop(&mut pair).unwrap();
        assert!(pair.audio.calls.is_empty());
        assert!(!playlist.is_playing());
    }

    #[test]
    fn stop_pauses_and_seeks_to_zero() {
        let mut playlist = playlist_of(1);
        let mut pair = players();
        playlist.load_track(0, &mut pair).unwrap();
        playlist.play(&mut pair).unwrap();
        playlist.stop(&mut pair).unwrap();
        assert!(!playlist.is_playing());
        assert_eq!(
            pair.audio.calls[pair.audio.calls.len() - 2..],
            [Call::Pause, Call::SetPosition(0.0)]
        );
    }

    #[test]
    fn next_applied_length_times_returns_to_start() {
        let mut playlist = playlist_of(4);
        let mut pair = players();
        playlist.load_track(2, &mut pair).unwrap();
        for _ in 0..playlist.len() {
            playlist.next(&mut pair).unwrap();
        }
        assert_eq!(playlist.playing_index(), Some(2));
    }

    #[test]
    fn previous_is_inverse_of_next() {
        let mut playlist = playlist_of(3);
        let mut pair = players();
        playlist.load_track(1, &mut pair).unwrap();
        playlist.next(&mut pair).unwrap();
        playlist.previous(&mut pair).unwrap();
        assert_eq!(playlist.playing_index(), Some(1));
    }

    #[test]
    fn next_from_last_index_wraps_to_first_and_plays() {
        let mut playlist = playlist_of(3);
        let mut pair = players();
        playlist.load_track(2, &mut pair).unwrap();
        playlist.next(&mut pair).unwrap();
        assert_eq!(playlist.playing_index(), Some(0));
        assert!(playlist.is_playing());
        assert_eq!(pair.audio.calls.last(), Some(&Call::Play));
    }

    #[test]
    fn previous_from_first_index_wraps_to_last() {
        let mut playlist = playlist_of(3);
        let mut pair = players();
        playlist.load_track(0, &mut pair).unwrap();
        playlist.previous(&mut pair).unwrap();
        assert_eq!(playlist.playing_index(), Some(2));
        assert!(playlist.is_playing());
    }

    #[test]
    fn transport_on_empty_list_is_noop() {
        let mut playlist = Playlist::new();
        let mut pair = players();
        playlist.next(&mut pair).unwrap();
        playlist.previous(&mut pair).unwrap();
        playlist.play_all(&mut pair).unwrap();
        playlist.play_random(&mut pair).unwrap();
        playlist.delete_track(0, &mut pair).unwrap();
        assert!(pair.audio.calls.is_empty());
        assert_eq!(playlist.playing_index(), None);
    }

    #[test]
    fn play_random_selects_a_valid_index() {
        let mut playlist = playlist_of(5);
        let mut pair = players();
        playlist.play_random(&mut pair).unwrap();
        assert!(playlist.playing_index().unwrap() < 5);
        assert!(playlist.is_playing());
    }

    #[test]
    fn deleting_the_active_track_blanks_the_element() {
        let mut playlist = playlist_of(3);
        let mut pair = players();
        playlist.load_track(1, &mut pair).unwrap();
        playlist.play(&mut pair).unwrap();

        playlist.delete_track(1, &mut pair).unwrap();

        assert_eq!(playlist.active_kind(), None);
        assert!(!playlist.is_playing());
        assert_eq!(pair.audio.source, None);
        assert!(!pair.audio.visible);
        assert_eq!(playlist.len(), 2);
    }

    #[test]
    fn deleting_a_non_active_track_keeps_the_cursor_on_the_same_track() {
        let mut playlist = playlist_of(3);
        let mut pair = players();
        playlist.load_track(2, &mut pair).unwrap();

        playlist.delete_track(0, &mut pair).unwrap();

        assert_eq!(playlist.active_kind(), Some(MediaKind::Audio));
        assert_eq!(playlist.playing_index(), Some(1));
        assert_eq!(playlist.current().unwrap().title, "t2");
    }

    #[test]
    fn deleting_past_the_end_is_noop() {
        let mut playlist = playlist_of(2);
        let mut pair = players();
        playlist.delete_track(2, &mut pair).unwrap();
        assert_eq!(playlist.len(), 2);
    }

    #[test]
    fn delete_all_empties_the_list_and_blanks_the_element() {
        let mut playlist = playlist_of(3);
        let mut pair = players();
        playlist.load_track(1, &mut pair).unwrap();
        playlist.play(&mut pair).unwrap();

        playlist.delete_all(&mut pair).unwrap();

        assert!(playlist.is_empty());
        assert_eq!(playlist.playing_index(), None);
        assert_eq!(playlist.active_kind(), None);
        assert_eq!(pair.audio.source, None);
    }

    #[test]
    fn ended_advances_with_wrap_around_by_default() {
        let mut playlist = playlist_of(2);
        let mut pair = players();
        playlist.load_track(1, &mut pair).unwrap();
        playlist.play(&mut pair).unwrap();

        playlist.on_track_ended(MediaKind::Audio, &mut pair).unwrap();

        assert_eq!(playlist.playing_index(), Some(0));
        assert!(playlist.is_playing());
    }

    #[test]
    fn repeat_reloads_the_same_track_from_zero() {
        let mut playlist = playlist_of(2);
        let mut pair = players();
        playlist.load_track(0, &mut pair).unwrap();
        playlist.play(&mut pair).unwrap();
        playlist.set_repeat(true);

        playlist.on_track_ended(MediaKind::Audio, &mut pair).unwrap();

        assert_eq!(playlist.playing_index(), Some(0));
        assert!(playlist.is_playing());
        // The finished file was unloaded by the backend, so the replay is a
        // fresh load and play, never a bare seek on the drained element.
        assert_eq!(
            pair.audio.calls[pair.audio.calls.len() - 4..],
            [
                Call::SetVisible(true),
                Call::AssignSource("/media/t0.mp3".to_string()),
                Call::Load,
                Call::Play,
            ]
        );
        let loads = pair
            .audio
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Load))
            .count();
        assert_eq!(loads, 2);
    }

    #[test]
    fn play_all_plays_every_track_then_stops_without_replay() {
        let mut playlist = playlist_of(2);
        let mut pair = players();

        playlist.play_all(&mut pair).unwrap();
        assert_eq!(playlist.playing_index(), Some(0));
        assert!(playlist.is_playing());

        playlist.on_track_ended(MediaKind::Audio, &mut pair).unwrap();
        assert_eq!(playlist.playing_index(), Some(1));
        assert!(playlist.is_playing());

        playlist.on_track_ended(MediaKind::Audio, &mut pair).unwrap();
        assert_eq!(playlist.playing_index(), Some(0));
        assert!(!playlist.is_playing());

        // Two loads in total: t0 and t1, no replay of t0 at the end.
        let loads = pair
            .audio
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Load))
            .count();
        assert_eq!(loads, 2);
    }

    #[test]
    fn play_all_ignores_the_repeat_flag() {
        // Plain advancement honors repeat, the sweep does not. The
        // asymmetry is intentional and preserved.
        let mut playlist = playlist_of(2);
        let mut pair = players();
        playlist.set_repeat(true);

        playlist.play_all(&mut pair).unwrap();
        playlist.on_track_ended(MediaKind::Audio, &mut pair).unwrap();
        assert_eq!(playlist.playing_index(), Some(1));

        playlist.on_track_ended(MediaKind::Audio, &mut pair).unwrap();
        assert_eq!(playlist.playing_index(), Some(0));
        assert!(!playlist.is_playing());
    }

    #[test]
    fn explicit_selection_cancels_a_sweep() {
        let mut playlist = playlist_of(3);
        let mut pair = players();
        playlist.play_all(&mut pair).unwrap();

        playlist.load_track(2, &mut pair).unwrap();
        playlist.play(&mut pair).unwrap();
        playlist.on_track_ended(MediaKind::Audio, &mut pair).unwrap();

        // Wrap-around advancement, not sweep chaining from index 1.
        assert_eq!(playlist.playing_index(), Some(0));
        assert!(playlist.is_playing());
    }

    #[test]
    fn ended_from_a_superseded_element_is_ignored() {
        let mut playlist = Playlist::new();
        playlist.add_tracks(vec![audio_track("a"), video_track("v")]);
        let mut pair = players();
        playlist.load_track(0, &mut pair).unwrap();
        playlist.play(&mut pair).unwrap();

        playlist.on_track_ended(MediaKind::Video, &mut pair).unwrap();

        assert_eq!(playlist.playing_index(), Some(0));
        assert!(playlist.is_playing());
    }

    #[test]
    fn metadata_loaded_resets_position_for_the_active_kind_only() {
        let mut playlist = playlist_of(1);
        let mut pair = players();
        playlist.load_track(0, &mut pair).unwrap();

        playlist
            .on_metadata_loaded(MediaKind::Video, &mut pair)
            .unwrap();
        assert!(pair.video.calls.is_empty());

        playlist
            .on_metadata_loaded(MediaKind::Audio, &mut pair)
            .unwrap();
        assert_eq!(pair.audio.calls.last(), Some(&Call::SetPosition(0.0)));
    }

    #[test]
    fn volume_is_dropped_when_nothing_is_active() {
        let mut playlist = playlist_of(1);
        let mut pair = players();

        playlist.set_volume(0.5, &mut pair).unwrap();
        assert!(pair.audio.calls.is_empty());

        playlist.load_track(0, &mut pair).unwrap();
        playlist.set_volume(1.5, &mut pair).unwrap();
        assert_eq!(pair.audio.calls.last(), Some(&Call::SetVolume(1.0)));
    }
}
