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

//! Playlist view state.
//!
//! This module holds the transient view state for the playlist: the
//! selection cursor the user moves with the keyboard, as distinct from the
//! playing-row highlight, which is owned by the model and re-derived on
//! every render.

mod event;
mod render;

use ratatui::widgets::ListState;

/// An intent produced by the playlist view for the event loop to apply to
/// the model. The view itself never touches the playlist.
#[derive(Debug, PartialEq)]
pub(crate) enum PlaylistAction {
    /// Load and play the track at this index.
    Activate(usize),
    /// Remove the track at this index.
    Delete(usize),
}

pub(crate) struct PlaylistView {
    pub(crate) list_state: ListState,
}

impl PlaylistView {
    pub(crate) fn new() -> Self {
        Self {
            list_state: ListState::default(),
        }
    }

    pub(crate) fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let index = match self.list_state.selected() {
            Some(i) if i >= len - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.list_state.select(Some(index));
    }

    fn select_previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let index = match self.list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(index));
    }

    /// Keeps the selection within bounds after the list shrinks.
    pub(crate) fn clamp_selection(&mut self, len: usize) {
        match self.list_state.selected() {
            Some(_) if len == 0 => self.list_state.select(None),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_wraps_in_both_directions() {
        let mut view = PlaylistView::new();
        view.select_next(3);
        assert_eq!(view.selected(), Some(0));
        view.select_previous(3);
        assert_eq!(view.selected(), Some(2));
        view.select_next(3);
        assert_eq!(view.selected(), Some(0));
    }

    #[test]
    fn selection_ignores_an_empty_list() {
        let mut view = PlaylistView::new();
        view.select_next(0);
        assert_eq!(view.selected(), None);
    }

    #[test]
    fn clamp_follows_a_shrinking_list() {
        let mut view = PlaylistView::new();
        view.select_next(3);
        view.select_next(3);
        view.select_next(3);
        assert_eq!(view.selected(), Some(2));

        view.clamp_selection(2);
        assert_eq!(view.selected(), Some(1));

        view.clamp_selection(0);
        assert_eq!(view.selected(), None);
    }
}
