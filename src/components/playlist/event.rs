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

//! Event routing for the playlist view.
//!
//! Selection movement is absorbed by the view itself; activation and
//! deletion of the selected row are surfaced as [`PlaylistAction`]s for the
//! event loop to apply to the model.

use crossterm::event::{KeyCode, KeyEvent};

use crate::components::{PlaylistAction, PlaylistView};

impl PlaylistView {
    /// Processes one key event while the playlist is visible.
    ///
    /// Returns `Some` when the key produced an action for the model, `None`
    /// when the key is not a playlist key and should fall through to the
    /// global bindings. Movement keys update the selection internally and
    /// still return `None`; none of the global bindings use them.
    pub(crate) fn process_key(&mut self, key: KeyEvent, len: usize) -> Option<PlaylistAction> {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next(len);
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_previous(len);
                None
            }
            KeyCode::Enter => self.selected().map(PlaylistAction::Activate),
            KeyCode::Char('d') | KeyCode::Delete => self.selected().map(PlaylistAction::Delete),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn enter_activates_the_selected_row() {
        let mut view = PlaylistView::new();
        assert_eq!(view.process_key(key(KeyCode::Enter), 2), None);

        view.process_key(key(KeyCode::Down), 2);
        assert_eq!(
            view.process_key(key(KeyCode::Enter), 2),
            Some(PlaylistAction::Activate(0))
        );
    }

    #[test]
    fn delete_targets_the_selected_row() {
        let mut view = PlaylistView::new();
        view.process_key(key(KeyCode::Down), 3);
        view.process_key(key(KeyCode::Down), 3);
        assert_eq!(
            view.process_key(key(KeyCode::Char('d')), 3),
            Some(PlaylistAction::Delete(1))
        );
    }

    #[test]
    fn unrelated_keys_fall_through() {
        let mut view = PlaylistView::new();
        assert_eq!(view.process_key(key(KeyCode::Char('q')), 3), None);
        assert_eq!(view.selected(), None);
    }
}
