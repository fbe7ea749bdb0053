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

//! User interface rendering logic.
//!
//! This module handles the translation of the [`App`] state into visual
//! widgets using the `ratatui` framework. It is responsible for layout
//! management, widget styling, and terminal frame composition.
//!
//! # Rendering Pipeline
//!
//! The primary entry point is the [`draw`] function, which is called after
//! every processed event to provide a reactive user interface.

mod commander;
pub(crate) mod icons;
mod player;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::{Block, Padding, Paragraph},
};

use crate::{
    App,
    render::{commander::draw_commander, player::draw_player},
};

/// Renders the user interface to the terminal frame.
///
/// Partitions the screen into the playlist panel (when visible), the player
/// bar and the commander line, and populates each from the current state of
/// the [`App`]. The playing-row highlight is recomputed from the playlist
/// cursor on every call.
pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // Outer layout: main, player bar, commander line
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(6),
            Constraint::Length(1),
        ])
        .split(area);

    if app.show_list {
        app.playlist_view
            .draw(f, outer[0], &app.playlist, &app.theme);
    } else {
        let hidden = Paragraph::new("Playlist hidden (press 'v' to show it)")
            .style(Style::default().fg(app.theme.hint_fg))
            .block(Block::default().padding(Padding::new(1, 1, 1, 0)));
        f.render_widget(hidden, outer[0]);
    }

    draw_player(f, outer[1], app);

    draw_commander(f, outer[2], app);
}
