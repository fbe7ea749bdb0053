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

//! UI rendering logic for the playlist view.
//!
//! Exactly one row carries the "playing" marker for a non-empty list; it is
//! re-derived from the playlist cursor on every draw, so the highlight can
//! never drift out of step with the model.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    prelude::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
};

use crate::{
    components::PlaylistView,
    model::{MediaKind, playlist::Playlist},
    render::icons::ICON_PLAY,
    theme::Theme,
};

impl PlaylistView {
    pub(crate) fn draw(&mut self, f: &mut Frame, area: Rect, playlist: &Playlist, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(area);

        let header_block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(theme.border_colour))
            .padding(Padding::horizontal(1));

        let header = Paragraph::new(format!("Playlist | {} tracks", playlist.len()))
            .block(header_block);
        f.render_widget(header, chunks[0]);

        if playlist.is_empty() {
            let hint = Paragraph::new("Drop MP3 or MP4 files onto the terminal to add them")
                .style(Style::default().fg(theme.hint_fg))
                .block(Block::default().padding(Padding::new(1, 1, 1, 0)));
            f.render_widget(hint, chunks[1]);
            return;
        }

        let playing_index = playlist.playing_index();

        let items: Vec<ListItem> = playlist
            .tracks()
            .iter()
            .enumerate()
            .map(|(index, track)| {
                let marker = if playing_index == Some(index) {
                    format!(" {} ", ICON_PLAY)
                } else {
                    "   ".to_string()
                };

                let kind_badge = match track.kind {
                    MediaKind::Audio => "[audio]",
                    MediaKind::Video => "[video]",
                };

                let style = if playing_index == Some(index) {
                    Style::default()
                        .fg(theme.accent_colour)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.list_track_fg)
                };

                ListItem::new(Line::from(vec![
                    Span::styled(marker, style),
                    Span::styled(track.title.clone(), style),
                    Span::raw(" "),
                    Span::styled(kind_badge, Style::default().fg(theme.list_kind_fg)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default().bg(theme.selection_bg))
            .block(Block::default().padding(Padding::horizontal(1)));

        f.render_stateful_widget(list, chunks[1], &mut self.list_state);
    }
}
