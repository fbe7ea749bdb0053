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

//! Render the command input line.
//!
//! The bottom line of the screen doubles as the command input while the
//! commander is active, and as the notice/help line otherwise.

use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::Style,
    widgets::Paragraph,
};

use crate::App;

pub(crate) fn draw_commander(f: &mut Frame, area: Rect, app: &App) {
    if app.commander.active() {
        let value = format!(":{}", app.commander.input.value());
        let input = Paragraph::new(value).style(Style::default().fg(app.theme.accent_colour));
        f.render_widget(input, area);

        // Cursor sits after the ':' prefix at the input's own cursor column.
        let cursor_x = area.x + 1 + app.commander.input.visual_cursor() as u16;
        f.set_cursor_position(Position::new(cursor_x.min(area.right()), area.y));
        return;
    }

    let line = match &app.notice {
        Some(notice) => {
            Paragraph::new(notice.clone()).style(Style::default().fg(app.theme.notice_fg))
        }
        None => Paragraph::new(
            "enter: play  space: pause  s: stop  n/b: next/prev  r: repeat  a: all  x: random  d/D: delete  v: list  :: command",
        )
        .style(Style::default().fg(app.theme.hint_fg)),
    };

    f.render_widget(line, area);
}
