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

//! Command-line input logic and state management.
//!
//! This module implements the logic for the command-line processing
//! component, handling a text input component and dispatching a
//! corresponding application command when typing is finished and a command
//! is submitted. It covers the parts of the command surface that want an
//! argument, such as adding a file by path or setting an absolute volume.

use std::sync::mpsc::Sender;

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent};
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::actions::commands::AppCommand;

pub(crate) struct Commander {
    active: bool,
    pub(crate) input: Input,
}

impl Commander {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            input: Input::default(),
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    /// Returns whether the key was consumed by the commander.
    ///
    /// While inactive, only `:` is of interest and activates command mode;
    /// while active, every key belongs to the input line until Escape or
    /// Enter ends the session.
    pub(crate) fn handle_key(
        &mut self,
        key_event: KeyEvent,
        command_sender: &mut Sender<AppCommand>,
    ) -> bool {
        if self.active {
            match key_event.code {
                KeyCode::Esc => {
                    self.active = false;
                    self.input.reset();
                    true
                }

                KeyCode::Enter => {
                    let buffer = self.input.value().trim().to_string();
                    if !buffer.is_empty() {
                        let _ = self.run_command(&buffer, command_sender);
                    }
                    self.input.reset();
                    self.active = false;
                    true
                }

                _ => {
                    // Delegate all other key events to the managed input
                    // component.
                    self.input.handle_event(&Event::Key(key_event));
                    true
                }
            }
        } else {
            match key_event.code {
                KeyCode::Char(':') => {
                    self.active = true;
                    true
                }
                _ => false,
            }
        }
    }

    fn run_command(&self, buffer: &str, command_sender: &mut Sender<AppCommand>) -> Result<()> {
        let parts: Vec<&str> = buffer.split_whitespace().collect();

        match parts.as_slice() {
            ["q"] | ["quit"] => command_sender.send(AppCommand::ExitApplication)?,

            ["add", path_parts @ ..] => {
                if !path_parts.is_empty() {
                    let path = path_parts.join(" ");
                    command_sender.send(AppCommand::IngestPaths(vec![path]))?;
                }
            }

            ["clear"] => command_sender.send(AppCommand::DeleteAll)?,

            ["repeat", "on"] => command_sender.send(AppCommand::SetRepeat(true))?,
            ["repeat", "off"] => command_sender.send(AppCommand::SetRepeat(false))?,

            ["vol", percent] => {
                if let Ok(percent) = percent.parse::<u32>() {
                    let level = f64::from(percent.min(100)) / 100.0;
                    command_sender.send(AppCommand::SetVolume(level))?;
                }
            }

            ["list"] => command_sender.send(AppCommand::ToggleListVisibility)?,

            _ => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use std::sync::mpsc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_command(commander: &mut Commander, tx: &mut Sender<AppCommand>, command: &str) {
        assert!(commander.handle_key(key(KeyCode::Char(':')), tx));
        for c in command.chars() {
            commander.handle_key(key(KeyCode::Char(c)), tx);
        }
        commander.handle_key(key(KeyCode::Enter), tx);
    }

    #[test]
    fn colon_enters_command_mode() {
        let (mut tx, _rx) = mpsc::channel();
        let mut commander = Commander::new();
        assert!(!commander.active());
        assert!(!commander.handle_key(key(KeyCode::Char('x')), &mut tx));
        assert!(commander.handle_key(key(KeyCode::Char(':')), &mut tx));
        assert!(commander.active());
    }

    #[test]
    fn add_command_ingests_a_path_with_spaces() {
        let (mut tx, rx) = mpsc::channel();
        let mut commander = Commander::new();
        type_command(&mut commander, &mut tx, "add /music/two words.mp3");

        match rx.try_recv().unwrap() {
            AppCommand::IngestPaths(paths) => {
                assert_eq!(paths, vec!["/music/two words.mp3".to_string()]);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(!commander.active());
    }

    #[test]
    fn vol_command_normalizes_and_caps_the_level() {
        let (mut tx, rx) = mpsc::channel();
        let mut commander = Commander::new();
        type_command(&mut commander, &mut tx, "vol 250");

        match rx.try_recv().unwrap() {
            AppCommand::SetVolume(level) => assert_eq!(level, 1.0),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn unknown_commands_are_ignored() {
        let (mut tx, rx) = mpsc::channel();
        let mut commander = Commander::new();
        type_command(&mut commander, &mut tx, "bogus");
        assert!(rx.try_recv().is_err());
    }
}
