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

//! # Drop-fed Media Playlist TUI.
//!
//! A terminal-based playlist manager and player for locally dropped audio
//! and video files.
//!
//! Files arrive by dragging them onto the terminal (delivered as a
//! bracketed paste of paths), by the `:add` command, or as command line
//! arguments. Accepted tracks form a linear playlist with the usual
//! transport controls; playback itself is delegated to a pair of
//! MPV-backed playback elements, one for audio and one for video.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure
//! the terminal state is preserved even in the event of a crash. It uses an
//! event-driven architecture where:
//!
//! * The **Main Thread** manages the terminal lifecycle, UI rendering and
//!   all playlist state transitions.
//! * **Background Workers** resolve dropped paths into tracks and drive the
//!   MPV playback backends.
//! * **Event Loops** capture user input, drops and system ticks to drive
//!   the UI state.
//!
//! Communication between the UI and background workers is handled via
//! `std::sync::mpsc` channels; every state transition happens inside the
//! single event loop, one event at a time.

mod actions;
mod commander;
mod components;
mod config;
mod model;
mod player;
mod render;
mod theme;
mod util;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self},
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::Duration,
};

use crate::{
    actions::{
        commands::AppCommand,
        events::{AppEvent, process_events},
    },
    commander::Commander,
    components::PlaylistView,
    config::AppConfig,
    model::{MediaKind, playlist::Playlist},
    player::{MediaPlayer, PlayerPair, PlayerState},
    theme::Theme,
};

/// Application state.
struct App {
    pub config: AppConfig,

    pub theme: Theme,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub command_tx: Sender<AppCommand>,

    pub playlist: Playlist,
    pub players: PlayerPair<MediaPlayer>,

    pub playlist_view: PlaylistView,
    pub commander: Commander,

    pub show_list: bool,
    pub volume_level: f64,

    pub player_state: PlayerState,
    pub player_duration: Option<u64>,
    pub player_time: Option<u64>,
    pub player_position: Option<f64>,
    pub volume: Option<u32>,
    pub notice: Option<String>,
}

impl App {
    /// Create a new instance of application state.
    pub fn new(config: AppConfig, command_tx: Sender<AppCommand>) -> Result<Self> {
        let (event_tx, event_rx) = mpsc::channel();

        let start_volume = config.start_volume.min(100);

        let players = PlayerPair::new(
            MediaPlayer::new(MediaKind::Audio, event_tx.clone(), start_volume)?,
            MediaPlayer::new(MediaKind::Video, event_tx.clone(), start_volume)?,
        );

        Ok(Self {
            show_list: config.show_list,
            volume_level: f64::from(start_volume) / 100.0,
            config,
            theme: Theme::default(),
            event_tx,
            event_rx,
            command_tx,
            playlist: Playlist::new(),
            players,
            playlist_view: PlaylistView::new(),
            commander: Commander::new(),
            player_state: PlayerState::Stopped,
            player_duration: None,
            player_time: None,
            player_position: None,
            volume: None,
            notice: None,
        })
    }
}

/// The entry point of the application.
///
/// Sets up the communication channels, initializes the application state,
/// manages the terminal lifecycle, and returns an error if any part of the
/// execution fails.
fn main() -> Result<()> {
    let config = config::load_config();

    let (command_tx, command_rx) = mpsc::channel();

    let mut app = App::new(config, command_tx).context("Failed to initialise application")?;

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app, command_rx);
    restore_terminal(&mut terminal);

    // Ambient preferences only; the playlist itself does not survive.
    app.config.show_list = app.show_list;
    app.config.start_volume = (app.volume_level * 100.0).round() as u32;
    if let Err(e) = config::save_config(&app.config) {
        eprintln!("Failed to save configuration: {}", e);
    }

    res.context("Application error occurred")
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background color based on the provided theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
/// * Enables bracketed paste, which is how file drops arrive.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate
/// screen cannot be entered.
fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Set the background of the entire terminal window, without this we'd
    // get a thin black outline
    util::term::set_terminal_bg(app.theme.background_colour);

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
        .context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`], including
/// disabling raw mode, leaving the alternate screen, and resetting the
/// background color. It also ensures the cursor is made visible again.
///
/// This function is designed to be "best-effort" and does not return a
/// result, as it is typically called during cleanup or panic handling.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableBracketedPaste).ok();
    util::term::reset_terminal_bg();
    terminal.show_cursor().ok();
}

/// Starts the application's background workers and enters the main event
/// loop.
///
/// This function spawns several long-running background threads:
/// * A command worker to process asynchronous [`AppCommand`]s, most notably
///   the ingestion of dropped paths.
/// * An input thread to poll for keyboard and paste (drop) events.
/// * A tick thread to trigger periodic UI refreshes.
///
/// After spawning the workers, it hands control to [`process_events`] to
/// manage the UI and state updates.
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an
/// unrecoverable application error.
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    command_rx: Receiver<AppCommand>,
) -> Result<()> {
    // Spawn a background worker to process application commands
    // asynchronously.
    let command_event_tx = app.event_tx.clone();
    actions::commands::spawn_command_worker(command_rx, command_event_tx);

    // Spawn a thread to translate raw terminal events to application
    // events. A drag-and-drop onto the terminal window arrives here as a
    // paste of paths.
    let tx_input = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(event::Event::Key(key)) => {
                    tx_input.send(AppEvent::Key(key)).ok();
                }
                Ok(event::Event::Paste(payload)) => {
                    let paths = util::paths::split_dropped_paths(&payload);
                    if !paths.is_empty() {
                        tx_input.send(AppEvent::PathsDropped(paths)).ok();
                    }
                }
                _ => {}
            }
        }
    });

    // Spawn a thread to send a periodic tick application event, this is
    // effectively the minimum "frame rate" for rendering the TUI
    // application.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            let _ = tx_tick.send(AppEvent::Tick);
            thread::sleep(Duration::from_millis(250));
        }
    });

    // Anything on the command line is treated like an initial drop.
    let initial_paths: Vec<String> = std::env::args().skip(1).collect();
    if !initial_paths.is_empty() {
        app.command_tx
            .send(AppCommand::IngestPaths(initial_paths))
            .context("Failed to queue initial files")?;
    }

    // Application event loop, process events until the user quits
    process_events(terminal, app)
}
