//! Terminal front end
//!
//! Menu, play loop and rendering around the simulation. Everything here
//! only talks to the core through `GameState::new`, `tick`, the drained
//! events and read access for drawing.

pub mod input;
pub mod menu;
pub mod render;

use std::io::{self, Stdout, Write};
use std::time::Instant;

use crossterm::{
    cursor::{Hide, Show},
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};

use crate::sim::{Difficulty, GameEvent, GameState, TickInput, tick};
use crate::{HighScores, Settings};
use input::{KeyAction, fold, map_key};
use menu::{Menu, MenuAction};
use render::{Frame, Overlay, draw_game};

/// Ticks the loop may fall behind before it stops catching up
const MAX_TICK_BACKLOG: u32 = 5;

/// How a play session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionExit {
    Menu,
    Quit,
}

/// Raw mode and alternate screen for the lifetime of the guard
struct TerminalGuard {
    out: Stdout,
    enhanced_keys: bool,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        log::info!("Attempting to enable raw mode.");
        enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;

        // Key releases let a held arrow stop the paddle when lifted
        let enhanced_keys = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if enhanced_keys {
            execute!(
                out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        log::info!("Terminal ready (key release events: {})", enhanced_keys);

        Ok(Self { out, enhanced_keys })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.enhanced_keys {
            let _ = execute!(self.out, PopKeyboardEnhancementFlags);
        }
        if let Err(e) = execute!(self.out, Show, LeaveAlternateScreen) {
            log::error!("Failed to restore screen: {}", e);
        }
        if let Err(e) = disable_raw_mode() {
            log::error!("Failed to disable raw mode: {}", e);
        }
    }
}

/// Run menus and sessions until the player quits
pub fn run(settings: &Settings) -> io::Result<()> {
    let mut terminal = TerminalGuard::enter()?;
    let mut high_scores = HighScores::new();
    let mut frame = Frame::new(0, 0);
    let mut preset = settings.difficulty;
    let mut last_choice = settings.difficulty.unwrap_or_default();

    loop {
        // A configured difficulty skips the first menu only
        let difficulty = match preset.take() {
            Some(difficulty) => difficulty,
            None => match choose_difficulty(&mut terminal.out, &mut frame, last_choice, &high_scores)? {
                Some(difficulty) => difficulty,
                None => break,
            },
        };
        last_choice = difficulty;

        let seed = settings.resolve_seed();
        match play(&mut terminal.out, &mut frame, difficulty, seed, settings, &mut high_scores)? {
            SessionExit::Menu => continue,
            SessionExit::Quit => break,
        }
    }

    log::info!("Quitting");
    Ok(())
}

fn terminal_frame(frame: &mut Frame) -> io::Result<()> {
    let (cols, rows) = terminal::size().map_err(|e| {
        log::error!("Failed to query terminal size: {}", e);
        e
    })?;
    frame.reset(cols, rows);
    Ok(())
}

fn choose_difficulty<W: Write>(
    out: &mut W,
    frame: &mut Frame,
    initial: Difficulty,
    high_scores: &HighScores,
) -> io::Result<Option<Difficulty>> {
    let mut menu = Menu::new(initial);
    log::info!("Difficulty menu displayed");

    loop {
        terminal_frame(frame)?;
        menu.draw(frame, high_scores);
        frame.flush(out)?;

        match event::read()? {
            Event::Key(key) => match menu.handle_key(key) {
                MenuAction::Start(difficulty) => {
                    log::info!("Difficulty selected: {}", difficulty.as_str());
                    return Ok(Some(difficulty));
                }
                MenuAction::Quit => return Ok(None),
                MenuAction::None => {}
            },
            Event::Resize(cols, rows) => log::info!("Terminal resized to {}x{}", cols, rows),
            _ => {}
        }
    }
}

/// Fixed-interval loop: gather input until the tick deadline, tick, draw
fn play<W: Write>(
    out: &mut W,
    frame: &mut Frame,
    difficulty: Difficulty,
    seed: u64,
    settings: &Settings,
    high_scores: &mut HighScores,
) -> io::Result<SessionExit> {
    let mut state = GameState::new(difficulty, seed);
    let interval = settings.tick_interval();
    let mut input = TickInput::default();
    let mut last_rank = None;
    let mut next_tick = Instant::now() + interval;

    loop {
        let now = Instant::now();
        if now < next_tick {
            if event::poll(next_tick - now)? {
                match event::read()? {
                    Event::Key(key) => match map_key(key) {
                        Some(KeyAction::Quit) => {
                            log::info!("Quit requested at score {}", state.score);
                            return Ok(SessionExit::Quit);
                        }
                        Some(action) => fold(&mut input, action),
                        None => {}
                    },
                    Event::Resize(cols, rows) => {
                        log::info!("Terminal resized to {}x{}", cols, rows)
                    }
                    _ => {}
                }
            }
            continue;
        }

        // Drop backlog after a stall instead of fast-forwarding
        if now.duration_since(next_tick) > interval * MAX_TICK_BACKLOG {
            next_tick = now;
        }
        next_tick += interval;

        tick(&mut state, &std::mem::take(&mut input));

        for event in state.drain_events() {
            match event {
                GameEvent::GameOver { score } => {
                    last_rank = high_scores.add_score(score, state.difficulty, state.boards_cleared);
                }
                GameEvent::Restarted => last_rank = None,
                GameEvent::ReturnToMenu => return Ok(SessionExit::Menu),
                other => log::debug!("Event: {:?}", other),
            }
        }

        terminal_frame(frame)?;
        let overlay = Overlay {
            high_scores: &*high_scores,
            last_rank,
            show_controls: settings.show_controls,
        };
        draw_game(frame, &state, &overlay);
        frame.flush(out).map_err(|e| {
            log::error!("Failed to draw frame: {}", e);
            e
        })?;
    }
}
