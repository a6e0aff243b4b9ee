//! Keyboard mapping
//!
//! Key events arrive whenever the terminal delivers them; they are folded
//! into a single [`TickInput`] that the next tick consumes in one go.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::{PaddleCommand, TickInput};

/// What a key means during play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Steer(PaddleCommand),
    Pause,
    Restart,
    Menu,
    Quit,
}

/// Map a terminal key event to a play action.
///
/// Releases only arrive on terminals with keyboard enhancement; elsewhere
/// Down or Space stops the paddle.
pub fn map_key(key: KeyEvent) -> Option<KeyAction> {
    if key.kind == KeyEventKind::Release {
        return match key.code {
            KeyCode::Left | KeyCode::Right => Some(KeyAction::Steer(PaddleCommand::Stop)),
            _ => None,
        };
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(KeyAction::Quit);
    }

    match key.code {
        KeyCode::Left => Some(KeyAction::Steer(PaddleCommand::Left)),
        KeyCode::Right => Some(KeyAction::Steer(PaddleCommand::Right)),
        KeyCode::Down | KeyCode::Char(' ') => Some(KeyAction::Steer(PaddleCommand::Stop)),
        KeyCode::Esc => Some(KeyAction::Quit),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'p' if key.kind == KeyEventKind::Press => Some(KeyAction::Pause),
            'r' => Some(KeyAction::Restart),
            'm' => Some(KeyAction::Menu),
            'q' => Some(KeyAction::Quit),
            _ => None,
        },
        _ => None,
    }
}

/// Fold an action into the pending tick input. Quit is handled by the caller.
pub fn fold(input: &mut TickInput, action: KeyAction) {
    match action {
        KeyAction::Steer(command) => input.paddle = Some(command),
        // Two presses between ticks cancel out
        KeyAction::Pause => input.pause = !input.pause,
        KeyAction::Restart => input.restart = true,
        KeyAction::Menu => input.menu = true,
        KeyAction::Quit => {}
    }
}
