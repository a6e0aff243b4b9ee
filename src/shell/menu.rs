//! Difficulty selection screen

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Color;

use super::render::Frame;
use crate::HighScores;
use crate::sim::Difficulty;

/// Outcome of a key press on the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Selection moved or nothing happened
    None,
    Start(Difficulty),
    Quit,
}

/// Cursor over the three difficulty buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Menu {
    selected: usize,
}

impl Menu {
    pub fn new(initial: Difficulty) -> Self {
        let selected = Difficulty::ALL
            .iter()
            .position(|&d| d == initial)
            .unwrap_or(0);
        Self { selected }
    }

    pub fn selected(&self) -> Difficulty {
        Difficulty::ALL[self.selected]
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> MenuAction {
        if key.kind == KeyEventKind::Release {
            return MenuAction::None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return MenuAction::Quit;
        }

        let count = Difficulty::ALL.len();
        match key.code {
            KeyCode::Up => {
                self.selected = (self.selected + count - 1) % count;
                MenuAction::None
            }
            KeyCode::Down | KeyCode::Tab => {
                self.selected = (self.selected + 1) % count;
                MenuAction::None
            }
            KeyCode::Enter | KeyCode::Char(' ') => MenuAction::Start(self.selected()),
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => MenuAction::Quit,
            KeyCode::Char(c) => match c
                .to_digit(10)
                .and_then(Difficulty::from_level)
                .or_else(|| Difficulty::from_str(&c.to_string()))
            {
                Some(difficulty) => MenuAction::Start(difficulty),
                None => MenuAction::None,
            },
            _ => MenuAction::None,
        }
    }

    pub fn draw(&self, frame: &mut Frame, high_scores: &HighScores) {
        let top = frame.height().saturating_sub(9) / 2;
        frame.text_centered(top, "BRICK BREAKER", Color::Yellow);
        frame.text_centered(top + 2, "Select Difficulty", Color::White);

        for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
            let label = if i == self.selected {
                format!("> {}. {} <", difficulty.level(), difficulty.as_str())
            } else {
                format!("  {}. {}  ", difficulty.level(), difficulty.as_str())
            };
            let color = if i == self.selected {
                Color::Cyan
            } else {
                Color::Grey
            };
            frame.text_centered(top + 4 + i as u16, &label, color);
        }

        if let Some(best) = high_scores.top_score() {
            frame.text_centered(top + 8, &format!("Best this session: {}", best), Color::DarkGrey);
        }
        frame.text_centered(
            frame.height().saturating_sub(1),
            "↑/↓ choose  Enter start  Q quit",
            Color::DarkGrey,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_navigation_wraps() {
        let mut menu = Menu::new(Difficulty::Easy);
        assert_eq!(menu.handle_key(press(KeyCode::Up)), MenuAction::None);
        assert_eq!(menu.selected(), Difficulty::Hard);
        menu.handle_key(press(KeyCode::Down));
        assert_eq!(menu.selected(), Difficulty::Easy);
        menu.handle_key(press(KeyCode::Down));
        assert_eq!(
            menu.handle_key(press(KeyCode::Enter)),
            MenuAction::Start(Difficulty::Medium)
        );
    }

    #[test]
    fn test_shortcuts() {
        let mut menu = Menu::new(Difficulty::Medium);
        assert_eq!(
            menu.handle_key(press(KeyCode::Char('3'))),
            MenuAction::Start(Difficulty::Hard)
        );
        assert_eq!(
            menu.handle_key(press(KeyCode::Char('e'))),
            MenuAction::Start(Difficulty::Easy)
        );
        assert_eq!(menu.handle_key(press(KeyCode::Char('7'))), MenuAction::None);
        assert_eq!(menu.handle_key(press(KeyCode::Esc)), MenuAction::Quit);
    }

    #[test]
    fn test_draw_marks_selection() {
        let menu = Menu::new(Difficulty::Hard);
        let mut frame = Frame::new(60, 20);
        menu.draw(&mut frame, &HighScores::new());
        let rows: Vec<String> = (0..20).map(|y| frame.row_text(y)).collect();
        assert!(rows.iter().any(|r| r.contains("> 3. Hard <")));
        assert!(rows.iter().any(|r| r.contains("1. Easy")));
        assert!(!rows.iter().any(|r| r.contains("Best this session")));
    }
}
