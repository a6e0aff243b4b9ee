//! Terminal rendering
//!
//! Each frame is drawn into an off-screen [`Frame`] of character cells and
//! then flushed in one pass. The 800x600 field is scaled to whatever the
//! terminal offers; the simulation never sees terminal coordinates.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};

use crate::HighScores;
use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::sim::{BrickColor, BrickKind, GamePhase, GameState, Rect};

/// Smallest terminal we draw the field in
pub const MIN_COLS: u16 = 40;
pub const MIN_ROWS: u16 = 12;

const HUD_COLOR: Color = Color::White;
const PINK: Color = Color::Rgb {
    r: 255,
    g: 175,
    b: 175,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    color: Color,
}

const BLANK: Cell = Cell {
    ch: ' ',
    color: Color::Reset,
};

/// Off-screen character buffer
#[derive(Debug, Clone)]
pub struct Frame {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![BLANK; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize if needed and blank every cell
    pub fn reset(&mut self, width: u16, height: u16) {
        if (width, height) != (self.width, self.height) {
            *self = Self::new(width, height);
        } else {
            self.cells.fill(BLANK);
        }
    }

    pub fn put(&mut self, x: u16, y: u16, ch: char, color: Color) {
        if x < self.width && y < self.height {
            self.cells[y as usize * self.width as usize + x as usize] = Cell { ch, color };
        }
    }

    pub fn text(&mut self, x: u16, y: u16, s: &str, color: Color) {
        for (i, ch) in s.chars().enumerate() {
            self.put(x.saturating_add(i as u16), y, ch, color);
        }
    }

    pub fn text_centered(&mut self, y: u16, s: &str, color: Color) {
        let len = s.chars().count() as u16;
        self.text(self.width.saturating_sub(len) / 2, y, s, color);
    }

    pub fn char_at(&self, x: u16, y: u16) -> Option<char> {
        (x < self.width && y < self.height)
            .then(|| self.cells[y as usize * self.width as usize + x as usize].ch)
    }

    /// Row contents as a string (for tests and debugging)
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width).filter_map(|x| self.char_at(x, y)).collect()
    }

    /// Write the whole frame to the terminal in a single write
    pub fn flush<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let mut buf: Vec<u8> = Vec::with_capacity(self.cells.len() * 4);
        for y in 0..self.height {
            queue!(buf, MoveTo(0, y))?;
            let row = &self.cells[y as usize * self.width as usize..][..self.width as usize];
            let mut run = String::new();
            let mut run_color = Color::Reset;
            for cell in row {
                if cell.color != run_color && !run.is_empty() {
                    queue!(buf, SetForegroundColor(run_color), Print(&run))?;
                    run.clear();
                }
                run_color = cell.color;
                run.push(cell.ch);
            }
            if !run.is_empty() {
                queue!(buf, SetForegroundColor(run_color), Print(&run))?;
            }
        }
        queue!(buf, ResetColor)?;
        out.write_all(&buf)?;
        out.flush()
    }
}

/// Mapping from field coordinates to terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct View {
    /// First terminal row of the field (below the HUD)
    pub origin_row: u16,
    pub cols: u16,
    pub rows: u16,
}

impl View {
    /// Lay out the field in a terminal of the given size
    pub fn fit(term_cols: u16, term_rows: u16, show_controls: bool) -> Self {
        let reserved = 1 + u16::from(show_controls);
        Self {
            origin_row: 1,
            cols: term_cols.max(1),
            rows: term_rows.saturating_sub(reserved).max(1),
        }
    }

    pub fn col(&self, x: i32) -> u16 {
        let scaled = x.clamp(0, FIELD_WIDTH - 1) as i64 * self.cols as i64 / FIELD_WIDTH as i64;
        scaled as u16
    }

    /// Terminal row for a field y, None when outside the field
    pub fn row(&self, y: i32) -> Option<u16> {
        if !(0..FIELD_HEIGHT).contains(&y) {
            return None;
        }
        let scaled = y as i64 * self.rows as i64 / FIELD_HEIGHT as i64;
        Some(self.origin_row + scaled as u16)
    }

    /// Columns covered by a rectangle (always at least one)
    pub fn span(&self, rect: &Rect) -> std::ops::RangeInclusive<u16> {
        let start = self.col(rect.left());
        let end = self.col(rect.right() - 1).max(start);
        start..=end
    }
}

/// Extra screen content owned by the shell, not the session
#[derive(Debug, Clone, Copy)]
pub struct Overlay<'a> {
    pub high_scores: &'a HighScores,
    /// Rank achieved by the run that just ended
    pub last_rank: Option<usize>,
    pub show_controls: bool,
}

pub fn brick_color(kind: BrickKind) -> Color {
    match kind {
        BrickKind::Normal(color) => match color {
            BrickColor::Red => Color::Red,
            BrickColor::Orange => Color::DarkYellow,
            BrickColor::Yellow => Color::Yellow,
            BrickColor::Green => Color::Green,
            BrickColor::Cyan => Color::Cyan,
        },
        BrickKind::Unbreakable => Color::Grey,
        BrickKind::Exploding => Color::Magenta,
        BrickKind::Bonus => PINK,
    }
}

fn brick_glyph(kind: BrickKind) -> char {
    match kind {
        BrickKind::Unbreakable => '▒',
        _ => '█',
    }
}

/// Draw one frame of the play screen
pub fn draw_game(frame: &mut Frame, state: &GameState, overlay: &Overlay) {
    if frame.width() < MIN_COLS || frame.height() < MIN_ROWS {
        frame.text(0, 0, "Terminal too small", HUD_COLOR);
        return;
    }

    let view = View::fit(frame.width(), frame.height(), overlay.show_controls);
    draw_hud(frame, state);

    if state.phase == GamePhase::GameOver {
        draw_game_over(frame, state, overlay, &view);
    } else {
        draw_field(frame, state, &view);
        if state.phase == GamePhase::Paused {
            let mid = view.origin_row + view.rows / 2;
            frame.text_centered(mid, " PAUSED - press P to resume ", HUD_COLOR);
        }
    }

    if overlay.show_controls {
        frame.text(
            0,
            frame.height() - 1,
            "←/→ move  ↓/Space stop  P pause  Q quit",
            Color::DarkGrey,
        );
    }
}

fn draw_hud(frame: &mut Frame, state: &GameState) {
    frame.text(1, 0, &format!("Score: {}", state.score), HUD_COLOR);
    frame.text_centered(0, &format!("Level: {}", state.difficulty.level()), HUD_COLOR);
    let lives = format!("Lives: {}", state.lives);
    let x = frame.width().saturating_sub(lives.len() as u16 + 1);
    frame.text(x, 0, &lives, HUD_COLOR);
}

fn draw_field(frame: &mut Frame, state: &GameState, view: &View) {
    for brick in state.bricks.iter().filter(|b| !b.is_destroyed()) {
        let Some(row) = view.row(brick.rect.top()) else {
            continue;
        };
        let color = brick_color(brick.kind);
        let glyph = brick_glyph(brick.kind);
        for col in view.span(&brick.rect) {
            frame.put(col, row, glyph, color);
        }
    }

    let paddle = &state.paddle.rect;
    if let Some(row) = view.row(paddle.top()) {
        for col in view.span(paddle) {
            frame.put(col, row, '▀', Color::Blue);
        }
    }

    let ball = &state.ball.rect;
    if let Some(row) = view.row(ball.top() + ball.height() / 2) {
        frame.put(view.col(ball.center_x()), row, '●', Color::Red);
    }
}

fn draw_game_over(frame: &mut Frame, state: &GameState, overlay: &Overlay, view: &View) {
    let mid = view.origin_row + view.rows / 2;
    frame.text_centered(
        mid.saturating_sub(1),
        &format!("Game Over! Score: {}", state.score),
        HUD_COLOR,
    );
    frame.text_centered(
        mid + 1,
        "Press M to return to Menu | Press R to Restart",
        HUD_COLOR,
    );

    let footer = match (overlay.last_rank, overlay.high_scores.top_score()) {
        (Some(1), _) => "New best score!".to_string(),
        (Some(rank), _) => format!("High score rank #{}", rank),
        (None, Some(best)) => format!("Best: {}", best),
        (None, None) => String::new(),
    };
    if !footer.is_empty() {
        frame.text_centered(mid + 3, &footer, Color::Yellow);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Difficulty, GamePhase};

    fn overlay(scores: &HighScores) -> Overlay<'_> {
        Overlay {
            high_scores: scores,
            last_rank: None,
            show_controls: true,
        }
    }

    #[test]
    fn test_view_scaling() {
        let view = View::fit(80, 26, true);
        assert_eq!(view.rows, 24);
        assert_eq!(view.col(0), 0);
        assert_eq!(view.col(FIELD_WIDTH), 79);
        assert_eq!(view.col(400), 40);
        assert_eq!(view.row(0), Some(1));
        assert_eq!(view.row(300), Some(13));
        assert_eq!(view.row(FIELD_HEIGHT), None);
        assert_eq!(view.row(-5), None);
    }

    #[test]
    fn test_span_never_empty() {
        let view = View::fit(40, 20, false);
        let narrow = Rect::new(100, 100, 2, 2);
        assert_eq!(view.span(&narrow).count(), 1);
        let brick = Rect::new(20, 50, 60, 20);
        assert_eq!(view.span(&brick), 1..=3);
    }

    #[test]
    fn test_frame_clips() {
        let mut frame = Frame::new(4, 2);
        frame.text(2, 1, "abcdef", Color::White);
        assert_eq!(frame.row_text(1), "  ab");
        frame.put(10, 10, 'x', Color::White);
        assert_eq!(frame.char_at(10, 10), None);
        frame.reset(4, 2);
        assert_eq!(frame.row_text(1), "    ");
    }

    #[test]
    fn test_draw_playing_frame() {
        let state = GameState::new(Difficulty::Easy, 1);
        let scores = HighScores::new();
        let mut frame = Frame::new(80, 26);
        draw_game(&mut frame, &state, &overlay(&scores));

        let hud = frame.row_text(0);
        assert!(hud.contains("Score: 0"));
        assert!(hud.contains("Level: 1"));
        assert!(hud.contains("Lives: 3"));

        let view = View::fit(80, 26, true);
        let ball = &state.ball.rect;
        let row = view.row(ball.top() + ball.height() / 2).unwrap();
        assert_eq!(frame.char_at(view.col(ball.center_x()), row), Some('●'));
        let paddle_row = view.row(state.paddle.rect.top()).unwrap();
        assert!(frame.row_text(paddle_row).contains('▀'));
        assert!(frame.row_text(25).contains("P pause"));
    }

    #[test]
    fn test_draw_game_over() {
        let mut state = GameState::new(Difficulty::Hard, 1);
        state.phase = GamePhase::GameOver;
        state.score = 70;
        let mut scores = HighScores::new();
        scores.add_score(70, Difficulty::Hard, 0);
        let mut frame = Frame::new(80, 24);
        let overlay = Overlay {
            high_scores: &scores,
            last_rank: Some(1),
            show_controls: false,
        };
        draw_game(&mut frame, &state, &overlay);

        let all: Vec<String> = (0..24).map(|y| frame.row_text(y)).collect();
        assert!(all.iter().any(|r| r.contains("Game Over! Score: 70")));
        assert!(all.iter().any(|r| r.contains("Press R to Restart")));
        assert!(all.iter().any(|r| r.contains("New best score!")));
        // Entities are hidden
        assert!(!all.iter().any(|r| r.contains('●')));
    }

    #[test]
    fn test_too_small() {
        let state = GameState::new(Difficulty::Easy, 1);
        let scores = HighScores::new();
        let mut frame = Frame::new(20, 5);
        draw_game(&mut frame, &state, &overlay(&scores));
        assert!(frame.row_text(0).starts_with("Terminal too"));
    }

    #[test]
    fn test_flush_writes_bytes() {
        let mut frame = Frame::new(3, 1);
        frame.text(0, 0, "abc", Color::Red);
        let mut out = Vec::new();
        frame.flush(&mut out).unwrap();
        assert!(String::from_utf8_lossy(&out).contains("abc"));
    }
}
