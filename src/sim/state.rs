//! Game state and core simulation types
//!
//! Everything one playthrough needs lives in [`GameState`]; the renderer only
//! ever reads it.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::level::generate_level;
use super::rect::Rect;
use crate::consts::*;

/// Difficulty tier chosen at session creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "e" | "1" => Some(Difficulty::Easy),
            "medium" | "med" | "m" | "2" => Some(Difficulty::Medium),
            "hard" | "h" | "3" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn from_level(level: u32) -> Option<Self> {
        match level {
            1 => Some(Difficulty::Easy),
            2 => Some(Difficulty::Medium),
            3 => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Level number shown in the HUD (1-3)
    pub fn level(&self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    /// Per-axis ball speed at spawn
    pub fn ball_speed(&self) -> i32 {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Medium => 4,
            Difficulty::Hard => 6,
        }
    }

    /// Number of brick rows in a generated board
    pub fn brick_rows(&self) -> u32 {
        ROWS_PER_DIFFICULTY * self.level()
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Simulation frozen, rendering continues
    Paused,
    /// Out of lives; waiting for restart or menu
    GameOver,
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ball {
    pub rect: Rect,
    pub vel: IVec2,
}

impl Ball {
    /// Spawn centered above the paddle, heading up and to the right
    pub fn spawn_above(paddle: &Paddle, speed: i32) -> Self {
        let x = paddle.rect.center_x() - BALL_SIZE / 2;
        let y = paddle.rect.top() - BALL_SIZE;
        Self {
            rect: Rect::new(x, y, BALL_SIZE, BALL_SIZE),
            vel: IVec2::new(speed, -speed),
        }
    }

    pub fn reverse_y(&mut self) {
        self.vel.y = -self.vel.y;
    }

    /// Integrate one tick and reflect off the side and top walls.
    ///
    /// The side walls only flip the velocity; the ball may sit past a wall by
    /// up to one tick of travel. There is no bottom wall.
    pub fn advance(&mut self) {
        self.rect.pos += self.vel;

        let max_x = FIELD_WIDTH - self.rect.width();
        let past_left = self.rect.left() <= 0 && self.vel.x < 0;
        let past_right = self.rect.left() >= max_x && self.vel.x > 0;
        if past_left || past_right {
            self.vel.x = -self.vel.x;
        }

        if self.rect.top() <= 0 && self.vel.y < 0 {
            self.rect.pos.y = 0;
            self.vel.y = -self.vel.y;
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
    /// Horizontal velocity; zero unless a direction is held
    pub vel_x: i32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            rect: Rect::new(PADDLE_START_X, PADDLE_Y, PADDLE_WIDTH, PADDLE_HEIGHT),
            vel_x: 0,
        }
    }
}

impl Paddle {
    pub fn move_left(&mut self) {
        self.vel_x = -PADDLE_SPEED;
    }

    pub fn move_right(&mut self) {
        self.vel_x = PADDLE_SPEED;
    }

    pub fn stop(&mut self) {
        self.vel_x = 0;
    }

    pub fn advance(&mut self) {
        self.rect.pos.x += self.vel_x;
        self.clamp_to_field();
    }

    /// Grow by one bonus step. Never wider than the field.
    pub fn enlarge(&mut self) {
        self.rect.size.x = (self.rect.size.x + PADDLE_GROWTH).min(FIELD_WIDTH);
        self.clamp_to_field();
    }

    fn clamp_to_field(&mut self) {
        let max_x = FIELD_WIDTH - self.rect.width();
        self.rect.pos.x = self.rect.pos.x.clamp(0, max_x);
    }
}

/// Cosmetic palette for normal bricks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickColor {
    Red,
    Orange,
    Yellow,
    Green,
    Cyan,
}

/// Brick variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickKind {
    Normal(BrickColor),
    Unbreakable,
    Exploding,
    Bonus,
}

/// What a destroy attempt did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestroyOutcome {
    /// Unbreakable brick; nothing changed
    Deflected,
    /// Already gone; nothing changed
    AlreadyDestroyed,
    Destroyed,
    /// Exploding brick went off. Only the brick itself is destroyed.
    Exploded,
    /// Bonus brick; the paddle should grow
    Bonus,
}

impl DestroyOutcome {
    /// True when this attempt flipped the brick from alive to destroyed
    pub fn became_destroyed(&self) -> bool {
        matches!(
            self,
            DestroyOutcome::Destroyed | DestroyOutcome::Exploded | DestroyOutcome::Bonus
        )
    }
}

/// A brick entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    pub kind: BrickKind,
    destroyed: bool,
}

impl Brick {
    pub fn new(x: i32, y: i32, kind: BrickKind) -> Self {
        Self {
            rect: Rect::new(x, y, BRICK_WIDTH, BRICK_HEIGHT),
            kind,
            destroyed: false,
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Apply a destroy attempt according to the brick's kind
    pub fn destroy(&mut self) -> DestroyOutcome {
        if self.kind == BrickKind::Unbreakable {
            log::debug!(
                "Unbreakable brick at ({}, {}) deflected the ball",
                self.rect.left(),
                self.rect.top()
            );
            return DestroyOutcome::Deflected;
        }
        if self.destroyed {
            return DestroyOutcome::AlreadyDestroyed;
        }
        self.destroyed = true;

        match self.kind {
            BrickKind::Exploding => {
                log::info!(
                    "Explosion triggered at ({}, {})",
                    self.rect.left(),
                    self.rect.top()
                );
                DestroyOutcome::Exploded
            }
            BrickKind::Bonus => {
                log::info!("Bonus activated!");
                DestroyOutcome::Bonus
            }
            _ => DestroyOutcome::Destroyed,
        }
    }
}

/// Notifications for the front end, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    BrickDestroyed { kind: BrickKind, score: u64 },
    Explosion { pos: IVec2 },
    PaddleEnlarged { width: i32 },
    UnbreakableHit,
    BallLost { lives_left: u8 },
    GameOver { score: u64 },
    BoardCleared { boards_cleared: u32 },
    Paused,
    Resumed,
    Restarted,
    ReturnToMenu,
}

/// Complete session state for one playthrough
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub difficulty: Difficulty,
    pub lives: u8,
    pub score: u64,
    /// Simulation tick counter (paused ticks excluded)
    pub time_ticks: u64,
    /// Boards regenerated after being emptied
    pub boards_cleared: u32,
    pub phase: GamePhase,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Bricks in generation order (row-major)
    pub bricks: Vec<Brick>,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session at the given difficulty
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let bricks = generate_level(difficulty, &mut rng);
        let paddle = Paddle::default();
        let ball = Ball::spawn_above(&paddle, difficulty.ball_speed());

        log::info!(
            "New session: difficulty {} (level {}), seed {}",
            difficulty.as_str(),
            difficulty.level(),
            seed
        );

        Self {
            seed,
            rng,
            difficulty,
            lives: STARTING_LIVES,
            score: 0,
            time_ticks: 0,
            boards_cleared: 0,
            phase: GamePhase::Playing,
            paddle,
            ball,
            bricks,
            events: Vec::new(),
        }
    }

    /// Replace the board with a freshly generated one at the same difficulty
    pub fn regenerate_level(&mut self) {
        self.bricks = generate_level(self.difficulty, &mut self.rng);
    }

    /// Put a new ball above the paddle at the difficulty's speed
    pub fn respawn_ball(&mut self) {
        self.ball = Ball::spawn_above(&self.paddle, self.difficulty.ball_speed());
    }

    /// Start a fresh playthrough at the current difficulty
    pub fn restart(&mut self) {
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.boards_cleared = 0;
        self.phase = GamePhase::Playing;
        self.paddle = Paddle::default();
        self.respawn_ball();
        self.regenerate_level();
        self.push_event(GameEvent::Restarted);
        log::info!("Session restarted at {}", self.difficulty.as_str());
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Pending events since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_difficulty_tiers() {
        assert_eq!(Difficulty::Easy.brick_rows(), 3);
        assert_eq!(Difficulty::Medium.brick_rows(), 6);
        assert_eq!(Difficulty::Hard.brick_rows(), 9);
        assert!(Difficulty::Easy.ball_speed() < Difficulty::Medium.ball_speed());
        assert!(Difficulty::Medium.ball_speed() < Difficulty::Hard.ball_speed());
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!(Difficulty::from_str("Hard"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str(" med "), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_str("1"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_str("extreme"), None);
        assert_eq!(Difficulty::from_level(3), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_level(0), None);
    }

    #[test]
    fn test_new_session() {
        let state = GameState::new(Difficulty::Easy, 7);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.ball.vel, IVec2::new(3, -3));
        assert_eq!(state.bricks.len(), 3 * 11);
        // Ball sits centered on top of the paddle
        assert_eq!(state.ball.rect.bottom(), state.paddle.rect.top());
        assert_eq!(state.ball.rect.center_x(), state.paddle.rect.center_x());
    }

    #[test]
    fn test_ball_reflects_off_side_walls() {
        let mut ball = Ball {
            rect: Rect::new(FIELD_WIDTH - BALL_SIZE - 2, 300, BALL_SIZE, BALL_SIZE),
            vel: IVec2::new(4, 4),
        };
        ball.advance();
        assert_eq!(ball.vel.x, -4);
        // Not clamped: overlaps the wall by the overshoot
        assert_eq!(ball.rect.left(), FIELD_WIDTH - BALL_SIZE + 2);

        let mut ball = Ball {
            rect: Rect::new(2, 300, BALL_SIZE, BALL_SIZE),
            vel: IVec2::new(-4, 4),
        };
        ball.advance();
        assert_eq!(ball.vel.x, 4);
        assert_eq!(ball.rect.left(), -2);
    }

    #[test]
    fn test_ball_reflects_off_top_only() {
        let mut ball = Ball {
            rect: Rect::new(300, 2, BALL_SIZE, BALL_SIZE),
            vel: IVec2::new(3, -3),
        };
        ball.advance();
        assert_eq!(ball.rect.top(), 0);
        assert_eq!(ball.vel.y, 3);

        let mut ball = Ball {
            rect: Rect::new(300, FIELD_HEIGHT - 1, BALL_SIZE, BALL_SIZE),
            vel: IVec2::new(3, 3),
        };
        ball.advance();
        assert_eq!(ball.vel.y, 3);
        assert!(ball.rect.top() > FIELD_HEIGHT);
    }

    #[test]
    fn test_paddle_clamped() {
        let mut paddle = Paddle::default();
        paddle.move_left();
        for _ in 0..200 {
            paddle.advance();
        }
        assert_eq!(paddle.rect.left(), 0);

        paddle.move_right();
        for _ in 0..200 {
            paddle.advance();
        }
        assert_eq!(paddle.rect.right(), FIELD_WIDTH);

        paddle.stop();
        let x = paddle.rect.left();
        paddle.advance();
        assert_eq!(paddle.rect.left(), x);
    }

    #[test]
    fn test_paddle_enlarge_keeps_in_field() {
        let mut paddle = Paddle::default();
        paddle.rect.pos.x = FIELD_WIDTH - paddle.rect.width();
        paddle.enlarge();
        assert_eq!(paddle.rect.width(), PADDLE_WIDTH + PADDLE_GROWTH);
        assert_eq!(paddle.rect.right(), FIELD_WIDTH);

        for _ in 0..100 {
            paddle.enlarge();
        }
        assert_eq!(paddle.rect.width(), FIELD_WIDTH);
        assert_eq!(paddle.rect.left(), 0);
    }

    #[test]
    fn test_normal_brick_destroy() {
        let mut brick = Brick::new(0, 0, BrickKind::Normal(BrickColor::Red));
        assert_eq!(brick.destroy(), DestroyOutcome::Destroyed);
        assert!(brick.is_destroyed());
        assert_eq!(brick.destroy(), DestroyOutcome::AlreadyDestroyed);
    }

    #[test]
    fn test_destroy_outcome_flags() {
        assert!(DestroyOutcome::Bonus.became_destroyed());
        assert!(DestroyOutcome::Exploded.became_destroyed());
        assert!(!DestroyOutcome::Deflected.became_destroyed());
        assert!(!DestroyOutcome::AlreadyDestroyed.became_destroyed());
    }

    #[test]
    fn test_drain_events() {
        let mut state = GameState::new(Difficulty::Medium, 1);
        state.push_event(GameEvent::Paused);
        assert_eq!(state.events().len(), 1);
        assert_eq!(state.drain_events(), vec![GameEvent::Paused]);
        assert!(state.events().is_empty());
    }

    proptest! {
        #[test]
        fn prop_unbreakable_never_destroyed(attempts in 1usize..50) {
            let mut brick = Brick::new(0, 0, BrickKind::Unbreakable);
            for _ in 0..attempts {
                prop_assert_eq!(brick.destroy(), DestroyOutcome::Deflected);
            }
            prop_assert!(!brick.is_destroyed());
        }

        #[test]
        fn prop_special_bricks_destroy_once(attempts in 1usize..50, bonus in any::<bool>()) {
            let kind = if bonus { BrickKind::Bonus } else { BrickKind::Exploding };
            let mut brick = Brick::new(0, 0, kind);
            let transitions = (0..attempts)
                .filter(|_| brick.destroy().became_destroyed())
                .count();
            prop_assert_eq!(transitions, 1);
            prop_assert!(brick.is_destroyed());
        }
    }
}
