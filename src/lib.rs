//! Brick Breaker - A single-screen arcade brick breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, level generation, game state)
//! - `settings`: Layered configuration (defaults, env JSON, command line)
//! - `highscores`: In-memory leaderboard for the current process
//! - `shell`: Terminal front end (menu, input, rendering)

pub mod highscores;
pub mod settings;
pub mod shell;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;
pub use sim::Difficulty;

/// Game configuration constants
pub mod consts {
    /// Default fixed tick interval in milliseconds
    pub const TICK_INTERVAL_MS: u64 = 10;

    /// Play field dimensions
    pub const FIELD_WIDTH: i32 = 800;
    pub const FIELD_HEIGHT: i32 = 600;

    /// Ball defaults
    pub const BALL_SIZE: i32 = 20;

    /// Paddle defaults
    pub const PADDLE_START_X: i32 = 350;
    pub const PADDLE_Y: i32 = 550;
    pub const PADDLE_WIDTH: i32 = 120;
    pub const PADDLE_HEIGHT: i32 = 15;
    pub const PADDLE_SPEED: i32 = 7;
    /// Width gained per bonus brick
    pub const PADDLE_GROWTH: i32 = 20;

    /// Brick grid layout
    pub const BRICK_WIDTH: i32 = 60;
    pub const BRICK_HEIGHT: i32 = 20;
    pub const GRID_LEFT: i32 = 20;
    pub const GRID_RIGHT: i32 = 720;
    pub const GRID_TOP: i32 = 50;
    pub const COLUMN_PITCH: i32 = 70;
    pub const ROW_PITCH: i32 = 30;
    pub const ROWS_PER_DIFFICULTY: u32 = 3;

    /// Session rules
    pub const STARTING_LIVES: u8 = 3;
    pub const POINTS_PER_BRICK: u64 = 10;
}
