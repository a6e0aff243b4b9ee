//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only, no delta time
//! - Seeded RNG only
//! - Stable iteration order (bricks kept in generation order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod level;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{BrickHit, CollisionReport, resolve_collisions};
pub use level::{BRICK_PALETTE, generate_level};
pub use rect::Rect;
pub use state::{
    Ball, Brick, BrickColor, BrickKind, DestroyOutcome, Difficulty, GameEvent, GamePhase, GameState,
    Paddle,
};
pub use tick::{PaddleCommand, TickInput, tick};
