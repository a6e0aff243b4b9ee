//! Fixed tick simulation step
//!
//! Core game loop that advances the session deterministically. One call per
//! timer tick; inputs gathered since the previous tick arrive together.

use super::collision::resolve_collisions;
use super::state::{DestroyOutcome, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Paddle steering request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddleCommand {
    Left,
    Right,
    Stop,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Latest steering request, if any
    pub paddle: Option<PaddleCommand>,
    /// Pause toggle
    pub pause: bool,
    /// Start over (game over only)
    pub restart: bool,
    /// Leave the session (game over only)
    pub menu: bool,
}

impl TickInput {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Advance the game state by one fixed tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase == GamePhase::GameOver {
        if input.restart {
            state.restart();
        } else if input.menu {
            log::info!("Returning to menu with score {}", state.score);
            state.push_event(GameEvent::ReturnToMenu);
        }
        return;
    }

    match input.paddle {
        Some(PaddleCommand::Left) => state.paddle.move_left(),
        Some(PaddleCommand::Right) => state.paddle.move_right(),
        Some(PaddleCommand::Stop) => state.paddle.stop(),
        None => {}
    }

    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                state.push_event(GameEvent::Paused);
                log::info!("Paused");
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                state.push_event(GameEvent::Resumed);
                log::info!("Resumed");
            }
            GamePhase::GameOver => {}
        }
    }

    if state.phase == GamePhase::Paused {
        return;
    }

    state.time_ticks += 1;

    state.ball.advance();
    state.paddle.advance();

    let report = resolve_collisions(&mut state.ball, &mut state.paddle, &mut state.bricks);

    if let Some(hit) = report.brick_hit {
        if hit.outcome.became_destroyed() {
            state.score += POINTS_PER_BRICK;
            state.push_event(GameEvent::BrickDestroyed {
                kind: hit.kind,
                score: state.score,
            });
        }
        match hit.outcome {
            DestroyOutcome::Exploded => {
                let pos = state.bricks[hit.index].rect.pos;
                state.push_event(GameEvent::Explosion { pos });
            }
            DestroyOutcome::Bonus => {
                state.push_event(GameEvent::PaddleEnlarged {
                    width: state.paddle.rect.width(),
                });
            }
            DestroyOutcome::Deflected => state.push_event(GameEvent::UnbreakableHit),
            _ => {}
        }
    }

    state.bricks.retain(|b| !b.is_destroyed());

    if state.bricks.is_empty() {
        state.boards_cleared += 1;
        log::info!(
            "Board cleared ({} so far), generating another {} board",
            state.boards_cleared,
            state.difficulty.as_str()
        );
        state.regenerate_level();
        state.push_event(GameEvent::BoardCleared {
            boards_cleared: state.boards_cleared,
        });
    }

    if state.ball.rect.top() > FIELD_HEIGHT {
        lose_ball(state);
    }
}

fn lose_ball(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    state.push_event(GameEvent::BallLost {
        lives_left: state.lives,
    });

    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        state.push_event(GameEvent::GameOver { score: state.score });
        log::info!("Game over with score {}", state.score);
    } else {
        log::info!("Ball lost, {} lives left", state.lives);
        state.respawn_ball();
    }
}
