//! Collision detection and response
//!
//! Plain AABB overlap plus a vertical velocity flip. The paddle is checked
//! first, then the bricks; at most one brick is touched per tick and the
//! ball's vertical velocity flips at most once.

use super::state::{Ball, Brick, BrickKind, DestroyOutcome, Paddle};

/// A brick touched this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrickHit {
    /// Index into the brick list before compaction
    pub index: usize,
    pub kind: BrickKind,
    pub outcome: DestroyOutcome,
}

/// Result of one collision pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub paddle_hit: bool,
    pub brick_hit: Option<BrickHit>,
}

impl CollisionReport {
    /// Whether the ball was deflected this tick
    pub fn deflected(&self) -> bool {
        self.paddle_hit || self.brick_hit.is_some()
    }
}

/// Ball descending onto the paddle: bottom edge inside the paddle's vertical
/// band with horizontal overlap
pub fn ball_hits_paddle(ball: &Ball, paddle: &Paddle) -> bool {
    let bottom = ball.rect.bottom();
    ball.vel.y > 0
        && bottom >= paddle.rect.top()
        && bottom <= paddle.rect.bottom()
        && ball.rect.overlaps_horizontally(&paddle.rect)
}

/// First live brick overlapping the ball, in stored order
pub fn first_brick_hit(ball: &Ball, bricks: &[Brick]) -> Option<usize> {
    bricks
        .iter()
        .position(|brick| !brick.is_destroyed() && ball.rect.overlaps(&brick.rect))
}

/// Resolve paddle then brick contact for this tick
pub fn resolve_collisions(ball: &mut Ball, paddle: &mut Paddle, bricks: &mut [Brick]) -> CollisionReport {
    let mut report = CollisionReport::default();

    if ball_hits_paddle(ball, paddle) {
        ball.reverse_y();
        // Seat the ball on the paddle so it can't sink in and re-trigger
        ball.rect.pos.y = paddle.rect.top() - ball.rect.height();
        report.paddle_hit = true;
    }

    if let Some(index) = first_brick_hit(ball, bricks) {
        let brick = &mut bricks[index];
        let outcome = brick.destroy();
        if !report.paddle_hit {
            ball.reverse_y();
        }
        if outcome == DestroyOutcome::Bonus {
            paddle.enlarge();
        }
        log::debug!(
            "Ball hit {:?} brick at ({}, {}): {:?}",
            brick.kind,
            brick.rect.left(),
            brick.rect.top(),
            outcome
        );
        report.brick_hit = Some(BrickHit {
            index,
            kind: brick.kind,
            outcome,
        });
    }

    report
}
