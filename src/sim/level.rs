//! Random brick board generation
//!
//! Boards are a full grid: one brick per cell, row-major order. Each cell
//! draws its variant from `0..12` and, for normal bricks, a second draw picks
//! the color. Keeping the draw order fixed makes seeded boards reproducible.

use rand::Rng;

use super::state::{Brick, BrickColor, BrickKind, Difficulty};
use crate::consts::*;

/// Colors a normal brick may take
pub const BRICK_PALETTE: [BrickColor; 5] = [
    BrickColor::Red,
    BrickColor::Orange,
    BrickColor::Yellow,
    BrickColor::Green,
    BrickColor::Cyan,
];

/// Number of outcomes in a variant draw
const VARIANT_ROLL: u32 = 12;

/// Generate a full board for the given difficulty
pub fn generate_level<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Vec<Brick> {
    let rows = difficulty.brick_rows() as i32;
    let columns: Vec<i32> = (GRID_LEFT..=GRID_RIGHT)
        .step_by(COLUMN_PITCH as usize)
        .collect();

    let mut bricks = Vec::with_capacity(rows as usize * columns.len());
    for row in 0..rows {
        let y = GRID_TOP + row * ROW_PITCH;
        for &x in &columns {
            let kind = roll_brick_kind(rng);
            bricks.push(Brick::new(x, y, kind));
        }
    }

    log::info!(
        "Generated {} board: {} rows x {} columns = {} bricks",
        difficulty.as_str(),
        rows,
        columns.len(),
        bricks.len()
    );

    bricks
}

fn roll_brick_kind<R: Rng + ?Sized>(rng: &mut R) -> BrickKind {
    match rng.random_range(0..VARIANT_ROLL) {
        0 => BrickKind::Exploding,
        1 => BrickKind::Unbreakable,
        2 => BrickKind::Bonus,
        _ => BrickKind::Normal(BRICK_PALETTE[rng.random_range(0..BRICK_PALETTE.len())]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_grid_dimensions() {
        let mut rng = Pcg32::seed_from_u64(1);
        for difficulty in Difficulty::ALL {
            let bricks = generate_level(difficulty, &mut rng);
            assert_eq!(bricks.len(), difficulty.brick_rows() as usize * 11);
            assert!(bricks.iter().all(|b| !b.is_destroyed()));
        }
    }

    #[test]
    fn test_row_major_layout() {
        let mut rng = Pcg32::seed_from_u64(2);
        let bricks = generate_level(Difficulty::Easy, &mut rng);

        let first = &bricks[0];
        assert_eq!((first.rect.left(), first.rect.top()), (GRID_LEFT, GRID_TOP));
        let second = &bricks[1];
        assert_eq!((second.rect.left(), second.rect.top()), (GRID_LEFT + COLUMN_PITCH, GRID_TOP));
        let last_of_row = &bricks[10];
        assert_eq!(last_of_row.rect.left(), GRID_RIGHT);
        let next_row = &bricks[11];
        assert_eq!((next_row.rect.left(), next_row.rect.top()), (GRID_LEFT, GRID_TOP + ROW_PITCH));
    }

    #[test]
    fn test_seeded_boards_match() {
        let a = generate_level(Difficulty::Hard, &mut Pcg32::seed_from_u64(42));
        let b = generate_level(Difficulty::Hard, &mut Pcg32::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_variant_mix() {
        // Over many boards every variant shows up and normals dominate
        let mut rng = Pcg32::seed_from_u64(3);
        let mut counts = [0usize; 4];
        for _ in 0..50 {
            for brick in generate_level(Difficulty::Hard, &mut rng) {
                let slot = match brick.kind {
                    BrickKind::Normal(_) => 0,
                    BrickKind::Unbreakable => 1,
                    BrickKind::Exploding => 2,
                    BrickKind::Bonus => 3,
                };
                counts[slot] += 1;
            }
        }
        assert!(counts[1..].iter().all(|&c| c > 0));
        assert!(counts[0] > counts[1] + counts[2] + counts[3]);
    }
}
