#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use catalog::*;
pub use engine::*;
pub use error::*;
pub use interpreter::*;
pub use tile::*;
pub use types::*;

mod catalog;
mod engine;
mod error;
mod interpreter;
mod tile;
mod types;

/// Points awarded before any move is counted.
pub const SCORE_BASE: i32 = 1000;
/// Points lost for every accepted move.
pub const SCORE_PER_MOVE: i32 = 50;
/// Bonus for each variant index past the first.
pub const SCORE_PER_VARIANT: i32 = 200;
/// Lowest score a completed puzzle can award.
pub const SCORE_FLOOR: i32 = 100;

pub fn score_for(moves_used: u16, variant_index: usize) -> u32 {
    let variant_index = i32::try_from(variant_index).unwrap_or(i32::MAX / SCORE_PER_VARIANT);
    let raw = SCORE_BASE
        .saturating_sub(i32::from(moves_used).saturating_mul(SCORE_PER_MOVE))
        .saturating_add(variant_index.saturating_mul(SCORE_PER_VARIANT));
    raw.max(SCORE_FLOOR).unsigned_abs()
}

/// Validated grid of tiles for a single variant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PuzzleLayout {
    tiles: Array2<Tile>,
    start: Coord2,
    target: Coord2,
}

impl PuzzleLayout {
    pub fn from_variant(variant: &PuzzleVariant) -> Result<Self> {
        let size = (GRID_SIZE, GRID_SIZE);
        let mut tiles: Array2<Tile> = Array2::default(size.to_nd_index());

        for obstacle in variant.obstacles {
            if !in_bounds(obstacle.pos, size) {
                return Err(GameError::InvalidCoords);
            }
            tiles[obstacle.pos.to_nd_index()] = obstacle.kind.into();
        }

        if !in_bounds(variant.start, size) || !in_bounds(variant.target, size) {
            return Err(GameError::InvalidCoords);
        }
        if variant.start == variant.target
            || tiles[variant.start.to_nd_index()].obstacle().is_some()
            || tiles[variant.target.to_nd_index()].obstacle().is_some()
        {
            return Err(GameError::InvalidLayout);
        }
        tiles[variant.target.to_nd_index()] = Tile::Target;

        Ok(Self {
            tiles,
            start: variant.start,
            target: variant.target,
        })
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size()) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.tiles.dim();
        (
            dim.0.try_into().unwrap_or(Coord::MAX),
            dim.1.try_into().unwrap_or(Coord::MAX),
        )
    }

    pub fn start(&self) -> Coord2 {
        self.start
    }

    pub fn target(&self) -> Coord2 {
        self.target
    }

    pub fn obstacle_at(&self, coords: Coord2) -> Option<ObstacleKind> {
        self[coords].obstacle()
    }

    pub fn tiles(&self) -> &Array2<Tile> {
        &self.tiles
    }

    /// Neighbor of `coords` in `direction`, if it is still on the grid.
    pub fn step_from(&self, coords: Coord2, direction: Direction) -> Option<Coord2> {
        apply_delta(coords, direction.delta(), self.size())
    }
}

impl Index<Coord2> for PuzzleLayout {
    type Output = Tile;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.tiles[(x as usize, y as usize)]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// The player advanced one cell.
    Accepted,
    /// The move would leave the grid; nothing changed.
    Rejected,
    /// The player hit a wall or trap and went back to the start.
    Reset,
    /// The puzzle no longer accepts moves.
    Blocked,
}

impl MoveOutcome {
    pub const fn has_update(self) -> bool {
        use MoveOutcome::*;
        match self {
            Accepted => true,
            Reset => true,
            Rejected => false,
            Blocked => false,
        }
    }
}
