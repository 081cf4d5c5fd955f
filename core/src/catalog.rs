use serde::Serialize;

use crate::*;

/// One configured puzzle: grid layout, start, target, obstacles, and move budget.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PuzzleVariant {
    pub id: u8,
    pub name: &'static str,
    pub description: &'static str,
    pub start: Coord2,
    pub target: Coord2,
    pub obstacles: &'static [Obstacle],
    pub hint: &'static str,
    pub max_moves: u16,
}

impl PuzzleVariant {
    pub fn obstacle_at(&self, coords: Coord2) -> Option<ObstacleKind> {
        self.obstacles
            .iter()
            .find(|obstacle| obstacle.pos == coords)
            .map(|obstacle| obstacle.kind)
    }
}

/// Built-in puzzles, in the order the player unlocks them.
pub const CATALOG: &[PuzzleVariant] = &[
    PuzzleVariant {
        id: 1,
        name: "First Steps",
        description: "Guide the coder to the goal in the far corner.",
        start: (0, 0),
        target: (4, 4),
        obstacles: &[],
        hint: "Try move_right() four times, then move_down() four times.",
        max_moves: 8,
    },
    PuzzleVariant {
        id: 2,
        name: "The Wall",
        description: "A wall blocks the direct path. Find a way around it.",
        start: (0, 2),
        target: (4, 2),
        obstacles: &[Obstacle::wall(2, 1), Obstacle::wall(2, 2), Obstacle::wall(2, 3)],
        hint: "Walls send you back to the start. Go up first, then right.",
        max_moves: 10,
    },
    PuzzleVariant {
        id: 3,
        name: "Trap Field",
        description: "Traps are scattered across the field. Stay on safe ground.",
        start: (0, 4),
        target: (4, 0),
        obstacles: &[
            Obstacle::trap(1, 3),
            Obstacle::trap(2, 2),
            Obstacle::trap(3, 1),
            Obstacle::wall(3, 4),
        ],
        hint: "The diagonal is trapped. Follow the edges of the grid.",
        max_moves: 10,
    },
    PuzzleVariant {
        id: 4,
        name: "The Maze",
        description: "Walls and traps together. Plan every step before you run.",
        start: (0, 0),
        target: (4, 4),
        obstacles: &[
            Obstacle::wall(1, 0),
            Obstacle::wall(1, 1),
            Obstacle::wall(1, 2),
            Obstacle::wall(3, 2),
            Obstacle::wall(3, 3),
            Obstacle::wall(3, 4),
            Obstacle::trap(3, 0),
            Obstacle::trap(2, 4),
        ],
        hint: "Down three, right two, up two, right two, then down to the goal.",
        max_moves: 14,
    },
];

pub fn variant(index: usize) -> Result<&'static PuzzleVariant> {
    CATALOG.get(index).ok_or(GameError::InvalidVariant(index))
}
