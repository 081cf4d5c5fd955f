use serde::{Deserialize, Serialize};

use crate::{Coord, Coord2};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Wall,
    Trap,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Coord2,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub const fn wall(x: Coord, y: Coord) -> Self {
        Self {
            pos: (x, y),
            kind: ObstacleKind::Wall,
        }
    }

    pub const fn trap(x: Coord, y: Coord) -> Self {
        Self {
            pos: (x, y),
            kind: ObstacleKind::Trap,
        }
    }
}

/// What a grid cell shows, independent of where the player stands.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Open,
    Wall,
    Trap,
    Target,
}

impl Tile {
    pub const fn obstacle(self) -> Option<ObstacleKind> {
        match self {
            Self::Wall => Some(ObstacleKind::Wall),
            Self::Trap => Some(ObstacleKind::Trap),
            Self::Open | Self::Target => None,
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::Open
    }
}

impl From<ObstacleKind> for Tile {
    fn from(kind: ObstacleKind) -> Self {
        match kind {
            ObstacleKind::Wall => Self::Wall,
            ObstacleKind::Trap => Self::Trap,
        }
    }
}
