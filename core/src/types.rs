use core::fmt;
use serde::{Deserialize, Serialize};

/// Single coordinate axis used for grid width, height, and positions.
pub type Coord = u8;

/// Two-dimensional coordinates `(x, y)`, `y` grows downward.
pub type Coord2 = (Coord, Coord);

/// Side length of every puzzle grid.
pub const GRID_SIZE: Coord = 5;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn in_bounds(coords: Coord2, bounds: Coord2) -> bool {
    coords.0 < bounds.0 && coords.1 < bounds.1
}

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
pub(crate) fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy)?;
    if next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Right,
    Left,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Right, Self::Left, Self::Up, Self::Down];

    pub const fn delta(self) -> (i8, i8) {
        use Direction::*;
        match self {
            Right => (1, 0),
            Left => (-1, 0),
            Up => (0, -1),
            Down => (0, 1),
        }
    }

    /// Script token that triggers this direction.
    pub const fn token(self) -> &'static str {
        use Direction::*;
        match self {
            Right => "move_right()",
            Left => "move_left()",
            Up => "move_up()",
            Down => "move_down()",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Direction::*;
        f.write_str(match self {
            Right => "right",
            Left => "left",
            Up => "up",
            Down => "down",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_delta_stays_in_bounds() {
        let bounds = (GRID_SIZE, GRID_SIZE);

        assert_eq!(apply_delta((0, 0), Direction::Left.delta(), bounds), None);
        assert_eq!(apply_delta((0, 0), Direction::Up.delta(), bounds), None);
        assert_eq!(apply_delta((4, 4), Direction::Right.delta(), bounds), None);
        assert_eq!(apply_delta((4, 4), Direction::Down.delta(), bounds), None);
        assert_eq!(
            apply_delta((2, 2), Direction::Up.delta(), bounds),
            Some((2, 1))
        );
        assert_eq!(
            apply_delta((2, 2), Direction::Right.delta(), bounds),
            Some((3, 2))
        );
    }

    #[test]
    fn nd_index_is_column_major_like_the_board() {
        assert_eq!((3, 1).to_nd_index(), [3, 1]);
    }
}
