//! Grid addressing: cell positions, movement directions and axes.
//!
//! ## Coordinates
//!
//! Cells are addressed as `(row, col)` with `(0, 0)` at the top-left.
//! Row 0, column 0 and the last row/column form the border ring.
//!
//! ## Directions
//!
//! Movement deltas follow the input convention `(dx, dy)`: `dx` moves
//! along columns, `dy` along rows. A move from `(row, col)` by `(dx, dy)`
//! lands on `(row + dy, col + dx)`.
//!
//! ```
//! use pairlink::core::{Direction, Pos};
//!
//! let pos = Pos::new(1, 1);
//! assert_eq!(pos.step(Direction::Right, 4, 4), Some(Pos::new(1, 2)));
//! assert_eq!(pos.step(Direction::Up, 4, 4), Some(Pos::new(0, 1)));
//! assert_eq!(Pos::new(0, 0).step(Direction::Left, 4, 4), None);
//! ```

use serde::{Deserialize, Serialize};

/// A cell address on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    /// Create a new position.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row-major index into a grid with `cols` columns.
    #[must_use]
    pub const fn index(self, cols: usize) -> usize {
        self.row * cols + self.col
    }

    /// Inverse of [`Pos::index`].
    #[must_use]
    pub const fn from_index(index: usize, cols: usize) -> Self {
        Self {
            row: index / cols,
            col: index % cols,
        }
    }

    /// Whether this position lies inside a `rows x cols` grid.
    #[must_use]
    pub const fn in_bounds(self, rows: usize, cols: usize) -> bool {
        self.row < rows && self.col < cols
    }

    /// Move one cell in `dir`, or `None` if that leaves the grid.
    #[must_use]
    pub fn step(self, dir: Direction, rows: usize, cols: usize) -> Option<Self> {
        self.offset(dir.delta(), rows, cols)
    }

    /// Apply a raw `(dx, dy)` delta, or `None` if that leaves the grid.
    #[must_use]
    pub fn offset(self, (dx, dy): (i32, i32), rows: usize, cols: usize) -> Option<Self> {
        let row = i64::try_from(self.row).ok()? + i64::from(dy);
        let col = i64::try_from(self.col).ok()? + i64::from(dx);
        if row < 0 || col < 0 {
            return None;
        }
        let pos = Self::new(usize::try_from(row).ok()?, usize::try_from(col).ok()?);
        pos.in_bounds(rows, cols).then_some(pos)
    }

    /// The direction of an orthogonally adjacent cell, if `other` is one.
    #[must_use]
    pub fn direction_to(self, other: Pos) -> Option<Direction> {
        let dy = other.row as i64 - self.row as i64;
        let dx = other.col as i64 - self.col as i64;
        Direction::from_delta(i32::try_from(dx).ok()?, i32::try_from(dy).ok()?)
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Movement axis. A path "turns" whenever it changes axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// One of the four orthogonal directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Fixed enumeration order used by every grid search: left, right, up, down.
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Up, Self::Down];

    /// `(dx, dy)` for this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::Up => (0, -1),
            Self::Down => (0, 1),
        }
    }

    /// Parse a unit `(dx, dy)` delta.
    #[must_use]
    pub const fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (-1, 0) => Some(Self::Left),
            (1, 0) => Some(Self::Right),
            (0, -1) => Some(Self::Up),
            (0, 1) => Some(Self::Down),
            _ => None,
        }
    }

    /// The opposite direction (used for dizzy players).
    #[must_use]
    pub const fn inverted(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::Horizontal,
            Self::Up | Self::Down => Axis::Vertical,
        }
    }
}
