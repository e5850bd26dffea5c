//! Cell contents.

use serde::{Deserialize, Serialize};

use crate::props::PropKind;

/// Save-file code for an empty (or border) cell.
pub const EMPTY_CODE: i32 = -1;
/// Save-file code for a prop cell.
pub const PROP_CODE: i32 = -2;

/// The contents of one board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Open floor.
    Empty,
    /// The outer ring. Behaves as `Empty` but is never filled by generation
    /// or spawning.
    Border,
    /// A removable tile of the given type.
    Block(u8),
    /// A collectible prop.
    Prop(PropKind),
}

impl Cell {
    /// Whether paths and players may pass through this cell.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Empty | Self::Border)
    }

    #[must_use]
    pub const fn block_type(self) -> Option<u8> {
        match self {
            Self::Block(t) => Some(t),
            _ => None,
        }
    }

    #[must_use]
    pub const fn prop_kind(self) -> Option<PropKind> {
        match self {
            Self::Prop(kind) => Some(kind),
            _ => None,
        }
    }

    /// The save-file code: `-1` open, `-2` prop, `>= 0` block type.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Empty | Self::Border => EMPTY_CODE,
            Self::Prop(_) => PROP_CODE,
            Self::Block(t) => t as i32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(Cell::Empty.code(), -1);
        assert_eq!(Cell::Border.code(), -1);
        assert_eq!(Cell::Prop(PropKind::Hint).code(), -2);
        assert_eq!(Cell::Block(2).code(), 2);
    }

    #[test]
    fn test_open_cells() {
        assert!(Cell::Empty.is_open());
        assert!(Cell::Border.is_open());
        assert!(!Cell::Block(0).is_open());
        assert!(!Cell::Prop(PropKind::Shuffle).is_open());
    }
}
