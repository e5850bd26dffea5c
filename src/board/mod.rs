//! Board state: the bordered grid of empty cells, blocks and props.
//!
//! The board owns every cell exclusively. It knows nothing about players
//! or paths; callers ask the [`crate::path`] engine whether two blocks
//! connect before calling [`Board::remove_pair`].

mod cell;
mod generate;
mod grid;

pub use cell::{Cell, EMPTY_CODE, PROP_CODE};
pub use grid::Board;
