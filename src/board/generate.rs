//! Random map generation.
//!
//! The interior `(rows-2) x (cols-2)` cells are filled from one shuffled
//! multiset:
//!
//! 1. `N / divisor` prop slots (`N` = interior cell count),
//! 2. pairs of block types drawn uniformly from `0..block_kinds` for the rest,
//! 3. a Fisher-Yates shuffle over the combined multiset,
//! 4. row-major placement, each prop slot receiving a kind as it is placed.
//!
//! If the remainder after props is odd, the last interior cell has nothing
//! left to take and stays `Empty`.
//!
//! Generation does not check that the map is solvable under the two-turn
//! rule; a round may need a Shuffle prop to finish.

use crate::core::{GameConfig, GameRng, Pos};
use crate::props::PropKind;

use super::cell::Cell;
use super::grid::Board;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    Prop,
    Block(u8),
}

impl Board {
    /// Generate a fresh map for `config` using `rng`.
    #[must_use]
    pub fn generate(config: &GameConfig, rng: &mut GameRng) -> Self {
        let mut board = Board::new(config.rows, config.cols);
        let interior = config.rows.saturating_sub(2) * config.cols.saturating_sub(2);
        let prop_count = interior / config.prop_density_divisor.max(1);
        let pair_count = (interior - prop_count) / 2;

        let mut slots: Vec<Slot> = Vec::with_capacity(prop_count + pair_count * 2);
        slots.extend(std::iter::repeat(Slot::Prop).take(prop_count));
        for _ in 0..pair_count {
            let t = rng.below(usize::from(config.block_kinds.max(1))) as u8;
            slots.push(Slot::Block(t));
            slots.push(Slot::Block(t));
        }

        rng.shuffle(&mut slots);

        let draws = PropKind::generation_draws(config.mode);
        for row in 1..config.rows.saturating_sub(1) {
            for col in 1..config.cols.saturating_sub(1) {
                let cell = match slots.pop() {
                    Some(Slot::Block(t)) => Cell::Block(t),
                    Some(Slot::Prop) => {
                        let drawn = draws[rng.below(draws.len())];
                        Cell::Prop(drawn.remap_for_generation(config.mode))
                    }
                    None => Cell::Empty,
                };
                board.fill_interior(Pos::new(row, col), cell);
            }
        }

        log::debug!(
            "generated {}x{} map: {} props, {} pairs",
            config.rows,
            config.cols,
            prop_count,
            pair_count
        );
        board
    }
}
