//! Board storage and block operations.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{GameError, GameRng, Pos};
use crate::props::{Prop, PropKind};

use super::cell::Cell;

/// A bordered `rows x cols` grid.
///
/// Row/column 0 and the last row/column are the border ring. Props are
/// stored in their cell (`Cell::Prop(kind)`), so a prop cell always has
/// exactly one prop.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// Row-major cells.
    cells: Vec<Cell>,
}

impl Board {
    /// Create a board with a border ring and an empty interior.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        let cells = (0..rows * cols)
            .map(|i| {
                if is_border(Pos::from_index(i, cols), rows, cols) {
                    Cell::Border
                } else {
                    Cell::Empty
                }
            })
            .collect();
        Self { rows, cols, cells }
    }

    /// Create a board from row-major cells.
    ///
    /// Open cells on the outer ring are normalised to `Cell::Border`.
    pub fn from_cells(rows: usize, cols: usize, mut cells: Vec<Cell>) -> Result<Self, GameError> {
        if cells.len() != rows * cols {
            return Err(GameError::InvalidConfig(format!(
                "expected {} cells for {}x{}, got {}",
                rows * cols,
                rows,
                cols,
                cells.len()
            )));
        }
        for (i, cell) in cells.iter_mut().enumerate() {
            if cell.is_open() {
                *cell = if is_border(Pos::from_index(i, cols), rows, cols) {
                    Cell::Border
                } else {
                    Cell::Empty
                };
            }
        }
        Ok(Self { rows, cols, cells })
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.in_bounds(self.rows, self.cols)
    }

    /// Whether `pos` is on the outer ring.
    #[must_use]
    pub fn is_border(&self, pos: Pos) -> bool {
        is_border(pos, self.rows, self.cols)
    }

    /// The cell at `pos`, or `None` off the board.
    #[must_use]
    pub fn get(&self, pos: Pos) -> Option<Cell> {
        self.in_bounds(pos).then(|| self.cells[pos.index(self.cols)])
    }

    /// Whether `pos` is on the board and open (empty or border).
    #[must_use]
    pub fn is_open(&self, pos: Pos) -> bool {
        self.get(pos).is_some_and(Cell::is_open)
    }

    /// The block type at `pos`, if it holds a block.
    #[must_use]
    pub fn block_at(&self, pos: Pos) -> Option<u8> {
        self.get(pos).and_then(Cell::block_type)
    }

    /// The prop kind at `pos`, if it holds a prop.
    #[must_use]
    pub fn prop_at(&self, pos: Pos) -> Option<PropKind> {
        self.get(pos).and_then(Cell::prop_kind)
    }

    /// Overwrite a cell. Open cells on the ring are stored as `Border`.
    pub fn set(&mut self, pos: Pos, cell: Cell) -> Result<(), GameError> {
        if !self.in_bounds(pos) {
            return Err(GameError::OutOfBounds(pos));
        }
        let cell = match cell {
            Cell::Empty | Cell::Border if self.is_border(pos) => Cell::Border,
            Cell::Border => Cell::Empty,
            other => other,
        };
        self.cells[pos.index(self.cols)] = cell;
        Ok(())
    }

    /// Clear a cell back to open floor.
    /// Write a cell inside the border ring without validation.
    pub(super) fn fill_interior(&mut self, pos: Pos, cell: Cell) {
        debug_assert!(self.in_bounds(pos) && !self.is_border(pos));
        self.cells[pos.index(self.cols)] = cell;
    }

    fn clear(&mut self, pos: Pos) {
        let cell = if self.is_border(pos) { Cell::Border } else { Cell::Empty };
        self.cells[pos.index(self.cols)] = cell;
    }

    /// Iterate over every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.cells.len()).map(move |i| Pos::from_index(i, self.cols))
    }

    /// Iterate over `(pos, cell)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Pos, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (Pos::from_index(i, self.cols), cell))
    }

    /// Iterate over block cells in row-major order.
    pub fn blocks(&self) -> impl Iterator<Item = (Pos, u8)> + '_ {
        self.cells().filter_map(|(pos, cell)| cell.block_type().map(|t| (pos, t)))
    }

    /// Number of block cells.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.blocks().count()
    }

    /// Iterate over props in row-major order.
    pub fn props(&self) -> impl Iterator<Item = Prop> + '_ {
        self.cells()
            .filter_map(|(pos, cell)| cell.prop_kind().map(|kind| Prop { kind, pos }))
    }

    /// Interior cells that are `Empty` (never the border).
    #[must_use]
    pub fn empty_cells(&self) -> Vec<Pos> {
        self.cells()
            .filter(|&(_, cell)| cell == Cell::Empty)
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Put a prop on `pos`, replacing whatever was there.
    pub fn place_prop(&mut self, pos: Pos, kind: PropKind) -> Result<(), GameError> {
        self.set(pos, Cell::Prop(kind))
    }

    /// Remove and return the prop at `pos`, leaving the cell empty.
    pub fn take_prop(&mut self, pos: Pos) -> Option<PropKind> {
        let kind = self.prop_at(pos)?;
        self.clear(pos);
        Some(kind)
    }

    /// Remove a matching pair of blocks.
    ///
    /// Fails with `InvalidRemoval` unless `a` and `b` are distinct cells
    /// holding blocks of the same type. Connectivity is not checked here.
    pub fn remove_pair(&mut self, a: Pos, b: Pos) -> Result<(), GameError> {
        match (self.block_at(a), self.block_at(b)) {
            (Some(ta), Some(tb)) if ta == tb && a != b => {
                self.clear(a);
                self.clear(b);
                Ok(())
            }
            _ => Err(GameError::InvalidRemoval(a, b)),
        }
    }

    /// True iff no cell holds a block.
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.blocks().next().is_none()
    }

    /// True iff two distinct block cells share a type.
    ///
    /// Ignores connectivity: a necessary, not sufficient, condition for
    /// another match being possible.
    #[must_use]
    pub fn has_any_matchable_pair(&self) -> bool {
        let mut seen: FxHashMap<u8, usize> = FxHashMap::default();
        for (_, t) in self.blocks() {
            let count = seen.entry(t).or_insert(0);
            *count += 1;
            if *count >= 2 {
                return true;
            }
        }
        false
    }

    /// Randomly permute block types across the current block cells.
    ///
    /// Props and open cells are untouched; the set of block cells and the
    /// multiset of types are preserved.
    pub fn shuffle_blocks(&mut self, rng: &mut GameRng) {
        let slots: Vec<usize> = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.block_type().is_some())
            .map(|(i, _)| i)
            .collect();
        let mut types: Vec<u8> = slots
            .iter()
            .filter_map(|&i| self.cells[i].block_type())
            .collect();

        rng.shuffle(&mut types);

        for (&i, t) in slots.iter().zip(types) {
            self.cells[i] = Cell::Block(t);
        }
    }

    /// Save-file codes in row-major order.
    #[must_use]
    pub fn codes(&self) -> Vec<i32> {
        self.cells.iter().map(|cell| cell.code()).collect()
    }
}

fn is_border(pos: Pos, rows: usize, cols: usize) -> bool {
    pos.row == 0 || pos.col == 0 || pos.row + 1 == rows || pos.col + 1 == cols
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(blocks: &[(usize, usize, u8)]) -> Board {
        let mut board = Board::new(6, 6);
        for &(r, c, t) in blocks {
            board.set(Pos::new(r, c), Cell::Block(t)).unwrap();
        }
        board
    }

    #[test]
    fn test_new_board_has_border_ring() {
        let board = Board::new(4, 5);
        assert_eq!(board.get(Pos::new(0, 0)), Some(Cell::Border));
        assert_eq!(board.get(Pos::new(3, 4)), Some(Cell::Border));
        assert_eq!(board.get(Pos::new(1, 1)), Some(Cell::Empty));
        assert_eq!(board.get(Pos::new(4, 0)), None);
        assert!(board.is_cleared());
        assert_eq!(board.empty_cells().len(), 2 * 3);
    }

    #[test]
    fn test_remove_pair() {
        let mut board = board_with(&[(1, 1, 0), (1, 3, 0), (2, 2, 1)]);

        board.remove_pair(Pos::new(1, 1), Pos::new(1, 3)).unwrap();
        assert_eq!(board.block_count(), 1);
        assert_eq!(board.get(Pos::new(1, 1)), Some(Cell::Empty));
        assert_eq!(board.get(Pos::new(1, 3)), Some(Cell::Empty));
    }

    #[test]
    fn test_remove_pair_rejects_mismatch() {
        let mut board = board_with(&[(1, 1, 0), (1, 3, 1)]);

        let same = board.remove_pair(Pos::new(1, 1), Pos::new(1, 1));
        assert!(matches!(same, Err(GameError::InvalidRemoval(..))));

        let mismatch = board.remove_pair(Pos::new(1, 1), Pos::new(1, 3));
        assert!(matches!(mismatch, Err(GameError::InvalidRemoval(..))));

        let empty = board.remove_pair(Pos::new(1, 1), Pos::new(2, 2));
        assert!(matches!(empty, Err(GameError::InvalidRemoval(..))));

        assert_eq!(board.block_count(), 2);
    }

    #[test]
    fn test_has_any_matchable_pair() {
        assert!(!Board::new(5, 5).has_any_matchable_pair());
        assert!(!board_with(&[(1, 1, 0), (2, 2, 1)]).has_any_matchable_pair());
        assert!(board_with(&[(1, 1, 0), (2, 2, 1), (3, 3, 1)]).has_any_matchable_pair());
    }

    #[test]
    fn test_props_do_not_count_as_pairs() {
        let mut board = board_with(&[(1, 1, 0)]);
        board.place_prop(Pos::new(2, 2), PropKind::Hint).unwrap();
        board.place_prop(Pos::new(3, 3), PropKind::Hint).unwrap();
        assert!(!board.has_any_matchable_pair());
        assert!(!board.is_cleared());
    }

    #[test]
    fn test_take_prop() {
        let mut board = Board::new(5, 5);
        board.place_prop(Pos::new(2, 2), PropKind::Shuffle).unwrap();

        assert_eq!(board.props().count(), 1);
        assert_eq!(board.take_prop(Pos::new(2, 2)), Some(PropKind::Shuffle));
        assert_eq!(board.take_prop(Pos::new(2, 2)), None);
        assert_eq!(board.get(Pos::new(2, 2)), Some(Cell::Empty));
    }

    #[test]
    fn test_shuffle_preserves_cells_and_multiset() {
        let mut board = board_with(&[(1, 1, 0), (1, 2, 0), (2, 1, 1), (2, 2, 1), (3, 3, 2), (3, 4, 2)]);
        board.place_prop(Pos::new(4, 4), PropKind::Flash).unwrap();
        let before_cells: Vec<Pos> = board.blocks().map(|(p, _)| p).collect();
        let mut before_types: Vec<u8> = board.blocks().map(|(_, t)| t).collect();

        board.shuffle_blocks(&mut GameRng::new(7));

        let after_cells: Vec<Pos> = board.blocks().map(|(p, _)| p).collect();
        let mut after_types: Vec<u8> = board.blocks().map(|(_, t)| t).collect();
        before_types.sort_unstable();
        after_types.sort_unstable();

        assert_eq!(before_cells, after_cells);
        assert_eq!(before_types, after_types);
        assert_eq!(board.prop_at(Pos::new(4, 4)), Some(PropKind::Flash));
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut board = Board::new(4, 4);
        assert!(matches!(
            board.set(Pos::new(4, 0), Cell::Block(0)),
            Err(GameError::OutOfBounds(_))
        ));
    }

    #[test]
    fn test_from_cells_normalises_ring() {
        let cells = vec![Cell::Empty; 9];
        let board = Board::from_cells(3, 3, cells).unwrap();
        assert_eq!(board.get(Pos::new(0, 1)), Some(Cell::Border));
        assert_eq!(board.get(Pos::new(1, 1)), Some(Cell::Empty));

        assert!(Board::from_cells(3, 3, vec![Cell::Empty; 8]).is_err());
    }
}
