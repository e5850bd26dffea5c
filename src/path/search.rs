//! Breadth-first searches over the board.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::Board;
use crate::core::{Axis, Direction, Pos};

/// Maximum number of axis changes a connecting path may make.
pub const MAX_TURNS: u8 = 2;

/// A connecting path between two matching blocks, endpoints included.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    cells: SmallVec<[Pos; 16]>,
}

impl Path {
    /// The cells walked, from the first block to the second.
    #[must_use]
    pub fn cells(&self) -> &[Pos] {
        &self.cells
    }

    /// Number of cells on the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True for a path with no cells. Paths from `find_path` never are.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The first block of the pair.
    #[must_use]
    pub fn start(&self) -> Option<Pos> {
        self.cells.first().copied()
    }

    /// The second block of the pair.
    #[must_use]
    pub fn end(&self) -> Option<Pos> {
        self.cells.last().copied()
    }

    /// Number of axis changes along the path.
    #[must_use]
    pub fn turns(&self) -> usize {
        let axes: SmallVec<[Axis; 16]> = self
            .cells
            .windows(2)
            .filter_map(|w| w[0].direction_to(w[1]).map(Direction::axis))
            .collect();
        axes.windows(2).filter(|w| w[0] != w[1]).count()
    }
}

/// One BFS state. `parent` indexes the arena the node lives in.
#[derive(Clone, Copy, Debug)]
struct Node {
    pos: Pos,
    axis: Option<Axis>,
    turns: u8,
    parent: Option<usize>,
}

/// Find a path joining two matching blocks with at most two turns.
///
/// Returns `None` without searching unless `a != b` and both cells hold
/// blocks of the same type. Otherwise runs a BFS where a state is
/// `(cell, axis of the last move, turns used)`: only open cells and the
/// destination itself are traversable, a change of axis costs a turn, and
/// states over [`MAX_TURNS`] are pruned. The visited set is keyed by
/// `(cell, axis)` so a cell may be re-entered along the other axis.
/// Neighbours are expanded left, right, up, down, which makes the result
/// deterministic for a given board.
///
/// ```
/// use pairlink::board::{Board, Cell};
/// use pairlink::core::Pos;
/// use pairlink::path::find_path;
///
/// let mut board = Board::new(5, 5);
/// board.set(Pos::new(1, 1), Cell::Block(0)).unwrap();
/// board.set(Pos::new(3, 3), Cell::Block(0)).unwrap();
///
/// let path = find_path(&board, Pos::new(1, 1), Pos::new(3, 3)).unwrap();
/// assert!(path.turns() <= 2);
/// assert_eq!(path.start(), Some(Pos::new(1, 1)));
/// assert_eq!(path.end(), Some(Pos::new(3, 3)));
/// ```
#[must_use]
pub fn find_path(board: &Board, a: Pos, b: Pos) -> Option<Path> {
    if a == b {
        return None;
    }
    match (board.block_at(a), board.block_at(b)) {
        (Some(ta), Some(tb)) if ta == tb => {}
        _ => return None,
    }

    let mut arena: Vec<Node> = Vec::new();
    let mut visited: FxHashSet<(Pos, Option<Axis>)> = FxHashSet::default();
    let mut queue: VecDeque<usize> = VecDeque::new();

    arena.push(Node {
        pos: a,
        axis: None,
        turns: 0,
        parent: None,
    });
    visited.insert((a, None));
    queue.push_back(0);

    while let Some(current) = queue.pop_front() {
        let node = arena[current];
        if node.pos == b {
            return Some(trace(&arena, current));
        }

        for dir in Direction::ALL {
            let Some(next) = node.pos.step(dir, board.rows(), board.cols()) else {
                continue;
            };
            let axis = dir.axis();
            let turned = node.axis.is_some_and(|prev| prev != axis);
            let turns = node.turns + u8::from(turned);
            if turns > MAX_TURNS {
                continue;
            }
            if !(board.is_open(next) || next == b) {
                continue;
            }
            if !visited.insert((next, Some(axis))) {
                continue;
            }
            arena.push(Node {
                pos: next,
                axis: Some(axis),
                turns,
                parent: Some(current),
            });
            queue.push_back(arena.len() - 1);
        }
    }

    None
}

fn trace(arena: &[Node], mut index: usize) -> Path {
    let mut cells: SmallVec<[Pos; 16]> = SmallVec::new();
    loop {
        let node = arena[index];
        cells.push(node.pos);
        match node.parent {
            Some(parent) => index = parent,
            None => break,
        }
    }
    cells.reverse();
    Path { cells }
}

/// Whether a player standing on `from` can walk to `to`.
///
/// Plain BFS through open cells with no turn limit and no block-type
/// precondition. The destination itself may be any cell (a block can be
/// reached by walking up to it); every intermediate cell must be open.
#[must_use]
pub fn is_reachable_ignoring_type(board: &Board, from: Pos, to: Pos) -> bool {
    if !board.in_bounds(from) || !board.in_bounds(to) {
        return false;
    }

    let mut visited: FxHashSet<Pos> = FxHashSet::default();
    let mut queue: VecDeque<Pos> = VecDeque::new();
    visited.insert(from);
    queue.push_back(from);

    while let Some(pos) = queue.pop_front() {
        if pos == to {
            return true;
        }
        for dir in Direction::ALL {
            let Some(next) = pos.step(dir, board.rows(), board.cols()) else {
                continue;
            };
            if (board.is_open(next) || next == to) && visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    false
}

/// The first connectable pair in row-major order.
///
/// For each block `a` (row-major), every other block `b` of the same type
/// (row-major) is tried with [`find_path`]; the first success wins.
#[must_use]
pub fn find_connectable_pair(board: &Board) -> Option<(Pos, Pos, Path)> {
    let blocks: Vec<(Pos, u8)> = board.blocks().collect();
    for &(a, ta) in &blocks {
        for &(b, tb) in &blocks {
            if a == b || ta != tb {
                continue;
            }
            if let Some(path) = find_path(board, a, b) {
                return Some((a, b, path));
            }
        }
    }
    None
}
