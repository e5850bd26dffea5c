//! Read-only output surface for a presentation layer.
//!
//! A [`Snapshot`] copies out everything a renderer needs: per-cell
//! contents with highlight flags, players, scores, the clock, and the
//! latest connector path. The engine never reads anything back from it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Cell;
use crate::core::{PlayerId, Pos};
use crate::path::Path;
use crate::props::PropKind;

use super::round::RoundOutcome;
use super::state::Game;

/// What a cell shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    Empty,
    Block(u8),
    Prop(PropKind),
}

impl From<Cell> for Tile {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Empty | Cell::Border => Self::Empty,
            Cell::Block(t) => Self::Block(t),
            Cell::Prop(kind) => Self::Prop(kind),
        }
    }
}

/// One rendered cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub tile: Tile,
    /// Part of the active hint or someone's pending selection.
    pub highlighted: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub pos: Pos,
    pub score: u32,
    pub frozen: bool,
    pub dizzy: bool,
    pub pending: Option<Pos>,
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub rows: usize,
    pub cols: usize,
    /// Row-major.
    pub cells: Vec<CellView>,
    pub players: Vec<PlayerView>,
    pub remaining_time: u32,
    pub paused: bool,
    pub flash: bool,
    pub path: Option<Path>,
    pub outcome: Option<RoundOutcome>,
}

impl Snapshot {
    #[must_use]
    pub fn cell(&self, pos: Pos) -> Option<&CellView> {
        pos.in_bounds(self.rows, self.cols)
            .then(|| &self.cells[pos.index(self.cols)])
    }

    fn player_at(&self, pos: Pos) -> Option<&PlayerView> {
        self.players.iter().find(|p| p.pos == pos)
    }
}

impl Game {
    /// Capture the current frame.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let mut marked: Vec<Pos> = self.selections.iter().filter_map(|(_, s)| *s).collect();
        if let Some((a, b)) = self.hint {
            marked.extend([a, b]);
        }

        let cells = self
            .board
            .cells()
            .map(|(pos, cell)| CellView {
                tile: Tile::from(cell),
                highlighted: marked.contains(&pos),
            })
            .collect();

        let players = self
            .players
            .iter()
            .map(|(id, state)| PlayerView {
                id,
                pos: state.pos,
                score: state.score,
                frozen: state.frozen,
                dizzy: state.dizzy,
                pending: self.pending_selection(id),
            })
            .collect();

        Snapshot {
            rows: self.board.rows(),
            cols: self.board.cols(),
            cells,
            players,
            remaining_time: self.round.remaining_time,
            paused: self.round.paused,
            flash: self.flash,
            path: self.last_path.clone(),
            outcome: self.outcome().cloned(),
        }
    }
}

/// Text rendering: two characters per cell, `*` marking highlights.
///
/// Players show as their number, blocks as their type, props as their
/// glyph and open cells as `.`.
impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "time {}", self.remaining_time)?;
        for player in &self.players {
            write!(f, "  P{} {}", player.id.number(), player.score)?;
            if player.frozen {
                f.write_str(" frozen")?;
            }
            if player.dizzy {
                f.write_str(" dizzy")?;
            }
        }
        if self.flash {
            f.write_str("  FLASH")?;
        }
        if self.paused {
            f.write_str("  PAUSED")?;
        }
        writeln!(f)?;

        for row in 0..self.rows {
            for col in 0..self.cols {
                let pos = Pos::new(row, col);
                let view = self.cells[pos.index(self.cols)];
                let mark = if view.highlighted { '*' } else { ' ' };
                let glyph = match (self.player_at(pos), view.tile) {
                    (Some(player), _) => char::from(b'0' + player.id.number()),
                    (None, Tile::Block(t)) => char::from_digit(u32::from(t), 36).unwrap_or('#'),
                    (None, Tile::Prop(kind)) => kind.glyph(),
                    (None, Tile::Empty) => '.',
                };
                write!(f, "{}{}", mark, glyph)?;
            }
            writeln!(f)?;
        }

        if let Some(outcome) = &self.outcome {
            writeln!(f, "{}", outcome)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::game::GameBuilder;

    fn game() -> Game {
        let mut board = Board::new(4, 4);
        board.set(Pos::new(1, 1), Cell::Block(0)).unwrap();
        board.set(Pos::new(2, 2), Cell::Block(0)).unwrap();
        board.place_prop(Pos::new(1, 2), PropKind::Hint).unwrap();
        GameBuilder::new().board(board).build(0).unwrap()
    }

    #[test]
    fn test_snapshot_cells() {
        let snap = game().snapshot();
        assert_eq!(snap.cells.len(), 16);
        assert_eq!(snap.cell(Pos::new(1, 1)).unwrap().tile, Tile::Block(0));
        assert_eq!(snap.cell(Pos::new(1, 2)).unwrap().tile, Tile::Prop(PropKind::Hint));
        assert_eq!(snap.cell(Pos::new(0, 0)).unwrap().tile, Tile::Empty);
        assert!(snap.cell(Pos::new(4, 0)).is_none());
        assert_eq!(snap.players.len(), 1);
        assert_eq!(snap.remaining_time, 300);
    }

    #[test]
    fn test_selection_is_highlighted() {
        let mut g = game();
        g.move_player(PlayerId::ONE, crate::core::Direction::Right).unwrap();
        g.move_player(PlayerId::ONE, crate::core::Direction::Down).unwrap();
        let snap = g.snapshot();
        assert!(snap.cell(Pos::new(1, 1)).unwrap().highlighted);
        assert!(!snap.cell(Pos::new(2, 2)).unwrap().highlighted);
        assert_eq!(snap.players[0].pending, Some(Pos::new(1, 1)));
    }

    #[test]
    fn test_text_render() {
        let text = game().snapshot().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "time 300  P1 0");
        assert_eq!(lines[1], " 1 . . .");
        assert_eq!(lines[2], " . 0 ? .");
        assert_eq!(lines[3], " . . 0 .");
    }
}
