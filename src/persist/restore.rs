//! Converting between a [`Game`] and its [`SaveRecord`].

use std::path::Path;

use rustc_hash::FxHashMap;

use crate::board::{Board, Cell, EMPTY_CODE, PROP_CODE};
use crate::core::{GameError, Mode, PlayerId, PlayerMap, Pos};
use crate::game::{Game, PlayerState, RoundState};
use crate::props::PropKind;

use super::codec::{decode, encode};
use super::record::{PropRecord, SaveRecord};

fn to_i32(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn format_err(msg: String) -> GameError {
    GameError::LoadFormat(msg)
}

impl SaveRecord {
    /// Capture the persisted part of a game.
    #[must_use]
    pub fn from_game(game: &Game) -> Self {
        let board = game.board();
        let players: Vec<&PlayerState> = game.players().map(|(_, p)| p).collect();
        Self {
            two_player: game.mode().is_two_player(),
            rows: to_i32(board.rows()),
            cols: to_i32(board.cols()),
            cells: board.codes(),
            positions: players
                .iter()
                .map(|p| (to_i32(p.pos.row), to_i32(p.pos.col)))
                .collect(),
            scores: players
                .iter()
                .map(|p| i32::try_from(p.score).unwrap_or(i32::MAX))
                .collect(),
            remaining_time: i32::try_from(game.remaining_time()).unwrap_or(i32::MAX),
            props: board
                .props()
                .map(|prop| PropRecord {
                    kind: prop.kind.code(),
                    row: to_i32(prop.pos.row),
                    col: to_i32(prop.pos.col),
                })
                .collect(),
        }
    }

    /// Validate the record and rebuild the persisted state from it.
    ///
    /// Out-of-bounds prop records are dropped. Prop records on a cell not
    /// marked as a prop cell are dropped, and prop cells with no record
    /// become empty; both are logged. Block-pair parity is not checked.
    pub fn into_state(self) -> Result<LoadedState, GameError> {
        let rows = usize::try_from(self.rows).map_err(|_| format_err(format!("rows {}", self.rows)))?;
        let cols = usize::try_from(self.cols).map_err(|_| format_err(format!("cols {}", self.cols)))?;
        if self.cells.len() != rows * cols {
            return Err(format_err(format!(
                "{} cells for a {}x{} board",
                self.cells.len(),
                rows,
                cols
            )));
        }
        let players = self.player_count();
        if self.positions.len() != players || self.scores.len() != players {
            return Err(format_err(format!("expected {} player entries", players)));
        }

        let in_bounds = |row: i32, col: i32| -> Option<Pos> {
            let pos = Pos::new(usize::try_from(row).ok()?, usize::try_from(col).ok()?);
            pos.in_bounds(rows, cols).then_some(pos)
        };

        // Prop records first: an unknown kind fails the whole load.
        let mut prop_kinds: FxHashMap<Pos, PropKind> = FxHashMap::default();
        for record in &self.props {
            let kind = PropKind::from_code(record.kind)
                .ok_or_else(|| format_err(format!("unknown prop kind {}", record.kind)))?;
            let Some(pos) = in_bounds(record.row, record.col) else {
                log::warn!("dropping {} prop at ({}, {}): off the board", kind, record.row, record.col);
                continue;
            };
            if prop_kinds.contains_key(&pos) {
                log::warn!("dropping duplicate prop record at {}", pos);
                continue;
            }
            prop_kinds.insert(pos, kind);
        }

        let mut cells = Vec::with_capacity(self.cells.len());
        for (i, &code) in self.cells.iter().enumerate() {
            let pos = Pos::from_index(i, cols);
            let cell = match code {
                EMPTY_CODE => Cell::Empty,
                PROP_CODE => match prop_kinds.remove(&pos) {
                    Some(kind) => Cell::Prop(kind),
                    None => {
                        log::warn!("prop cell {} has no prop record; clearing it", pos);
                        Cell::Empty
                    }
                },
                t if t >= 0 => Cell::Block(
                    u8::try_from(t).map_err(|_| format_err(format!("block type {} at {}", t, pos)))?,
                ),
                other => return Err(format_err(format!("cell code {} at {}", other, pos))),
            };
            cells.push(cell);
        }
        for (pos, kind) in prop_kinds {
            log::warn!("dropping {} prop record at {}: not a prop cell", kind, pos);
        }
        let board = Board::from_cells(rows, cols, cells)?;

        let mut positions = Vec::with_capacity(players);
        for (i, &(row, col)) in self.positions.iter().enumerate() {
            let player = PlayerId::new(i as u8);
            let pos = in_bounds(row, col)
                .ok_or_else(|| format_err(format!("{} at ({}, {}) is off the board", player, row, col)))?;
            if board.block_at(pos).is_some() {
                return Err(format_err(format!("{} stands on a block at {}", player, pos)));
            }
            positions.push(pos);
        }

        let scores = self
            .scores
            .iter()
            .map(|&s| u32::try_from(s).map_err(|_| format_err(format!("negative score {}", s))))
            .collect::<Result<Vec<_>, _>>()?;
        let remaining_time = u32::try_from(self.remaining_time)
            .map_err(|_| format_err(format!("negative remaining time {}", self.remaining_time)))?;

        Ok(LoadedState {
            mode: Mode::from_two_player(self.two_player),
            board,
            positions,
            scores,
            remaining_time,
        })
    }
}

/// Validated persisted state, ready to be installed into a game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedState {
    pub mode: Mode,
    pub board: Board,
    pub positions: Vec<Pos>,
    pub scores: Vec<u32>,
    pub remaining_time: u32,
}

impl Game {
    /// Encode the persisted part of this game.
    pub fn to_bytes(&self) -> Result<Vec<u8>, GameError> {
        encode(&SaveRecord::from_game(self))
    }

    /// Write a save file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), GameError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_bytes()?)?;
        log::debug!("saved game to {}", path.display());
        Ok(())
    }

    /// Replace this game's state with the decoded save.
    ///
    /// Nothing changes unless the whole save decodes and validates.
    /// Selections, timed effects, Flash, pause and the spawn timer are
    /// reset; the RNG carries on. A saved board with no pair left loads as
    /// a finished round.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), GameError> {
        let state = decode(bytes)?.into_state()?;
        self.install(state);
        Ok(())
    }

    /// Load a save file. See [`Game::load_bytes`].
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), GameError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        self.load_bytes(&bytes)?;
        log::debug!("loaded game from {}", path.display());
        Ok(())
    }

    fn install(&mut self, state: LoadedState) {
        self.config.mode = state.mode;
        self.config.rows = state.board.rows();
        self.config.cols = state.board.cols();
        self.board = state.board;
        self.players = PlayerMap::new(state.mode.player_count(), |p| PlayerState {
            score: state.scores[p.index()],
            ..PlayerState::at(state.positions[p.index()])
        });
        self.round = RoundState::new(state.remaining_time);
        self.reset_transient();
        log::info!(
            "restored {}x{} {:?} game with {}s left",
            self.config.rows,
            self.config.cols,
            state.mode,
            state.remaining_time
        );
        self.check_end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Direction, GameConfig};
    use crate::game::{FinishReason, GameBuilder, TickReport};
    use crate::props::Scheduled;

    fn sample_board() -> Board {
        let mut board = Board::new(5, 5);
        board.set(Pos::new(1, 1), Cell::Block(2)).unwrap();
        board.set(Pos::new(3, 3), Cell::Block(2)).unwrap();
        board.place_prop(Pos::new(2, 2), PropKind::Shuffle).unwrap();
        board
    }

    fn record() -> SaveRecord {
        let game = GameBuilder::new().board(sample_board()).build(0).unwrap();
        SaveRecord::from_game(&game)
    }

    #[test]
    fn test_from_game() {
        let record = record();
        assert!(!record.two_player);
        assert_eq!((record.rows, record.cols), (5, 5));
        assert_eq!(record.cells[6], 2);
        assert_eq!(record.cells[12], PROP_CODE);
        assert_eq!(record.positions, vec![(0, 0)]);
        assert_eq!(record.props, vec![PropRecord { kind: 2, row: 2, col: 2 }]);
    }

    #[test]
    fn test_into_state() {
        let state = record().into_state().unwrap();
        assert_eq!(state.board, sample_board());
        assert_eq!(state.positions, vec![Pos::new(0, 0)]);
        assert_eq!(state.remaining_time, 300);
    }

    #[test]
    fn test_unknown_prop_kind_rejected() {
        let mut r = record();
        r.props[0].kind = 9;
        assert!(matches!(r.into_state(), Err(GameError::LoadFormat(_))));
    }

    #[test]
    fn test_out_of_bounds_prop_dropped() {
        let mut r = record();
        r.props.push(PropRecord { kind: 1, row: 7, col: 1 });
        r.props.push(PropRecord { kind: 1, row: -1, col: 1 });
        let state = r.into_state().unwrap();
        assert_eq!(state.board.props().count(), 1);
    }

    #[test]
    fn test_prop_consistency_reconciled() {
        let mut r = record();
        // Record on a block cell, and a prop cell without a record.
        r.props[0] = PropRecord { kind: 3, row: 1, col: 1 };
        let state = r.into_state().unwrap();
        assert_eq!(state.board.get(Pos::new(2, 2)), Some(Cell::Empty));
        assert_eq!(state.board.get(Pos::new(1, 1)), Some(Cell::Block(2)));
        assert_eq!(state.board.props().count(), 0);
    }

    #[test]
    fn test_bad_cells_rejected() {
        let mut r = record();
        r.cells[6] = -3;
        assert!(matches!(r.into_state(), Err(GameError::LoadFormat(_))));

        let mut r = record();
        r.cells[6] = 300;
        assert!(matches!(r.into_state(), Err(GameError::LoadFormat(_))));
    }

    #[test]
    fn test_bad_players_rejected() {
        let mut r = record();
        r.positions[0] = (5, 0);
        assert!(matches!(r.into_state(), Err(GameError::LoadFormat(_))));

        let mut r = record();
        r.positions[0] = (1, 1);
        assert!(matches!(r.into_state(), Err(GameError::LoadFormat(_))));

        let mut r = record();
        r.scores[0] = -2;
        assert!(matches!(r.into_state(), Err(GameError::LoadFormat(_))));
    }

    #[test]
    fn test_load_resets_transient_state() {
        let mut game = GameBuilder::new()
            .config(GameConfig::default())
            .board(sample_board())
            .build(0)
            .unwrap();
        let bytes = game.to_bytes().unwrap();

        game.activate(PropKind::Flash, PlayerId::ONE).unwrap();
        game.pause().unwrap();
        game.load_bytes(&bytes).unwrap();

        assert!(!game.is_flash_active());
        assert!(!game.is_paused());
        assert_eq!(game.schedule().len(), 1);
    }

    #[test]
    fn test_cleared_save_loads_finished() {
        let mut board = Board::new(5, 5);
        board.set(Pos::new(1, 1), Cell::Block(0)).unwrap();
        board.set(Pos::new(1, 2), Cell::Block(0)).unwrap();
        board.set(Pos::new(3, 3), Cell::Block(1)).unwrap();
        board.set(Pos::new(3, 2), Cell::Block(1)).unwrap();
        let mut game = GameBuilder::new()
            .board(board)
            .player_position(PlayerId::ONE, Pos::new(0, 1))
            .build(0)
            .unwrap();
        use Direction::{Down, Left, Right};
        for dir in [Down, Right, Down, Right, Down, Down, Down, Left, Down] {
            game.move_player(PlayerId::ONE, dir).unwrap();
        }
        assert!(game.board().is_cleared());
        assert!(game.is_finished());
        let bytes = game.to_bytes().unwrap();

        let mut restored = Game::new(GameConfig::default(), 1).unwrap();
        restored.load_bytes(&bytes).unwrap();
        let outcome = restored.outcome().unwrap();
        assert_eq!(outcome.reason, FinishReason::BoardCleared);
        assert_eq!(outcome.scores[PlayerId::ONE], 4);
        assert_eq!(restored.tick(), TickReport::default());
        assert!(matches!(
            restored.move_player(PlayerId::ONE, Direction::Right),
            Err(GameError::RoundFinished)
        ));
    }

    #[test]
    fn test_save_without_pairs_loads_finished() {
        let mut r = record();
        r.cells[18] = 1;
        let mut game = Game::new(GameConfig::default(), 1).unwrap();
        game.load_bytes(&encode(&r).unwrap()).unwrap();
        assert_eq!(game.outcome().unwrap().reason, FinishReason::NoPairsLeft);
        assert!(!game.schedule().is_pending(Scheduled::SpawnProp));
    }

    #[test]
    fn test_failed_load_leaves_game_untouched() {
        let mut game = GameBuilder::new().board(sample_board()).build(0).unwrap();
        let before = game.snapshot();
        assert!(game.load_bytes(&[1, 2, 3]).is_err());
        assert_eq!(game.snapshot(), before);
    }
}
