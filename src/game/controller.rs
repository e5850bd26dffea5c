//! Player controller: movement, clicks, and block selection/matching.
//!
//! ## Movement
//!
//! A move steps one cell. Stepping onto a prop collects it (the player
//! moves onto the cleared cell). Stepping onto a block selects it and the
//! player stays put, so a player never stands on a block.
//!
//! ## Matching
//!
//! Each player has one pending selection. Selecting a second block of the
//! same type that connects under the two-turn rule removes both and scores;
//! any other second selection replaces the pending one.

use serde::{Deserialize, Serialize};

use crate::board::Cell;
use crate::core::{Direction, GameError, PlayerId, Pos};
use crate::path::{find_path, is_reachable_ignoring_type, Path};
use crate::props::PropKind;

use super::activate::PropEffect;
use super::state::Game;

/// Result of a move or click.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// The player is frozen; nothing happened.
    Frozen,
    /// The request had no effect (off the board, not adjacent, unreachable).
    Ignored,
    /// The player now stands on this cell.
    Moved(Pos),
    /// A prop was collected; the player now stands on its cell.
    Collected {
        kind: PropKind,
        at: Pos,
        effect: PropEffect,
    },
    /// This block is now the player's pending selection.
    Selected(Pos),
    /// Two blocks were connected and removed.
    Matched {
        first: Pos,
        second: Pos,
        path: Path,
        points: u32,
    },
}

impl Game {
    /// Move `player` one cell in `dir`.
    ///
    /// Frozen players do not move; dizzy players move the opposite way.
    pub fn move_player(&mut self, player: PlayerId, dir: Direction) -> Result<MoveOutcome, GameError> {
        self.check_input(player)?;
        self.round.current_player = player;

        let state = &self.players[player];
        if state.frozen {
            log::debug!("{} is frozen", player);
            return Ok(MoveOutcome::Frozen);
        }
        let dir = if state.dizzy { dir.inverted() } else { dir };
        let Some(target) = state.pos.step(dir, self.board.rows(), self.board.cols()) else {
            return Ok(MoveOutcome::Ignored);
        };

        let outcome = match self.board.get(target) {
            Some(Cell::Prop(kind)) => {
                self.board.take_prop(target);
                self.players[player].pos = target;
                let effect = self.apply_prop(kind, player);
                MoveOutcome::Collected {
                    kind,
                    at: target,
                    effect,
                }
            }
            Some(Cell::Block(_)) => self.select_block(player, target)?,
            Some(Cell::Empty | Cell::Border) => {
                self.players[player].pos = target;
                MoveOutcome::Moved(target)
            }
            None => MoveOutcome::Ignored,
        };
        log::debug!("{} {:?}: {:?}", player, dir, outcome);
        Ok(outcome)
    }

    /// Move by a raw `(dx, dy)` delta; anything but a unit step is ignored.
    pub fn move_player_by(&mut self, player: PlayerId, dx: i32, dy: i32) -> Result<MoveOutcome, GameError> {
        match Direction::from_delta(dx, dy) {
            Some(dir) => self.move_player(player, dir),
            None => {
                self.check_input(player)?;
                Ok(MoveOutcome::Ignored)
            }
        }
    }

    /// Handle a click on `target`.
    ///
    /// With Flash active, any cell the player can walk to is accepted: the
    /// player lands on the first open cell among the target itself and its
    /// up, down, left and right neighbours, then a clicked block is
    /// selected. Without Flash only orthogonally adjacent cells respond,
    /// exactly like the matching directional move.
    pub fn handle_cell_click(&mut self, player: PlayerId, target: Pos) -> Result<MoveOutcome, GameError> {
        self.check_input(player)?;
        if !self.board.in_bounds(target) {
            return Err(GameError::OutOfBounds(target));
        }

        let from = self.players[player].pos;
        if !self.flash {
            return match from.direction_to(target) {
                Some(dir) => self.move_player(player, dir),
                None => Ok(MoveOutcome::Ignored),
            };
        }

        self.round.current_player = player;
        if !is_reachable_ignoring_type(&self.board, from, target) {
            log::debug!("{} cannot reach {}", player, target);
            return Ok(MoveOutcome::Ignored);
        }
        let Some(landing) = self.landing_cell(target) else {
            return Ok(MoveOutcome::Ignored);
        };
        self.players[player].pos = landing;
        log::debug!("{} flashed to {}", player, landing);

        if self.board.block_at(target).is_some() {
            self.select_block(player, target)
        } else {
            Ok(MoveOutcome::Moved(landing))
        }
    }

    /// The first open cell among `target`, up, down, left, right.
    fn landing_cell(&self, target: Pos) -> Option<Pos> {
        let (rows, cols) = (self.board.rows(), self.board.cols());
        std::iter::once(Some(target))
            .chain(
                [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
                    .into_iter()
                    .map(|dir| target.step(dir, rows, cols)),
            )
            .flatten()
            .find(|&pos| self.board.is_open(pos))
    }

    /// Select `target` for `player`, matching it against their pending
    /// selection when possible.
    fn select_block(&mut self, player: PlayerId, target: Pos) -> Result<MoveOutcome, GameError> {
        let pending = self.selections[player];
        let path = match pending {
            Some(prev) if prev != target && self.board.block_at(prev) == self.board.block_at(target) => {
                find_path(&self.board, prev, target).map(|path| (prev, path))
            }
            _ => None,
        };

        let Some((first, path)) = path else {
            self.selections[player] = Some(target);
            return Ok(MoveOutcome::Selected(target));
        };

        self.board.remove_pair(first, target)?;
        let points = self.config.points_per_pair;
        self.players[player].score += points;

        // Nobody may keep a removed cell selected or highlighted.
        for (_, selection) in self.selections.iter_mut() {
            if matches!(*selection, Some(p) if p == first || p == target) {
                *selection = None;
            }
        }
        if matches!(self.hint, Some((a, b)) if [a, b].iter().any(|&p| p == first || p == target)) {
            self.hint = None;
        }

        self.last_path = Some(path.clone());
        log::debug!("{} matched {} and {} for {} points", player, first, target, points);
        self.check_end();

        Ok(MoveOutcome::Matched {
            first,
            second: target,
            path,
            points,
        })
    }

    fn check_input(&self, player: PlayerId) -> Result<(), GameError> {
        self.check_player(player)?;
        if self.is_finished() {
            return Err(GameError::RoundFinished);
        }
        if self.round.paused {
            return Err(GameError::Paused);
        }
        Ok(())
    }
}
