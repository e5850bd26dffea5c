//! Error taxonomy for engine operations.
//!
//! Failures are reported synchronously as `Result<_, GameError>`. Two
//! conditions are deliberately *not* errors:
//!
//! - a prop spawn finding no empty cell (the board may legitimately be full),
//! - a move that is ignored by the rules (frozen player, off-board target);
//!   those return an outcome describing what happened instead.

use thiserror::Error;

use super::player::PlayerId;
use super::position::Pos;

/// Errors surfaced by the engine.
#[derive(Debug, Error)]
pub enum GameError {
    /// Attempted to remove two cells that are not a matching block pair.
    ///
    /// Callers acting through the public move/click contract never see
    /// this; it indicates an internal logic fault.
    #[error("cells {0} and {1} are not a removable block pair")]
    InvalidRemoval(Pos, Pos),

    /// Malformed or out-of-range save data. The load is aborted and the
    /// in-memory game is left untouched.
    #[error("invalid save data: {0}")]
    LoadFormat(String),

    /// The game could not be encoded as a save record.
    #[error("failed to encode save data: {0}")]
    SaveEncode(String),

    /// Reading or writing a save file failed.
    #[error("save file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A cell address outside the board.
    #[error("position {0} is outside the board")]
    OutOfBounds(Pos),

    /// The round has finished; movement and prop activation are rejected.
    #[error("the round has finished")]
    RoundFinished,

    /// The round is paused; input is rejected until it resumes.
    #[error("the round is paused")]
    Paused,

    /// The player does not take part in this game (player 2 in single-player mode).
    #[error("{0} is not in this game")]
    NoSuchPlayer(PlayerId),

    /// Rejected configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
