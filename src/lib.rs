//! # pairlink
//!
//! A board simulation and match engine for "connect-the-pair" tile games
//! for one or two players.
//!
//! ## Design Principles
//!
//! 1. **Pure Data**: Board, props and players are plain data. A renderer
//!    reads a [`Snapshot`](game::Snapshot) and never feeds state back.
//!
//! 2. **Deterministic**: All randomness (generation, shuffles, spawns)
//!    flows through one seeded [`GameRng`]. Grid searches expand
//!    neighbours in a fixed order.
//!
//! 3. **Single-Threaded Turns**: Moves, clicks and ticks are synchronous
//!    `&mut self` calls. Timed effects are queued by deadline and applied
//!    by [`Game::tick`], never re-entrantly.
//!
//! ## Modules
//!
//! - `core`: Positions, players, RNG, configuration, errors
//! - `board`: Cells, grid storage, generation, pair removal, shuffling
//! - `path`: Two-turn pair connectivity and walkability searches
//! - `props`: Prop kinds and the timed-effect schedule
//! - `game`: Player controller, prop effects, round lifecycle, snapshots
//! - `persist`: Binary save files

pub mod board;
pub mod core;
pub mod game;
pub mod path;
pub mod persist;
pub mod props;

// Re-export commonly used types
pub use crate::core::{
    Direction, GameConfig, GameError, GameRng, Mode, PlayerId, PlayerMap, Pos,
};

pub use crate::board::{Board, Cell};

pub use crate::path::{find_path, is_reachable_ignoring_type, Path};

pub use crate::props::{EffectKind, Prop, PropKind};

pub use crate::game::{
    FinishReason, Game, GameBuilder, GameResult, MoveOutcome, PropEffect, RoundOutcome, Snapshot,
    TickReport,
};

pub use crate::persist::SaveRecord;
