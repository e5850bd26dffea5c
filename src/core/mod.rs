//! Core engine types: positions, players, RNG, configuration, errors.
//!
//! These are the building blocks shared by the board, the connectivity
//! engine and the game controller.

pub mod config;
pub mod error;
pub mod player;
pub mod position;
pub mod rng;

pub use config::{GameConfig, Mode, MAX_COLS, MAX_ROWS};
pub use error::GameError;
pub use player::{PlayerId, PlayerMap};
pub use position::{Axis, Direction, Pos};
pub use rng::{GameRng};
