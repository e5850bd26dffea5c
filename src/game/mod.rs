//! The game: players, round lifecycle and prop effects over a board.
//!
//! ## Key Components
//!
//! - [`Game`]: owns the board, players, round clock, schedule and RNG
//! - [`GameBuilder`]: seeded construction, optionally on a prepared board
//! - Controller: [`Game::move_player`], [`Game::handle_cell_click`]
//! - Props: [`Game::activate`], [`Game::spawn`]
//! - Round: [`Game::tick`], [`Game::pause`], [`Game::resume`], [`RoundOutcome`]
//! - Output: [`Game::snapshot`] and [`Snapshot`]
//!
//! ## Example
//!
//! ```
//! use pairlink::core::{Direction, GameConfig, PlayerId};
//! use pairlink::game::Game;
//!
//! let mut game = Game::new(GameConfig::default(), 42).unwrap();
//! game.move_player(PlayerId::ONE, Direction::Right).unwrap();
//! game.tick();
//! assert_eq!(game.remaining_time(), 299);
//! ```

mod activate;
mod controller;
mod round;
mod state;
mod view;

pub use activate::PropEffect;
pub use controller::MoveOutcome;
pub use round::{FinishReason, GameResult, RoundOutcome, TickReport};
pub use state::{Game, GameBuilder, Phase, PlayerState, RoundState};
pub use view::{CellView, PlayerView, Snapshot, Tile};
