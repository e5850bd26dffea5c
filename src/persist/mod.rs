//! Save and restore.
//!
//! A save holds the board, player positions and scores, the remaining time
//! and the prop list. Transient state (selections, timed effects, Flash,
//! pause, the spawn timer) is not persisted and is reset on load.
//!
//! Loading is all-or-nothing: the bytes are decoded and validated into a
//! [`LoadedState`] before the game is touched.
//!
//! ```
//! use pairlink::core::GameConfig;
//! use pairlink::game::Game;
//!
//! let game = Game::new(GameConfig::default(), 1).unwrap();
//! let bytes = game.to_bytes().unwrap();
//!
//! let mut other = Game::new(GameConfig::two_player(), 2).unwrap();
//! other.load_bytes(&bytes).unwrap();
//! assert_eq!(other.board(), game.board());
//! assert_eq!(other.player_count(), 1);
//! ```

mod codec;
mod record;
mod restore;

pub use codec::{decode, encode, MAX_SAVE_BYTES};
pub use record::{PropRecord, SaveRecord};
pub use restore::LoadedState;
