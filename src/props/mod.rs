//! Props (collectible power-ups) and timed effects.
//!
//! ## Key Components
//!
//! - [`PropKind`]: the six prop kinds with their per-mode tables
//! - [`Prop`]: a prop lying on the board
//! - [`Schedule`]: deadline-keyed queue driving effect expiry and spawns
//!
//! Activation and spawning mutate the whole game (clock, board, players)
//! and live on [`crate::game::Game`].

mod kind;
mod schedule;

pub use kind::{Prop, PropKind};
pub use schedule::{EffectKind, Schedule, Scheduled, TimedEffect};
