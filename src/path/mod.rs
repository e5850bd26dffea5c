//! Connectivity engine.
//!
//! Two distinct queries over a [`Board`](crate::board::Board):
//!
//! - [`find_path`]: the pair-matching rule. Two same-type blocks connect
//!   when a route of open cells joins them with at most two turns.
//! - [`is_reachable_ignoring_type`]: whether a player can walk between two
//!   cells at all, with no turn limit.
//!
//! Both searches are read-only and run to completion before the caller
//! mutates any state.

mod search;

pub use search::{find_connectable_pair, find_path, is_reachable_ignoring_type, Path, MAX_TURNS};
