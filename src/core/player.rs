//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! A game has one player (single-player mode) or two. Indices are 0-based
//! internally and displayed 1-based, so `PlayerId::ONE` prints as
//! "Player 1".
//!
//! ## PlayerMap
//!
//! Per-player data backed by a `Vec` with one entry per *present* player.
//! In single-player mode player 2 is absent, not merely unused: lookups
//! for it return `None`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Player identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// The first player (always present).
    pub const ONE: Self = Self(0);
    /// The second player (two-player mode only).
    pub const TWO: Self = Self(1);

    /// Create a new player ID from a 0-based index.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The 1-based player number shown to users.
    #[must_use]
    pub const fn number(self) -> u8 {
        self.0 + 1
    }

    /// The opponent in a two-player game.
    #[must_use]
    pub const fn other(self) -> Self {
        if self.0 == 0 {
            Self::TWO
        } else {
            Self::ONE
        }
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use pairlink::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(2).collect();
    /// assert_eq!(players, vec![PlayerId::ONE, PlayerId::TWO]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use pairlink::core::{PlayerId, PlayerMap};
///
/// let mut score: PlayerMap<u32> = PlayerMap::with_value(2, 0);
/// score[PlayerId::TWO] += 2;
/// assert_eq!(score[PlayerId::TWO], 2);
/// assert!(PlayerMap::with_value(1, 0u32).get(PlayerId::TWO).is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 2, "At most 2 players supported");

        let data = (0..player_count as u8).map(|i| factory(PlayerId(i))).collect();

        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Whether `player` exists in this map.
    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        player.index() < self.data.len()
    }

    /// Get a reference to a player's data, if the player is present.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Get a mutable reference to a player's data, if the player is present.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.data.len() as u8).map(PlayerId)
    }
}

/// Panics on an absent player; use [`PlayerMap::get`] for fallible lookup.
impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}
