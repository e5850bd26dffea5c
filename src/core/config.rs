//! Game configuration.
//!
//! Every tunable rule constant lives in `GameConfig`: board size, mode,
//! block kinds, round length, prop durations and scoring. Durations are
//! in time units (one unit = one `tick`).

use serde::{Deserialize, Serialize};

use super::error::GameError;

/// Largest board accepted from a save file (and by `validate`).
pub const MAX_ROWS: usize = 15;
/// Largest board accepted from a save file (and by `validate`).
pub const MAX_COLS: usize = 15;

/// Single- or two-player game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Single,
    Two,
}

impl Mode {
    /// Number of players taking part.
    #[must_use]
    pub const fn player_count(self) -> usize {
        match self {
            Self::Single => 1,
            Self::Two => 2,
        }
    }

    #[must_use]
    pub const fn is_two_player(self) -> bool {
        matches!(self, Self::Two)
    }

    #[must_use]
    pub const fn from_two_player(two_player: bool) -> Self {
        if two_player {
            Self::Two
        } else {
            Self::Single
        }
    }
}

/// Rule and board configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board rows, border included.
    pub rows: usize,

    /// Board columns, border included.
    pub cols: usize,

    pub mode: Mode,

    /// Number of distinct block types; types are `0..block_kinds`.
    pub block_kinds: u8,

    /// One prop slot per this many interior cells at generation.
    pub prop_density_divisor: usize,

    /// Round length.
    pub round_time: u32,

    /// A prop spawns every this many ticks.
    pub spawn_interval: u64,

    /// Time added by an ExtraTime prop.
    pub extra_time_bonus: u32,

    pub hint_duration: u64,
    pub flash_duration: u64,
    pub freeze_duration: u64,
    pub dizzy_duration: u64,

    /// Points awarded for each matched pair.
    pub points_per_pair: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 14,
            cols: 14,
            mode: Mode::Single,
            block_kinds: 3,
            prop_density_divisor: 10,
            round_time: 300,
            spawn_interval: 30,
            extra_time_bonus: 30,
            hint_duration: 5,
            flash_duration: 5,
            freeze_duration: 3,
            dizzy_duration: 10,
            points_per_pair: 2,
        }
    }
}

impl GameConfig {
    /// Default single-player configuration.
    #[must_use]
    pub fn single_player() -> Self {
        Self::default()
    }

    /// Default two-player configuration.
    #[must_use]
    pub fn two_player() -> Self {
        Self::default().with_mode(Mode::Two)
    }

    /// Set the board size (border included).
    #[must_use]
    pub fn with_size(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_block_kinds(mut self, kinds: u8) -> Self {
        self.block_kinds = kinds;
        self
    }

    #[must_use]
    pub fn with_round_time(mut self, seconds: u32) -> Self {
        self.round_time = seconds;
        self
    }

    #[must_use]
    pub fn with_spawn_interval(mut self, ticks: u64) -> Self {
        self.spawn_interval = ticks;
        self
    }

    /// Number of players this configuration plays with.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.mode.player_count()
    }

    /// Check the configuration can produce a playable board.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.rows < 3 || self.cols < 3 {
            return Err(GameError::InvalidConfig(format!(
                "board {}x{} has no interior",
                self.rows, self.cols
            )));
        }
        if self.rows > MAX_ROWS || self.cols > MAX_COLS {
            return Err(GameError::InvalidConfig(format!(
                "board {}x{} exceeds {}x{}",
                self.rows, self.cols, MAX_ROWS, MAX_COLS
            )));
        }
        if self.block_kinds == 0 {
            return Err(GameError::InvalidConfig("block_kinds must be positive".into()));
        }
        if self.prop_density_divisor == 0 {
            return Err(GameError::InvalidConfig("prop_density_divisor must be positive".into()));
        }
        Ok(())
    }
}
