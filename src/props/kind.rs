//! Prop kinds and the per-mode kind tables.

use serde::{Deserialize, Serialize};

use crate::core::{Mode, Pos};

/// A collectible power-up kind.
///
/// Discriminants are the integer codes used in save files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PropKind {
    /// Adds time to the round clock.
    ExtraTime = 1,
    /// Permutes the remaining blocks.
    Shuffle = 2,
    /// Highlights a connectable pair.
    Hint = 3,
    /// Single-player only: clicks may target any reachable cell.
    Flash = 4,
    /// Two-player only: the opponent cannot move.
    Freeze = 5,
    /// Two-player only: the opponent's controls are inverted.
    Dizzy = 6,
}

impl PropKind {
    /// All kinds in code order.
    pub const ALL: [Self; 6] = [
        Self::ExtraTime,
        Self::Shuffle,
        Self::Hint,
        Self::Flash,
        Self::Freeze,
        Self::Dizzy,
    ];

    const SINGLE_PLAYER: [Self; 4] = [Self::ExtraTime, Self::Shuffle, Self::Hint, Self::Flash];
    const TWO_PLAYER: [Self; 5] = [Self::ExtraTime, Self::Shuffle, Self::Hint, Self::Freeze, Self::Dizzy];

    /// Kinds that may spawn during a round in `mode`.
    #[must_use]
    pub fn spawnable(mode: Mode) -> &'static [Self] {
        match mode {
            Mode::Single => &Self::SINGLE_PLAYER,
            Mode::Two => &Self::TWO_PLAYER,
        }
    }

    /// Kinds drawn from when a new map is generated.
    ///
    /// Generation draws uniformly from the first four (single-player) or
    /// first five (two-player) codes, and a two-player draw of `Flash` is
    /// remapped to `Dizzy`. So two-player maps carry `Dizzy` at twice the
    /// rate of other kinds.
    #[must_use]
    pub fn generation_draws(mode: Mode) -> &'static [Self] {
        match mode {
            Mode::Single => &Self::ALL[..4],
            Mode::Two => &Self::ALL[..5],
        }
    }

    /// Map a generation draw onto the kind actually placed for `mode`.
    #[must_use]
    pub fn remap_for_generation(self, mode: Mode) -> Self {
        match (mode, self) {
            (Mode::Two, Self::Flash) => Self::Dizzy,
            _ => self,
        }
    }

    /// Whether activating this kind has any effect in `mode`.
    #[must_use]
    pub fn is_active_in(self, mode: Mode) -> bool {
        match self {
            Self::Flash => mode == Mode::Single,
            Self::Freeze | Self::Dizzy => mode == Mode::Two,
            Self::ExtraTime | Self::Shuffle | Self::Hint => true,
        }
    }

    /// The persisted integer code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Parse a persisted integer code.
    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    /// Short label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ExtraTime => "+30s",
            Self::Shuffle => "Shuffle",
            Self::Hint => "Hint",
            Self::Flash => "Flash",
            Self::Freeze => "Freeze",
            Self::Dizzy => "Dizzy",
        }
    }

    /// One-character glyph for text rendering.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::ExtraTime => '+',
            Self::Shuffle => 'S',
            Self::Hint => '?',
            Self::Flash => 'F',
            Self::Freeze => 'Z',
            Self::Dizzy => 'D',
        }
    }
}

impl std::fmt::Display for PropKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A prop lying on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Prop {
    pub kind: PropKind,
    pub pos: Pos,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_roundtrip() {
        for kind in PropKind::ALL {
            assert_eq!(PropKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(PropKind::from_code(0), None);
        assert_eq!(PropKind::from_code(7), None);
    }

    #[test]
    fn test_spawnable_sets_respect_mode() {
        let single = PropKind::spawnable(Mode::Single);
        assert!(single.contains(&PropKind::Flash));
        assert!(!single.contains(&PropKind::Freeze));
        assert!(!single.contains(&PropKind::Dizzy));

        let two = PropKind::spawnable(Mode::Two);
        assert!(!two.contains(&PropKind::Flash));
        assert!(two.contains(&PropKind::Freeze));
        assert!(two.contains(&PropKind::Dizzy));
    }

    #[test]
    fn test_generation_remap() {
        assert_eq!(PropKind::Flash.remap_for_generation(Mode::Two), PropKind::Dizzy);
        assert_eq!(PropKind::Flash.remap_for_generation(Mode::Single), PropKind::Flash);
        assert_eq!(PropKind::Freeze.remap_for_generation(Mode::Two), PropKind::Freeze);

        for mode in [Mode::Single, Mode::Two] {
            for kind in PropKind::generation_draws(mode) {
                assert!(kind.remap_for_generation(mode).is_active_in(mode));
            }
        }
    }

    #[test]
    fn test_mode_activity() {
        assert!(PropKind::Flash.is_active_in(Mode::Single));
        assert!(!PropKind::Flash.is_active_in(Mode::Two));
        assert!(!PropKind::Freeze.is_active_in(Mode::Single));
        assert!(PropKind::Hint.is_active_in(Mode::Two));
    }
}
