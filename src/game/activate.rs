//! Prop activation and periodic spawning.
//!
//! ## Targets
//!
//! Freeze and Dizzy hit the player *other* than the one who collected the
//! prop. The collector becomes the round's current player first, so the
//! target is always relative to whoever triggered the effect.
//!
//! ## Timers
//!
//! Each effect arms one [`Scheduled::Expire`] entry. Re-triggering an
//! effect that is still running restarts its timer; durations never stack.

use serde::{Deserialize, Serialize};

use crate::core::{GameError, PlayerId, Pos};
use crate::path::find_connectable_pair;
use crate::props::{EffectKind, Prop, PropKind, Scheduled, TimedEffect};

use super::state::Game;

/// The effect a prop activation had.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropEffect {
    /// Seconds added to the countdown.
    ExtraTime(u32),
    Shuffled,
    /// The highlighted pair, or `None` when nothing connects.
    Hint(Option<(Pos, Pos)>),
    Flash,
    /// The player who was frozen.
    Froze(PlayerId),
    /// The player who was made dizzy.
    Dizzied(PlayerId),
    /// The kind does nothing in this mode.
    NoEffect,
}

impl Game {
    /// Apply a prop's effect on behalf of `acting`.
    ///
    /// Rejected once the round has finished. Kinds that do not belong to
    /// the current mode are accepted and do nothing.
    pub fn activate(&mut self, kind: PropKind, acting: PlayerId) -> Result<PropEffect, GameError> {
        self.check_player(acting)?;
        if self.is_finished() {
            return Err(GameError::RoundFinished);
        }
        Ok(self.apply_prop(kind, acting))
    }

    /// Place a random mode-appropriate prop on a random empty interior cell.
    ///
    /// Returns `Ok(None)` when no empty cell exists. A prop landing on a
    /// player is activated for that player at once and not left on the board.
    pub fn spawn(&mut self) -> Result<Option<Prop>, GameError> {
        if self.is_finished() {
            return Err(GameError::RoundFinished);
        }
        Ok(self.spawn_now())
    }

    pub(crate) fn spawn_now(&mut self) -> Option<Prop> {
        let kind = self.rng.pick(PropKind::spawnable(self.config.mode))?;
        let empty = self.board.empty_cells();
        if empty.is_empty() {
            log::debug!("no empty cell for a {} prop", kind);
            return None;
        }
        let pos = empty[self.rng.below(empty.len())];
        self.board.place_prop(pos, kind).ok()?;
        log::debug!("spawned {} at {}", kind, pos);

        let occupant = self
            .players
            .iter()
            .find(|(_, state)| state.pos == pos)
            .map(|(id, _)| id);
        if let Some(player) = occupant {
            self.board.take_prop(pos);
            self.apply_prop(kind, player);
        }

        Some(Prop { kind, pos })
    }

    pub(crate) fn apply_prop(&mut self, kind: PropKind, acting: PlayerId) -> PropEffect {
        self.round.current_player = acting;

        let effect = match kind {
            PropKind::ExtraTime => {
                let bonus = self.config.extra_time_bonus;
                self.round.remaining_time = self.round.remaining_time.saturating_add(bonus);
                PropEffect::ExtraTime(bonus)
            }
            PropKind::Shuffle => {
                self.board.shuffle_blocks(&mut self.rng);
                // A highlighted pair may no longer match.
                self.hint = None;
                self.schedule
                    .cancel(Scheduled::Expire(TimedEffect::global(EffectKind::HintHighlight)));
                PropEffect::Shuffled
            }
            PropKind::Hint => {
                let item = Scheduled::Expire(TimedEffect::global(EffectKind::HintHighlight));
                self.hint = find_connectable_pair(&self.board).map(|(a, b, _)| (a, b));
                if self.hint.is_some() {
                    self.schedule.schedule(item, self.clock, self.config.hint_duration);
                } else {
                    self.schedule.cancel(item);
                }
                PropEffect::Hint(self.hint)
            }
            PropKind::Flash if kind.is_active_in(self.config.mode) => {
                self.flash = true;
                let item = Scheduled::Expire(TimedEffect::global(EffectKind::Flash));
                self.schedule.schedule(item, self.clock, self.config.flash_duration);
                PropEffect::Flash
            }
            PropKind::Freeze if kind.is_active_in(self.config.mode) => {
                let target = acting.other();
                match self.players.get_mut(target) {
                    Some(state) => {
                        state.frozen = true;
                        let item = Scheduled::Expire(TimedEffect::on_player(EffectKind::Frozen, target));
                        self.schedule.schedule(item, self.clock, self.config.freeze_duration);
                        PropEffect::Froze(target)
                    }
                    None => PropEffect::NoEffect,
                }
            }
            PropKind::Dizzy if kind.is_active_in(self.config.mode) => {
                let target = acting.other();
                match self.players.get_mut(target) {
                    Some(state) => {
                        state.dizzy = true;
                        let item = Scheduled::Expire(TimedEffect::on_player(EffectKind::Dizzy, target));
                        self.schedule.schedule(item, self.clock, self.config.dizzy_duration);
                        PropEffect::Dizzied(target)
                    }
                    None => PropEffect::NoEffect,
                }
            }
            PropKind::Flash | PropKind::Freeze | PropKind::Dizzy => PropEffect::NoEffect,
        };

        log::debug!("{} activated {}: {:?}", acting, kind, effect);
        effect
    }
}
