//! Round lifecycle: the countdown tick, pause, and end-of-round detection.
//!
//! ```text
//! Running <-> Paused        (pause / resume)
//! Running  -> Finished      (board cleared, no pairs left, time expired)
//! ```
//!
//! Pausing stops only the countdown. Effect expiry and the prop spawn
//! timer keep running while paused.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{GameError, PlayerId, PlayerMap};
use crate::props::{EffectKind, Prop, Scheduled, TimedEffect};

use super::state::{Game, Phase};

/// Why a round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FinishReason {
    BoardCleared,
    NoPairsLeft,
    TimeExpired,
}

impl FinishReason {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::BoardCleared => "Board cleared",
            Self::NoPairsLeft => "No matching pairs left",
            Self::TimeExpired => "Time expired",
        }
    }
}

/// Who won.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Equal scores.
    Draw,
    /// Single-player round; there is nobody to compare against.
    Solo,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }

    fn from_scores(scores: &PlayerMap<u32>) -> Self {
        match (scores.get(PlayerId::ONE), scores.get(PlayerId::TWO)) {
            (Some(a), Some(b)) if a > b => Self::Winner(PlayerId::ONE),
            (Some(a), Some(b)) if b > a => Self::Winner(PlayerId::TWO),
            (Some(_), Some(_)) => Self::Draw,
            _ => Self::Solo,
        }
    }
}

/// Final report for a finished round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub reason: FinishReason,
    pub result: GameResult,
    pub scores: PlayerMap<u32>,
}

impl std::fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. ", self.reason.message())?;
        match self.result {
            GameResult::Solo => {
                let score = self.scores.get(PlayerId::ONE).copied().unwrap_or(0);
                write!(f, "Final score: {}", score)
            }
            GameResult::Winner(winner) => {
                let won = self.scores.get(winner).copied().unwrap_or(0);
                let lost = self.scores.get(winner.other()).copied().unwrap_or(0);
                write!(f, "{} wins, {} to {}", winner, won, lost)
            }
            GameResult::Draw => {
                let score = self.scores.get(PlayerId::ONE).copied().unwrap_or(0);
                write!(f, "Draw at {} each", score)
            }
        }
    }
}

/// What happened during one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Effects that wore off.
    pub expired: SmallVec<[TimedEffect; 4]>,
    /// A prop placed by the spawn timer (possibly consumed at once by a
    /// player standing on its cell).
    pub spawned: Option<Prop>,
    /// Set when this tick ended the round.
    pub finished: Option<RoundOutcome>,
}

impl Game {
    /// Advance the game clock by one time unit.
    ///
    /// In order: the previous connector path is dropped, due effects
    /// expire, the spawn timer fires (re-arming itself), and the countdown
    /// drops by one unless paused. Reaching zero finishes the round with
    /// [`FinishReason::TimeExpired`]. Does nothing once the round is over.
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();
        if self.is_finished() {
            return report;
        }

        self.last_path = None;
        self.clock += 1;

        for item in self.schedule.drain_due(self.clock) {
            match item {
                Scheduled::Expire(effect) => {
                    self.expire(effect);
                    report.expired.push(effect);
                }
                Scheduled::SpawnProp => {
                    report.spawned = self.spawn_now();
                    self.schedule
                        .schedule(Scheduled::SpawnProp, self.clock, self.config.spawn_interval);
                }
            }
        }

        if !self.round.paused {
            self.round.remaining_time = self.round.remaining_time.saturating_sub(1);
            if self.round.remaining_time == 0 {
                report.finished = Some(self.finish(FinishReason::TimeExpired));
            }
        }

        report
    }

    /// Stop the countdown.
    pub fn pause(&mut self) -> Result<(), GameError> {
        if self.is_finished() {
            return Err(GameError::RoundFinished);
        }
        if !self.round.paused {
            self.round.paused = true;
            log::info!("round paused at {}s", self.round.remaining_time);
        }
        Ok(())
    }

    /// Restart the countdown with the time that was left.
    pub fn resume(&mut self) -> Result<(), GameError> {
        if self.is_finished() {
            return Err(GameError::RoundFinished);
        }
        if self.round.paused {
            self.round.paused = false;
            log::info!("round resumed at {}s", self.round.remaining_time);
        }
        Ok(())
    }

    /// Flip between paused and running. Returns the new paused flag.
    pub fn toggle_pause(&mut self) -> Result<bool, GameError> {
        if self.round.paused {
            self.resume()?;
        } else {
            self.pause()?;
        }
        Ok(self.round.paused)
    }

    /// End the round now. Returns the existing outcome if already finished.
    pub fn finish(&mut self, reason: FinishReason) -> RoundOutcome {
        if let Phase::Finished(outcome) = &self.round.phase {
            return outcome.clone();
        }

        let scores = PlayerMap::new(self.players.player_count(), |p| self.players[p].score);
        let outcome = RoundOutcome {
            reason,
            result: GameResult::from_scores(&scores),
            scores,
        };
        self.round.phase = Phase::Finished(outcome.clone());
        self.round.paused = false;
        self.schedule.cancel(Scheduled::SpawnProp);
        log::info!("round finished: {}", outcome);
        outcome
    }

    /// Finish the round if the board is cleared or no pair type remains.
    pub(crate) fn check_end(&mut self) -> Option<RoundOutcome> {
        if self.board.is_cleared() {
            Some(self.finish(FinishReason::BoardCleared))
        } else if !self.board.has_any_matchable_pair() {
            Some(self.finish(FinishReason::NoPairsLeft))
        } else {
            None
        }
    }

    pub(crate) fn expire(&mut self, effect: TimedEffect) {
        match (effect.kind, effect.target) {
            (EffectKind::Frozen, Some(target)) => {
                if let Some(player) = self.players.get_mut(target) {
                    player.frozen = false;
                }
            }
            (EffectKind::Dizzy, Some(target)) => {
                if let Some(player) = self.players.get_mut(target) {
                    player.dizzy = false;
                }
            }
            (EffectKind::Flash, _) => self.flash = false,
            (EffectKind::HintHighlight, _) => self.hint = None,
            (EffectKind::Frozen | EffectKind::Dizzy, None) => {}
        }
        log::debug!("{:?} expired for {:?}", effect.kind, effect.target);
    }
}
