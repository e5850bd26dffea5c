//! Scheduled-effect queue.
//!
//! Timed behaviour (status effects, hint highlight, Flash, periodic prop
//! spawns) is modelled as entries keyed by a deadline on the game clock.
//! The tick entry point drains every entry whose deadline has passed and
//! applies it; nothing fires re-entrantly while a move is being processed.
//!
//! ## Restart semantics
//!
//! Each [`Scheduled`] value appears at most once. Scheduling one that is
//! already pending replaces its deadline: re-triggering an effect restarts
//! its timer and never stacks duration.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::PlayerId;

/// A timed effect kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// The target player's moves are ignored.
    Frozen,
    /// The target player's moves are inverted.
    Dizzy,
    /// Clicks may target any reachable cell.
    Flash,
    /// A connectable pair is highlighted.
    HintHighlight,
}

/// An effect bound to a target. `target` is `None` for board-wide effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimedEffect {
    pub kind: EffectKind,
    pub target: Option<PlayerId>,
}

impl TimedEffect {
    #[must_use]
    pub const fn on_player(kind: EffectKind, player: PlayerId) -> Self {
        Self {
            kind,
            target: Some(player),
        }
    }

    #[must_use]
    pub const fn global(kind: EffectKind) -> Self {
        Self { kind, target: None }
    }
}

/// Something that happens when its deadline passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scheduled {
    /// Clear a timed effect.
    Expire(TimedEffect),
    /// Spawn a prop (re-armed by the caller after firing).
    SpawnProp,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct Entry {
    deadline: u64,
    item: Scheduled,
}

/// Deadline-ordered queue of scheduled items.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Schedule {
    /// Pending entries; at most one per `Scheduled` value.
    entries: Vec<Entry>,
}

impl Schedule {
    /// Create an empty schedule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `item` to fire at `now + delay`, replacing any pending entry
    /// for the same item.
    pub fn schedule(&mut self, item: Scheduled, now: u64, delay: u64) {
        let deadline = now.saturating_add(delay);
        match self.entries.iter_mut().find(|e| e.item == item) {
            Some(entry) => entry.deadline = deadline,
            None => self.entries.push(Entry { deadline, item }),
        }
    }

    /// Remove a pending item. Returns true if it was pending.
    pub fn cancel(&mut self, item: Scheduled) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.item != item);
        self.entries.len() != before
    }

    /// Whether `item` is pending.
    #[must_use]
    pub fn is_pending(&self, item: Scheduled) -> bool {
        self.entries.iter().any(|e| e.item == item)
    }

    /// Ticks left before `item` fires, if pending.
    #[must_use]
    pub fn remaining(&self, item: Scheduled, now: u64) -> Option<u64> {
        self.entries
            .iter()
            .find(|e| e.item == item)
            .map(|e| e.deadline.saturating_sub(now))
    }

    /// Remove and return every item due at `now`, earliest deadline first.
    /// Items sharing a deadline keep their scheduling order.
    pub fn drain_due(&mut self, now: u64) -> SmallVec<[Scheduled; 4]> {
        let mut due: SmallVec<[Entry; 4]> = SmallVec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].deadline <= now {
                due.push(self.entries.remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|e| e.deadline);
        due.into_iter().map(|e| e.item).collect()
    }

    /// Drop every pending item.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of pending items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frozen(player: PlayerId) -> Scheduled {
        Scheduled::Expire(TimedEffect::on_player(EffectKind::Frozen, player))
    }

    #[test]
    fn test_drain_due_respects_deadline() {
        let mut schedule = Schedule::new();
        schedule.schedule(frozen(PlayerId::ONE), 0, 3);

        assert!(schedule.drain_due(2).is_empty());
        let due = schedule.drain_due(3);
        assert_eq!(due.as_slice(), &[frozen(PlayerId::ONE)]);
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_reschedule_restarts_without_stacking() {
        let mut schedule = Schedule::new();
        schedule.schedule(frozen(PlayerId::TWO), 0, 3);
        schedule.schedule(frozen(PlayerId::TWO), 2, 3);

        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.remaining(frozen(PlayerId::TWO), 2), Some(3));
        assert!(schedule.drain_due(4).is_empty());
        assert_eq!(schedule.drain_due(5).len(), 1);
    }

    #[test]
    fn test_targets_are_independent() {
        let mut schedule = Schedule::new();
        let dizzy = Scheduled::Expire(TimedEffect::on_player(EffectKind::Dizzy, PlayerId::ONE));
        schedule.schedule(frozen(PlayerId::ONE), 0, 3);
        schedule.schedule(dizzy, 0, 10);
        schedule.schedule(frozen(PlayerId::TWO), 1, 3);

        assert_eq!(schedule.len(), 3);
        assert!(schedule.cancel(frozen(PlayerId::ONE)));
        assert!(!schedule.cancel(frozen(PlayerId::ONE)));
        assert!(schedule.is_pending(dizzy));
        assert!(schedule.is_pending(frozen(PlayerId::TWO)));
    }

    #[test]
    fn test_drain_orders_by_deadline() {
        let mut schedule = Schedule::new();
        schedule.schedule(Scheduled::SpawnProp, 0, 5);
        schedule.schedule(frozen(PlayerId::ONE), 0, 2);

        let due = schedule.drain_due(10);
        assert_eq!(due.as_slice(), &[frozen(PlayerId::ONE), Scheduled::SpawnProp]);
    }
}
