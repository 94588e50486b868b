use chrono::{DateTime, Utc};
use std::fmt;

use quiz_core::model::{
    Challenge, ChallengeId, GameKind, Outcome, PlacementChallenge, RoundLog, SessionSummary,
    SlotIndex,
};

use crate::error::SessionError;
use crate::pool::Pool;

use super::progress::SessionProgress;

//
// ─── SLOT ──────────────────────────────────────────────────────────────────────
//

/// One target position in the sequence being assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    index: SlotIndex,
    occupant: Option<ChallengeId>,
}

impl Slot {
    #[must_use]
    pub fn index(&self) -> SlotIndex {
        self.index
    }

    #[must_use]
    pub fn occupant(&self) -> Option<ChallengeId> {
        self.occupant
    }
}

/// Result of toggling an item selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The item became the pending selection.
    Selected(ChallengeId),
    /// The item was the pending selection and was deselected.
    Cleared,
}

/// Outcome of one placement submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementResult {
    pub item: ChallengeId,
    pub slot: SlotIndex,
    pub outcome: Outcome,
    pub is_complete: bool,
}

//
// ─── PLACEMENT SESSION ─────────────────────────────────────────────────────────
//

/// Round controller for sequencing puzzles.
///
/// The child first selects an item (selecting it again deselects it,
/// selecting another replaces the pending selection), then submits a slot.
/// Every submission against an open slot counts one attempt whether or not
/// it is correct; only a correct placement fills the slot. There is no
/// point score — fewer attempts is the performance signal.
pub struct PlacementSession {
    items: Vec<PlacementChallenge>,
    slots: Vec<Slot>,
    pending: Option<ChallengeId>,
    attempts: u32,
    logs: Vec<RoundLog>,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl PlacementSession {
    /// Create a session over a freshly built pool of placement items.
    ///
    /// The pool's shuffle decides the order the presentation layer deals
    /// the item cards in; target slots are derived from the items.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` for an empty pool, `WrongKind` for
    /// foreign challenges, and `DuplicateTarget` when two items claim the
    /// same slot.
    pub fn new(pool: Pool, started_at: DateTime<Utc>) -> Result<Self, SessionError> {
        let (items, slots) = Self::check_pool(pool)?;
        Ok(Self {
            items,
            slots,
            pending: None,
            attempts: 0,
            logs: Vec::new(),
            started_at,
            completed_at: None,
        })
    }

    fn check_pool(pool: Pool) -> Result<(Vec<PlacementChallenge>, Vec<Slot>), SessionError> {
        if pool.is_empty() {
            return Err(SessionError::Empty);
        }

        let mut items = Vec::with_capacity(pool.len());
        for entry in pool.entries() {
            match entry.challenge() {
                Challenge::Sequencing(item) => items.push(item.clone()),
                other => {
                    return Err(SessionError::WrongKind {
                        expected: GameKind::Sequencing,
                        found: other.kind(),
                    });
                }
            }
        }

        let mut slots: Vec<Slot> = items
            .iter()
            .map(|item| Slot {
                index: item.target,
                occupant: None,
            })
            .collect();
        slots.sort_by_key(Slot::index);
        for pair in slots.windows(2) {
            if pair[0].index == pair[1].index {
                return Err(SessionError::DuplicateTarget {
                    slot: pair[0].index,
                });
            }
        }

        Ok((items, slots))
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Item cards in deal order.
    #[must_use]
    pub fn items(&self) -> &[PlacementChallenge] {
        &self.items
    }

    /// Target slots in ascending order.
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// The item currently selected, if any.
    #[must_use]
    pub fn pending(&self) -> Option<ChallengeId> {
        self.pending
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Every submission, correct and failed, in order.
    #[must_use]
    pub fn logs(&self) -> &[RoundLog] {
        &self.logs
    }

    /// Re-derives completion from the slots: every slot must hold the item
    /// whose target it is. Never cached.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|slot| {
            slot.occupant.is_some_and(|id| {
                self.items
                    .iter()
                    .any(|item| item.id == id && item.target == slot.index)
            })
        })
    }

    /// Returns a snapshot of the current session progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let filled = self.slots.iter().filter(|s| s.occupant.is_some()).count();
        SessionProgress {
            total: self.slots.len(),
            answered: filled,
            remaining: self.slots.len().saturating_sub(filled),
            score: 0,
            attempts: self.attempts,
            is_complete: self.is_complete(),
        }
    }

    /// Toggle the pending selection.
    ///
    /// Selecting the pending item again deselects it; selecting a different
    /// item replaces the pending selection.
    ///
    /// # Errors
    ///
    /// Returns `UnknownChallenge` for an id outside this session and
    /// `AlreadyPlaced` for an item that already sits in its slot. Neither
    /// changes the pending selection.
    pub fn select(&mut self, id: ChallengeId) -> Result<Selection, SessionError> {
        if self.completed_at.is_some() {
            return Err(SessionError::Completed);
        }
        if !self.items.iter().any(|item| item.id == id) {
            return Err(SessionError::UnknownChallenge { id });
        }
        if self.slots.iter().any(|slot| slot.occupant == Some(id)) {
            return Err(SessionError::AlreadyPlaced { id });
        }

        if self.pending == Some(id) {
            self.pending = None;
            Ok(Selection::Cleared)
        } else {
            self.pending = Some(id);
            Ok(Selection::Selected(id))
        }
    }

    /// Submit the pending item into a slot.
    ///
    /// A submission against an open slot always counts one attempt. A
    /// correct placement fills the slot and clears the selection; a wrong
    /// one leaves the slot open and the item selected for another try.
    ///
    /// # Errors
    ///
    /// Returns `NothingSelected` with no pending item, `UnknownSlot` /
    /// `SlotFilled` for an invalid target, and `Completed` after the puzzle
    /// is solved. None of these counts an attempt.
    pub fn place(
        &mut self,
        slot: SlotIndex,
        now: DateTime<Utc>,
    ) -> Result<PlacementResult, SessionError> {
        if self.completed_at.is_some() {
            return Err(SessionError::Completed);
        }
        let Some(item_id) = self.pending else {
            return Err(SessionError::NothingSelected);
        };
        let Some(position) = self.slots.iter().position(|s| s.index == slot) else {
            return Err(SessionError::UnknownSlot { slot });
        };
        if self.slots[position].occupant.is_some() {
            return Err(SessionError::SlotFilled { slot });
        }

        let target = self
            .items
            .iter()
            .find(|item| item.id == item_id)
            .map(|item| item.target)
            .ok_or(SessionError::UnknownChallenge { id: item_id })?;

        self.attempts += 1;
        let outcome = if target == slot {
            Outcome::correct()
        } else {
            Outcome::incorrect()
        };
        self.logs.push(RoundLog::new(item_id, outcome, 0, now));

        if outcome.correct {
            self.slots[position].occupant = Some(item_id);
            self.pending = None;
            if self.is_complete() {
                self.completed_at = Some(now);
            }
        }

        Ok(PlacementResult {
            item: item_id,
            slot,
            outcome,
            is_complete: self.completed_at.is_some(),
        })
    }

    /// Replay: swap in a freshly built pool and reset all state.
    ///
    /// # Errors
    ///
    /// Same pool checks as `new`. On error the running session is untouched.
    pub fn reset(&mut self, pool: Pool, started_at: DateTime<Utc>) -> Result<(), SessionError> {
        let (items, slots) = Self::check_pool(pool)?;

        self.items = items;
        self.slots = slots;
        self.pending = None;
        self.attempts = 0;
        self.logs.clear();
        self.started_at = started_at;
        self.completed_at = None;
        Ok(())
    }

    /// Build the end-of-session summary.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` while the puzzle is unsolved and
    /// propagates summary consistency errors.
    pub fn summary(&self) -> Result<SessionSummary, SessionError> {
        let Some(completed_at) = self.completed_at else {
            return Err(SessionError::Completed);
        };
        Ok(SessionSummary::from_logs(
            GameKind::Sequencing,
            self.started_at,
            completed_at,
            self.attempts,
            &self.logs,
        )?)
    }
}

impl fmt::Debug for PlacementSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlacementSession")
            .field("items_len", &self.items.len())
            .field("pending", &self.pending)
            .field("attempts", &self.attempts)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::PoolBuilder;
    use quiz_core::time::fixed_now;

    fn master(n: u32) -> Vec<Challenge> {
        (0..n)
            .map(|i| {
                Challenge::Sequencing(
                    PlacementChallenge::new(
                        ChallengeId::new(u64::from(i) + 1),
                        SlotIndex::new(i),
                        format!("item {i}"),
                    )
                    .unwrap(),
                )
            })
            .collect()
    }

    fn session(n: u32) -> PlacementSession {
        let set = master(n);
        let pool = PoolBuilder::new(&set).with_seed(1).build().unwrap();
        PlacementSession::new(pool, fixed_now()).unwrap()
    }

    #[test]
    fn select_toggles_and_replaces() {
        let mut session = session(3);
        let first = ChallengeId::new(1);
        let second = ChallengeId::new(2);

        assert_eq!(session.select(first).unwrap(), Selection::Selected(first));
        assert_eq!(session.select(second).unwrap(), Selection::Selected(second));
        assert_eq!(session.pending(), Some(second));
        assert_eq!(session.select(second).unwrap(), Selection::Cleared);
        assert_eq!(session.pending(), None);
    }

    #[test]
    fn place_without_selection_is_refused() {
        let mut session = session(3);
        let err = session.place(SlotIndex::new(0), fixed_now()).unwrap_err();
        assert!(matches!(err, SessionError::NothingSelected));
        assert_eq!(session.attempts(), 0);
    }

    #[test]
    fn wrong_slot_counts_attempt_but_does_not_fill() {
        let mut session = session(3);
        session.select(ChallengeId::new(1)).unwrap();

        let result = session.place(SlotIndex::new(2), fixed_now()).unwrap();
        assert!(!result.outcome.correct);
        assert_eq!(session.attempts(), 1);
        assert!(session.slots().iter().all(|s| s.occupant().is_none()));
        // Still selected for another try.
        assert_eq!(session.pending(), Some(ChallengeId::new(1)));
    }

    #[test]
    fn correct_placement_fills_slot_and_clears_selection() {
        let mut session = session(3);
        session.select(ChallengeId::new(2)).unwrap();

        let result = session.place(SlotIndex::new(1), fixed_now()).unwrap();
        assert!(result.outcome.correct);
        assert_eq!(session.pending(), None);
        let slot = session
            .slots()
            .iter()
            .find(|s| s.index() == SlotIndex::new(1))
            .unwrap();
        assert_eq!(slot.occupant(), Some(ChallengeId::new(2)));
        assert!(!session.is_complete());
    }

    #[test]
    fn placed_item_cannot_be_reselected() {
        let mut session = session(2);
        session.select(ChallengeId::new(1)).unwrap();
        session.place(SlotIndex::new(0), fixed_now()).unwrap();

        let err = session.select(ChallengeId::new(1)).unwrap_err();
        assert!(matches!(err, SessionError::AlreadyPlaced { .. }));
    }

    #[test]
    fn filled_slot_is_not_a_valid_target() {
        let mut session = session(2);
        session.select(ChallengeId::new(1)).unwrap();
        session.place(SlotIndex::new(0), fixed_now()).unwrap();

        session.select(ChallengeId::new(2)).unwrap();
        let err = session.place(SlotIndex::new(0), fixed_now()).unwrap_err();
        assert!(matches!(err, SessionError::SlotFilled { .. }));
        assert_eq!(session.attempts(), 1);
    }

    #[test]
    fn completing_all_slots_finishes_the_session() {
        let mut session = session(2);

        session.select(ChallengeId::new(2)).unwrap();
        let mid = session.place(SlotIndex::new(1), fixed_now()).unwrap();
        assert!(!mid.is_complete);

        session.select(ChallengeId::new(1)).unwrap();
        let last = session.place(SlotIndex::new(0), fixed_now()).unwrap();
        assert!(last.is_complete);
        assert!(session.is_complete());

        let err = session.select(ChallengeId::new(1)).unwrap_err();
        assert!(matches!(err, SessionError::Completed));

        let summary = session.summary().unwrap();
        assert_eq!(summary.attempts(), 2);
        assert_eq!(summary.score(), 0);
    }

    #[test]
    fn duplicate_targets_are_rejected() {
        let set = vec![
            Challenge::Sequencing(
                PlacementChallenge::new(ChallengeId::new(1), SlotIndex::new(0), "a").unwrap(),
            ),
            Challenge::Sequencing(
                PlacementChallenge::new(ChallengeId::new(2), SlotIndex::new(0), "b").unwrap(),
            ),
        ];
        let pool = PoolBuilder::new(&set).with_seed(1).build().unwrap();
        let err = PlacementSession::new(pool, fixed_now()).unwrap_err();
        assert!(matches!(err, SessionError::DuplicateTarget { .. }));
    }

    #[test]
    fn reset_clears_progress() {
        let set = master(2);
        let mut session = session(2);
        session.select(ChallengeId::new(1)).unwrap();
        session.place(SlotIndex::new(1), fixed_now()).unwrap();
        assert_eq!(session.attempts(), 1);

        let pool = PoolBuilder::new(&set).with_seed(9).build().unwrap();
        session.reset(pool, fixed_now()).unwrap();
        assert_eq!(session.attempts(), 0);
        assert_eq!(session.pending(), None);
        assert!(session.logs().is_empty());
    }
}
