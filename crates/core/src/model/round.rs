use chrono::{DateTime, Utc};

use crate::model::ids::{ChallengeId, SlotIndex};

//
// ─── ANSWER ────────────────────────────────────────────────────────────────────
//

/// One discrete input event forwarded by the presentation layer.
///
/// The variant must match the active challenge's kind; a mismatched shape
/// is refused by the rules without touching session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    /// Index into the option list of a multiple-choice question.
    Choice(usize),
    /// Judgement of a true/false statement.
    Truth(bool),
    /// Attempt to place `item` into `slot`.
    Place { item: ChallengeId, slot: SlotIndex },
    /// Identity chosen in a guessing round.
    Guess(ChallengeId),
}

//
// ─── OUTCOME ───────────────────────────────────────────────────────────────────
//

/// Result of validating one input against one challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub correct: bool,
}

impl Outcome {
    #[must_use]
    pub fn correct() -> Self {
        Self { correct: true }
    }

    #[must_use]
    pub fn incorrect() -> Self {
        Self { correct: false }
    }
}

//
// ─── ROUND LOG ─────────────────────────────────────────────────────────────────
//

/// Record of a single evaluated round.
///
/// Stores which challenge was answered, when, whether it was correct, and
/// the points awarded. Sequencing sessions log every submission with zero
/// points; the attempt counter is the performance signal there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundLog {
    pub challenge_id: ChallengeId,
    pub answered_at: DateTime<Utc>,
    pub correct: bool,
    pub points: u32,
}

impl RoundLog {
    #[must_use]
    pub fn new(
        challenge_id: ChallengeId,
        outcome: Outcome,
        points: u32,
        answered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            challenge_id,
            answered_at,
            correct: outcome.correct,
            points,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
