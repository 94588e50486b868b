//! Score policies, one per game family.
//!
//! Deltas are never negative, so a session score is non-decreasing by
//! construction.

use quiz_core::model::{GameKind, Outcome};

/// Effort signal accompanying an answer; only guessing games carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Effort {
    pub clues_revealed: u32,
    pub max_points: u32,
}

impl Effort {
    /// No effort signal; used by every variant except guessing.
    #[must_use]
    pub fn none() -> Self {
        Self {
            clues_revealed: 0,
            max_points: 0,
        }
    }

    /// Clue usage at the moment of the answer.
    #[must_use]
    pub fn clues(revealed: u32, max_points: u32) -> Self {
        Self {
            clues_revealed: revealed,
            max_points,
        }
    }
}

/// Maps (outcome, effort) to a point delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScorePolicy {
    /// One point per correct answer (multiple-choice, true/false).
    PointPerCorrect,
    /// `max_points - clues_revealed`, floored at 1 for any correct answer.
    CluesSpared,
    /// No points; the attempt counter is the performance signal.
    AttemptsOnly,
}

impl ScorePolicy {
    #[must_use]
    pub fn for_kind(kind: GameKind) -> Self {
        match kind {
            GameKind::MultipleChoice | GameKind::TrueFalse => Self::PointPerCorrect,
            GameKind::Guessing => Self::CluesSpared,
            GameKind::Sequencing => Self::AttemptsOnly,
        }
    }

    /// Point delta for one evaluated round. Wrong answers always award 0.
    #[must_use]
    pub fn delta(&self, outcome: Outcome, effort: Effort) -> u32 {
        if !outcome.correct {
            return 0;
        }
        match self {
            Self::PointPerCorrect => 1,
            Self::AttemptsOnly => 0,
            Self::CluesSpared => effort
                .max_points
                .saturating_sub(effort.clues_revealed)
                .max(1),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
