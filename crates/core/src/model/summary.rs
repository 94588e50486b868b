use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::challenge::GameKind;
use crate::model::round::RoundLog;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionSummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("too many rounds for a single session: {len}")]
    TooManyRounds { len: usize },

    #[error("total rounds ({total}) does not match correct + incorrect ({sum})")]
    CountMismatch { total: u32, sum: u32 },

    #[error("attempt count {attempts} is lower than evaluated rounds {rounds}")]
    AttemptsBelowRounds { attempts: u32, rounds: u32 },
}

/// Aggregate summary for a completed session, shown on the end screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    kind: GameKind,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    rounds: u32,
    correct: u32,
    incorrect: u32,
    score: u32,
    attempts: u32,
}

impl SessionSummary {
    /// Rebuild a session summary from already-counted figures.
    ///
    /// # Errors
    ///
    /// Returns `SessionSummaryError::InvalidTimeRange` if the timestamps are
    /// reversed, `CountMismatch` if correct + incorrect does not equal the
    /// round total, and `AttemptsBelowRounds` if fewer attempts than
    /// evaluated rounds were recorded.
    #[allow(clippy::too_many_arguments)]
    pub fn from_counts(
        kind: GameKind,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        rounds: u32,
        correct: u32,
        incorrect: u32,
        score: u32,
        attempts: u32,
    ) -> Result<Self, SessionSummaryError> {
        if completed_at < started_at {
            return Err(SessionSummaryError::InvalidTimeRange);
        }
        let sum = correct + incorrect;
        if sum != rounds {
            return Err(SessionSummaryError::CountMismatch { total: rounds, sum });
        }
        if attempts < rounds {
            return Err(SessionSummaryError::AttemptsBelowRounds { attempts, rounds });
        }

        Ok(Self {
            kind,
            started_at,
            completed_at,
            rounds,
            correct,
            incorrect,
            score,
            attempts,
        })
    }

    /// Build a summary from the per-round logs of a finished session.
    ///
    /// `attempts` is carried separately because sequencing sessions count
    /// failed submissions that never produce a round log entry.
    ///
    /// # Errors
    ///
    /// Returns `SessionSummaryError::InvalidTimeRange` if `completed_at` is
    /// before `started_at`, and `TooManyRounds` if the log count cannot fit
    /// in `u32`.
    pub fn from_logs(
        kind: GameKind,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        attempts: u32,
        logs: &[RoundLog],
    ) -> Result<Self, SessionSummaryError> {
        if completed_at < started_at {
            return Err(SessionSummaryError::InvalidTimeRange);
        }

        let mut correct = 0_u32;
        let mut incorrect = 0_u32;
        let mut score = 0_u32;
        for log in logs {
            if log.correct {
                correct = correct.saturating_add(1);
            } else {
                incorrect = incorrect.saturating_add(1);
            }
            score = score.saturating_add(log.points);
        }

        let rounds = u32::try_from(logs.len())
            .map_err(|_| SessionSummaryError::TooManyRounds { len: logs.len() })?;

        Self::from_counts(
            kind,
            started_at,
            completed_at,
            rounds,
            correct,
            incorrect,
            score,
            attempts,
        )
    }

    #[must_use]
    pub fn kind(&self) -> GameKind {
        self.kind
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChallengeId, Outcome};
    use crate::time::fixed_now;

    fn log(id: u64, correct: bool, points: u32) -> RoundLog {
        let outcome = if correct {
            Outcome::correct()
        } else {
            Outcome::incorrect()
        };
        RoundLog::new(ChallengeId::new(id), outcome, points, fixed_now())
    }

    #[test]
    fn summary_counts_outcomes_and_points() {
        let now = fixed_now();
        let logs = vec![
            log(1, true, 1),
            log(2, false, 0),
            log(3, true, 1),
            log(4, true, 1),
        ];

        let summary =
            SessionSummary::from_logs(GameKind::MultipleChoice, now, now, 4, &logs).unwrap();

        assert_eq!(summary.rounds(), 4);
        assert_eq!(summary.correct(), 3);
        assert_eq!(summary.incorrect(), 1);
        assert_eq!(summary.score(), 3);
        assert_eq!(summary.attempts(), 4);
    }

    #[test]
    fn summary_rejects_reversed_time_range() {
        let now = fixed_now();
        let earlier = now - chrono::Duration::seconds(10);
        let err = SessionSummary::from_logs(GameKind::TrueFalse, now, earlier, 0, &[]).unwrap_err();
        assert!(matches!(err, SessionSummaryError::InvalidTimeRange));
    }

    #[test]
    fn summary_rejects_count_mismatch() {
        let now = fixed_now();
        let err = SessionSummary::from_counts(GameKind::TrueFalse, now, now, 5, 2, 2, 2, 5)
            .unwrap_err();
        assert!(matches!(
            err,
            SessionSummaryError::CountMismatch { total: 5, sum: 4 }
        ));
    }

    #[test]
    fn summary_allows_extra_attempts_for_sequencing() {
        let now = fixed_now();
        let logs = vec![log(1, true, 0), log(2, true, 0), log(3, true, 0)];
        let summary = SessionSummary::from_logs(GameKind::Sequencing, now, now, 5, &logs).unwrap();
        assert_eq!(summary.attempts(), 5);
        assert_eq!(summary.score(), 0);
    }
}
