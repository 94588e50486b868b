use chrono::{DateTime, Utc};
use std::fmt;

use quiz_core::model::{
    Answer, Challenge, ChallengeId, GameKind, Outcome, RoundLog, SessionSummary,
};

use crate::error::SessionError;
use crate::pool::{Pool, PoolEntry};
use crate::rules;
use crate::score::{Effort, ScorePolicy};

use super::advance::AdvanceToken;
use super::progress::SessionProgress;

//
// ─── ROUND RESULT ──────────────────────────────────────────────────────────────
//

/// Outcome of evaluating one answer within a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    pub challenge_id: ChallengeId,
    pub outcome: Outcome,
    pub points: u32,
    /// Present while rounds remain; `None` on the final round.
    pub advance: Option<AdvanceToken>,
}

//
// ─── PHASE ─────────────────────────────────────────────────────────────────────
//

/// Where the controller stands within the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoundPhase {
    /// The current challenge is presented and exactly one answer is accepted.
    Awaiting,
    /// The answer was evaluated; waiting for the deferred advance.
    Feedback,
    /// Terminal until replay.
    Complete,
}

//
// ─── QUIZ SESSION ──────────────────────────────────────────────────────────────
//

/// Round controller for the index-advancing game families: multiple-choice,
/// true/false, and progressive-clue guessing.
///
/// Exactly one answer is accepted per round. Evaluation awards points via
/// the kind's `ScorePolicy` and hands back an `AdvanceToken`; the session
/// stays in its feedback phase until the token is redeemed, so a
/// double-submit during the feedback delay is refused without effect.
pub struct QuizSession {
    kind: GameKind,
    rounds: Vec<PoolEntry>,
    current: usize,
    phase: RoundPhase,
    clues_revealed: u32,
    policy: ScorePolicy,
    score: u32,
    attempts: u32,
    logs: Vec<RoundLog>,
    generation: u64,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Create a session over a freshly built pool.
    ///
    /// `started_at` should come from the caller's clock to keep time
    /// deterministic.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` for an empty pool,
    /// `SessionError::NotAQuiz` for the sequencing kind (which has its own
    /// controller), and `SessionError::WrongKind` when the pool holds
    /// challenges of another kind.
    pub fn new(
        kind: GameKind,
        pool: Pool,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        let rounds = Self::check_pool(kind, pool)?;
        Ok(Self {
            kind,
            rounds,
            current: 0,
            phase: RoundPhase::Awaiting,
            clues_revealed: 1,
            policy: ScorePolicy::for_kind(kind),
            score: 0,
            attempts: 0,
            logs: Vec::new(),
            generation: 0,
            started_at,
            completed_at: None,
        })
    }

    fn check_pool(kind: GameKind, pool: Pool) -> Result<Vec<PoolEntry>, SessionError> {
        if kind == GameKind::Sequencing {
            return Err(SessionError::NotAQuiz { kind });
        }
        if pool.is_empty() {
            return Err(SessionError::Empty);
        }
        for entry in pool.entries() {
            let found = entry.challenge().kind();
            if found != kind {
                return Err(SessionError::WrongKind {
                    expected: kind,
                    found,
                });
            }
        }
        Ok(pool.into_entries())
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
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub fn logs(&self) -> &[RoundLog] {
        &self.logs
    }

    /// Total number of rounds in this session.
    #[must_use]
    pub fn total_rounds(&self) -> usize {
        self.rounds.len()
    }

    /// Number of rounds already evaluated.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.logs.len()
    }

    /// Number of rounds not yet evaluated.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.rounds.len().saturating_sub(self.answered_count())
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == RoundPhase::Complete
    }

    /// Returns a snapshot of the current session progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.total_rounds(),
            answered: self.answered_count(),
            remaining: self.remaining(),
            score: self.score,
            attempts: self.attempts,
            is_complete: self.is_complete(),
        }
    }

    /// The active challenge, or `None` once the session is complete.
    #[must_use]
    pub fn current_challenge(&self) -> Option<&Challenge> {
        if self.is_complete() {
            return None;
        }
        self.rounds.get(self.current).map(PoolEntry::challenge)
    }

    /// Pre-shuffled identity choices for the current guessing round; empty
    /// for pools built without decoy sampling.
    #[must_use]
    pub fn current_choices(&self) -> &[ChallengeId] {
        if self.is_complete() {
            return &[];
        }
        self.rounds
            .get(self.current)
            .map_or(&[], PoolEntry::choices)
    }

    /// Clues revealed so far in the current guessing round.
    ///
    /// Returns `None` for non-guessing sessions.
    #[must_use]
    pub fn revealed_clues(&self) -> Option<&[String]> {
        match self.current_challenge() {
            Some(Challenge::Guessing(c)) => {
                let revealed = (self.clues_revealed as usize).min(c.clues.len());
                Some(&c.clues[..revealed])
            }
            _ => None,
        }
    }

    /// Reveal the next clue of the current guessing round.
    ///
    /// Returns the revealed count, capped at the clue list length.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::WrongKind` for non-guessing sessions and the
    /// usual phase refusals outside `Awaiting`; revealing during feedback
    /// cannot retroactively change an evaluated score.
    pub fn reveal_clue(&mut self) -> Result<u32, SessionError> {
        if self.kind != GameKind::Guessing {
            return Err(SessionError::WrongKind {
                expected: GameKind::Guessing,
                found: self.kind,
            });
        }
        match self.phase {
            RoundPhase::Complete => return Err(SessionError::Completed),
            RoundPhase::Feedback => return Err(SessionError::AwaitingAdvance),
            RoundPhase::Awaiting => {}
        }

        let Some(Challenge::Guessing(c)) = self.rounds.get(self.current).map(PoolEntry::challenge)
        else {
            return Err(SessionError::Completed);
        };
        let max = u32::try_from(c.clues.len()).unwrap_or(u32::MAX);
        if self.clues_revealed < max {
            self.clues_revealed += 1;
        }
        Ok(self.clues_revealed)
    }

    /// Evaluate exactly one answer for the current round.
    ///
    /// On success the session either enters its feedback phase (token
    /// returned) or completes (final round). On error nothing changed.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` after the last round,
    /// `AwaitingAdvance` for a second submit before the advance, and
    /// `SessionError::Rule` for an answer whose shape does not fit.
    pub fn answer(
        &mut self,
        answer: &Answer,
        now: DateTime<Utc>,
    ) -> Result<RoundResult, SessionError> {
        match self.phase {
            RoundPhase::Complete => return Err(SessionError::Completed),
            RoundPhase::Feedback => return Err(SessionError::AwaitingAdvance),
            RoundPhase::Awaiting => {}
        }
        let Some(entry) = self.rounds.get(self.current) else {
            return Err(SessionError::Completed);
        };

        let challenge = entry.challenge();
        let outcome = rules::evaluate(challenge, answer)?;

        let effort = match challenge {
            Challenge::Guessing(c) => Effort::clues(self.clues_revealed, c.max_points()),
            _ => Effort::none(),
        };
        let points = self.policy.delta(outcome, effort);

        let challenge_id = challenge.id();
        self.score += points;
        self.attempts += 1;
        self.logs
            .push(RoundLog::new(challenge_id, outcome, points, now));

        let advance = if self.current + 1 < self.rounds.len() {
            self.phase = RoundPhase::Feedback;
            Some(AdvanceToken {
                generation: self.generation,
                next_round: self.current + 1,
            })
        } else {
            self.phase = RoundPhase::Complete;
            self.completed_at = Some(now);
            None
        };

        Ok(RoundResult {
            challenge_id,
            outcome,
            points,
            advance,
        })
    }

    /// Redeem an advance token, moving from feedback to the next round.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::StaleAdvance` when the token belongs to an
    /// earlier generation or round, or when the session is not in its
    /// feedback phase; stale timers must not mutate state.
    pub fn advance(&mut self, token: AdvanceToken) -> Result<(), SessionError> {
        let expected = AdvanceToken {
            generation: self.generation,
            next_round: self.current + 1,
        };
        if self.phase != RoundPhase::Feedback || token != expected {
            return Err(SessionError::StaleAdvance);
        }

        self.current += 1;
        self.clues_revealed = 1;
        self.phase = RoundPhase::Awaiting;
        Ok(())
    }

    /// Replay: swap in a freshly built pool and reset all round state.
    ///
    /// Bumps the session generation so advance tokens handed out before the
    /// reset are refused.
    ///
    /// # Errors
    ///
    /// Same pool checks as `new`. On error the running session is untouched.
    pub fn reset(&mut self, pool: Pool, started_at: DateTime<Utc>) -> Result<(), SessionError> {
        let rounds = Self::check_pool(self.kind, pool)?;

        self.rounds = rounds;
        self.current = 0;
        self.phase = RoundPhase::Awaiting;
        self.clues_revealed = 1;
        self.score = 0;
        self.attempts = 0;
        self.logs.clear();
        self.generation += 1;
        self.started_at = started_at;
        self.completed_at = None;
        Ok(())
    }

    /// Build the end-of-session summary.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` while the session is still running
    /// and propagates summary consistency errors.
    pub fn summary(&self) -> Result<SessionSummary, SessionError> {
        let Some(completed_at) = self.completed_at else {
            return Err(SessionError::Completed);
        };
        Ok(SessionSummary::from_logs(
            self.kind,
            self.started_at,
            completed_at,
            self.attempts,
            &self.logs,
        )?)
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("kind", &self.kind)
            .field("rounds_len", &self.rounds.len())
            .field("current", &self.current)
            .field("phase", &self.phase)
            .field("score", &self.score)
            .field("attempts", &self.attempts)
            .field("generation", &self.generation)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
