use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::model::{Answer, GameKind, SessionSummary};

use crate::content::ContentSource;
use crate::error::SessionError;
use crate::pool::{Pool, PoolBuilder};

use super::placement::PlacementSession;
use super::quiz::{QuizSession, RoundResult};

/// Result of answering the current round through the game loop.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionAnswerResult {
    pub result: RoundResult,
    pub is_complete: bool,
    /// Built once, when this answer completed the session.
    pub summary: Option<SessionSummary>,
    /// When the presentation layer should redeem the advance token.
    pub advance_due_at: Option<DateTime<Utc>>,
}

/// Orchestrates session start, answering, and replay for one game screen.
///
/// Owns the clock, the content source, and the session configuration; the
/// presentation layer keeps one of these per screen and drives it with
/// discrete input events.
#[derive(Clone)]
pub struct GameLoopService {
    clock: Clock,
    content: Arc<dyn ContentSource>,
    round_count: usize,
    decoy_count: usize,
    feedback_delay: Duration,
    seed: Option<u64>,
}

impl GameLoopService {
    /// Rounds per session unless overridden.
    pub const DEFAULT_ROUND_COUNT: usize = 10;
    /// Decoy identities sampled per guessing round unless overridden.
    pub const DEFAULT_DECOY_COUNT: usize = 3;
    /// Pause between feedback and the next round, in milliseconds.
    pub const DEFAULT_FEEDBACK_DELAY_MS: i64 = 1_200;

    #[must_use]
    pub fn new(clock: Clock, content: Arc<dyn ContentSource>) -> Self {
        Self {
            clock,
            content,
            round_count: Self::DEFAULT_ROUND_COUNT,
            decoy_count: Self::DEFAULT_DECOY_COUNT,
            feedback_delay: Duration::milliseconds(Self::DEFAULT_FEEDBACK_DELAY_MS),
            seed: None,
        }
    }

    #[must_use]
    pub fn with_round_count(mut self, count: usize) -> Self {
        self.round_count = count;
        self
    }

    #[must_use]
    pub fn with_decoy_count(mut self, count: usize) -> Self {
        self.decoy_count = count;
        self
    }

    #[must_use]
    pub fn with_feedback_delay(mut self, delay: Duration) -> Self {
        self.feedback_delay = delay;
        self
    }

    /// Seed pool shuffles for deterministic sessions in tests.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Pause the presentation layer should wait before redeeming an
    /// advance token.
    #[must_use]
    pub fn feedback_delay(&self) -> Duration {
        self.feedback_delay
    }

    fn build_pool(&self, kind: GameKind) -> Result<Pool, SessionError> {
        let master = self.content.challenges(kind)?;
        let mut builder = PoolBuilder::new(&master).with_round_count(self.round_count);
        if kind == GameKind::Guessing {
            builder = builder.with_decoys(self.decoy_count);
        }
        if let Some(seed) = self.seed {
            builder = builder.with_seed(seed);
        }
        builder.build()
    }

    /// Start a quiz session of the given kind.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotAQuiz` for `Sequencing` (use
    /// `start_placement`), `Content` when the content source has nothing to
    /// offer, and `Empty` when the pool comes out empty.
    pub fn start_quiz(&self, kind: GameKind) -> Result<QuizSession, SessionError> {
        let pool = self.build_pool(kind)?;
        QuizSession::new(kind, pool, self.clock.now())
    }

    /// Start a sequencing-puzzle session.
    ///
    /// # Errors
    ///
    /// Returns `Content` when the content source has nothing to offer and
    /// pool-shape errors from the session constructor.
    pub fn start_placement(&self) -> Result<PlacementSession, SessionError> {
        let pool = self.build_pool(GameKind::Sequencing)?;
        PlacementSession::new(pool, self.clock.now())
    }

    /// Answer the current round and build the summary when this finishes
    /// the session.
    ///
    /// # Errors
    ///
    /// Propagates the session's refusals unchanged; none of them has
    /// mutated any state.
    pub fn answer_current(
        &self,
        session: &mut QuizSession,
        answer: &Answer,
    ) -> Result<SessionAnswerResult, SessionError> {
        let now = self.clock.now();
        let result = session.answer(answer, now)?;

        let summary = if session.is_complete() {
            Some(session.summary()?)
        } else {
            None
        };
        let advance_due_at = result.advance.map(|_| now + self.feedback_delay);

        Ok(SessionAnswerResult {
            result,
            is_complete: session.is_complete(),
            summary,
            advance_due_at,
        })
    }

    /// Replay trigger: rebuild the pool and reset the session.
    ///
    /// Outstanding advance tokens become stale.
    ///
    /// # Errors
    ///
    /// Returns content and pool errors; on error the running session is
    /// untouched.
    pub fn restart_quiz(&self, session: &mut QuizSession) -> Result<(), SessionError> {
        let pool = self.build_pool(session.kind())?;
        session.reset(pool, self.clock.now())
    }

    /// Replay trigger for sequencing puzzles.
    ///
    /// # Errors
    ///
    /// Returns content and pool errors; on error the running session is
    /// untouched.
    pub fn restart_placement(&self, session: &mut PlacementSession) -> Result<(), SessionError> {
        let pool = self.build_pool(GameKind::Sequencing)?;
        session.reset(pool, self.clock.now())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
