#![forbid(unsafe_code)]

pub mod content;
pub mod error;
pub mod pool;
pub mod rules;
pub mod score;
pub mod sessions;

pub use quiz_core::Clock;

pub use content::{ContentError, ContentSource, InMemoryContent, JsonContent};
pub use error::SessionError;
pub use pool::{Pool, PoolBuilder, PoolEntry};
pub use rules::RuleError;
pub use score::{Effort, ScorePolicy};

pub use sessions::{
    AdvanceToken, GameLoopService, PlacementResult, PlacementSession, QuizSession, RoundResult,
    Selection, SessionAnswerResult, SessionProgress, Slot,
};
