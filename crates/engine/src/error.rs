//! Shared error types for the engine crate.

use thiserror::Error;

use quiz_core::model::{ChallengeId, GameKind, SessionSummaryError, SlotIndex};

use crate::content::ContentError;
use crate::rules::RuleError;

/// Errors emitted by sessions and the game loop.
///
/// Most variants are refusals rather than failures: the input had no effect
/// and no session state changed. Callers rendering for children typically
/// drop them on the floor.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no challenges available for session")]
    Empty,
    #[error("session already completed")]
    Completed,
    #[error("round already answered, waiting for advance")]
    AwaitingAdvance,
    #[error("no item selected")]
    NothingSelected,
    #[error("advance token is stale")]
    StaleAdvance,
    #[error("expected {expected:?} content, found {found:?}")]
    WrongKind { expected: GameKind, found: GameKind },
    #[error("{kind:?} is not a quiz variant")]
    NotAQuiz { kind: GameKind },
    #[error("challenge {id} is not part of this session")]
    UnknownChallenge { id: ChallengeId },
    #[error("challenge {id} is already placed")]
    AlreadyPlaced { id: ChallengeId },
    #[error("slot {slot} is not part of this session")]
    UnknownSlot { slot: SlotIndex },
    #[error("slot {slot} is already filled")]
    SlotFilled { slot: SlotIndex },
    #[error("two items target slot {slot}")]
    DuplicateTarget { slot: SlotIndex },
    #[error(transparent)]
    Rule(#[from] RuleError),
    #[error(transparent)]
    Summary(#[from] SessionSummaryError),
    #[error(transparent)]
    Content(#[from] ContentError),
}
