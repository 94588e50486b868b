mod challenge;
mod ids;
mod round;
mod summary;

pub use challenge::{
    Challenge, ChallengeError, ChoiceChallenge, ClueChallenge, GameKind, PlacementChallenge,
    StatementChallenge,
};
pub use ids::{ChallengeId, ParseIdError, SlotIndex};
pub use round::{Answer, Outcome, RoundLog};
pub use summary::{SessionSummary, SessionSummaryError};
