mod advance;
mod placement;
mod progress;
mod quiz;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use advance::AdvanceToken;
pub use placement::{PlacementResult, PlacementSession, Selection, Slot};
pub use progress::SessionProgress;
pub use quiz::{QuizSession, RoundResult};
pub use workflow::{GameLoopService, SessionAnswerResult};
