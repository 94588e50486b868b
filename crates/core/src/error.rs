use thiserror::Error;

use crate::model::{ChallengeError, SessionSummaryError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Challenge(#[from] ChallengeError),
    #[error(transparent)]
    Summary(#[from] SessionSummaryError),
}
