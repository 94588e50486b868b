/// Handle for the deferred advance from feedback to the next round.
///
/// `QuizSession::answer` hands one out when rounds remain; the presentation
/// layer schedules its feedback delay and then calls
/// `QuizSession::advance` with the token. A token is bound to one session
/// generation and one round, so a timer that fires after reset or teardown
/// is refused instead of mutating stale state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceToken {
    pub(crate) generation: u64,
    pub(crate) next_round: usize,
}

impl AdvanceToken {
    /// Index of the round this token advances into.
    #[must_use]
    pub fn next_round(&self) -> usize {
        self.next_round
    }
}
