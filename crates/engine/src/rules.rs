//! Per-variant validation rules.
//!
//! One pure function decides whether an input satisfies a challenge; all
//! round bookkeeping lives in the sessions. A refused input returns
//! `RuleError` and leaves nothing to roll back.

use thiserror::Error;

use quiz_core::model::{Answer, Challenge, GameKind, Outcome};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RuleError {
    #[error("answer shape does not match {expected:?} challenge")]
    AnswerShape { expected: GameKind },

    #[error("option index {index} out of range for {len} options")]
    ChoiceOutOfRange { index: usize, len: usize },
}

/// Validate one input against one challenge.
///
/// - Multiple-choice: correct iff the chosen index equals the stored one.
/// - True/false: correct iff the judgement equals the stored answer.
/// - Sequencing: correct iff the attempted slot is the item's target.
/// - Guessing: correct iff the chosen identity is the challenge subject,
///   whatever clue count happens to be revealed.
///
/// # Errors
///
/// Returns `RuleError::AnswerShape` when the answer variant does not match
/// the challenge kind, and `ChoiceOutOfRange` for an index no option list
/// position corresponds to. Neither implies any state change.
pub fn evaluate(challenge: &Challenge, answer: &Answer) -> Result<Outcome, RuleError> {
    match (challenge, answer) {
        (Challenge::MultipleChoice(c), Answer::Choice(index)) => {
            if *index >= c.options.len() {
                return Err(RuleError::ChoiceOutOfRange {
                    index: *index,
                    len: c.options.len(),
                });
            }
            Ok(outcome(*index == c.correct_index))
        }
        (Challenge::TrueFalse(c), Answer::Truth(judgement)) => {
            Ok(outcome(*judgement == c.answer))
        }
        (Challenge::Sequencing(c), Answer::Place { item, slot }) => {
            Ok(outcome(*item == c.id && *slot == c.target))
        }
        (Challenge::Guessing(c), Answer::Guess(id)) => Ok(outcome(*id == c.id)),
        _ => Err(RuleError::AnswerShape {
            expected: challenge.kind(),
        }),
    }
}

fn outcome(correct: bool) -> Outcome {
    if correct {
        Outcome::correct()
    } else {
        Outcome::incorrect()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{
        ChallengeId, ChoiceChallenge, ClueChallenge, PlacementChallenge, SlotIndex,
        StatementChallenge,
    };

    fn choice() -> Challenge {
        Challenge::MultipleChoice(
            ChoiceChallenge::new(
                ChallengeId::new(1),
                "Which animal barks?",
                vec!["Cat".into(), "Dog".into(), "Cow".into()],
                1,
                None,
            )
            .unwrap(),
        )
    }

    #[test]
    fn choice_matches_correct_index() {
        let challenge = choice();
        assert!(evaluate(&challenge, &Answer::Choice(1)).unwrap().correct);
        assert!(!evaluate(&challenge, &Answer::Choice(0)).unwrap().correct);
    }

    #[test]
    fn choice_out_of_range_is_refused() {
        let err = evaluate(&choice(), &Answer::Choice(3)).unwrap_err();
        assert!(matches!(err, RuleError::ChoiceOutOfRange { index: 3, len: 3 }));
    }

    #[test]
    fn truth_matches_stored_answer() {
        let challenge = Challenge::TrueFalse(
            StatementChallenge::new(ChallengeId::new(2), "Fish swim", true, None).unwrap(),
        );
        assert!(evaluate(&challenge, &Answer::Truth(true)).unwrap().correct);
        assert!(!evaluate(&challenge, &Answer::Truth(false)).unwrap().correct);
    }

    #[test]
    fn placement_requires_target_slot() {
        let challenge = Challenge::Sequencing(
            PlacementChallenge::new(ChallengeId::new(3), SlotIndex::new(2), "Third").unwrap(),
        );
        let right = Answer::Place {
            item: ChallengeId::new(3),
            slot: SlotIndex::new(2),
        };
        let wrong_slot = Answer::Place {
            item: ChallengeId::new(3),
            slot: SlotIndex::new(0),
        };
        assert!(evaluate(&challenge, &right).unwrap().correct);
        assert!(!evaluate(&challenge, &wrong_slot).unwrap().correct);
    }

    #[test]
    fn guess_matches_subject_identity() {
        let challenge = Challenge::Guessing(
            ClueChallenge::new(ChallengeId::new(4), "Elephant", vec!["gray".into()]).unwrap(),
        );
        assert!(
            evaluate(&challenge, &Answer::Guess(ChallengeId::new(4)))
                .unwrap()
                .correct
        );
        assert!(
            !evaluate(&challenge, &Answer::Guess(ChallengeId::new(9)))
                .unwrap()
                .correct
        );
    }

    #[test]
    fn mismatched_shape_is_refused() {
        let err = evaluate(&choice(), &Answer::Truth(true)).unwrap_err();
        assert!(matches!(
            err,
            RuleError::AnswerShape {
                expected: GameKind::MultipleChoice
            }
        ));
    }
}
