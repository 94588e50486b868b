use std::sync::Arc;

use engine::{Clock, GameLoopService, InMemoryContent, SessionError};
use quiz_core::model::{Answer, Challenge, ChallengeId, ClueChallenge, GameKind};
use quiz_core::time::fixed_now;

fn animals() -> Vec<Challenge> {
    let subjects = ["Elephant", "Penguin", "Giraffe", "Dolphin", "Owl", "Fox"];
    subjects
        .iter()
        .enumerate()
        .map(|(i, subject)| {
            let clues = (1..=5).map(|c| format!("{subject} clue {c}")).collect();
            Challenge::Guessing(
                ClueChallenge::new(ChallengeId::new(u64::try_from(i).unwrap() + 1), *subject, clues)
                    .unwrap(),
            )
        })
        .collect()
}

fn service() -> GameLoopService {
    let content = InMemoryContent::new()
        .with_set(GameKind::Guessing, animals())
        .unwrap();
    GameLoopService::new(Clock::fixed(fixed_now()), Arc::new(content)).with_seed(8)
}

#[test]
fn correct_answer_after_three_clues_earns_two_points() {
    let svc = service().with_round_count(1);
    let mut session = svc.start_quiz(GameKind::Guessing).unwrap();

    // First clue is free; reveal two more.
    session.reveal_clue().unwrap();
    session.reveal_clue().unwrap();
    assert_eq!(session.revealed_clues().unwrap().len(), 3);

    let correct = session.current_challenge().unwrap().id();
    let result = svc
        .answer_current(&mut session, &Answer::Guess(correct))
        .unwrap();
    assert_eq!(result.result.points, 2);
    assert_eq!(session.score(), 2);
}

#[test]
fn correct_answer_with_all_clues_still_earns_one_point() {
    let svc = service().with_round_count(1);
    let mut session = svc.start_quiz(GameKind::Guessing).unwrap();

    for _ in 0..10 {
        session.reveal_clue().unwrap();
    }
    assert_eq!(session.revealed_clues().unwrap().len(), 5);

    let correct = session.current_challenge().unwrap().id();
    let result = svc
        .answer_current(&mut session, &Answer::Guess(correct))
        .unwrap();
    assert_eq!(result.result.points, 1);
}

#[test]
fn wrong_guess_earns_nothing() {
    let svc = service().with_round_count(1);
    let mut session = svc.start_quiz(GameKind::Guessing).unwrap();

    let result = svc
        .answer_current(&mut session, &Answer::Guess(ChallengeId::new(999)))
        .unwrap();
    assert_eq!(result.result.points, 0);
    assert_eq!(session.score(), 0);
    assert!(session.is_complete());
}

#[test]
fn revealing_after_the_answer_never_changes_the_score() {
    let svc = service().with_round_count(2);
    let mut session = svc.start_quiz(GameKind::Guessing).unwrap();

    let correct = session.current_challenge().unwrap().id();
    let result = svc
        .answer_current(&mut session, &Answer::Guess(correct))
        .unwrap();
    let earned = result.result.points;
    assert_eq!(earned, 4);

    let err = session.reveal_clue().unwrap_err();
    assert!(matches!(err, SessionError::AwaitingAdvance));
    assert_eq!(session.score(), earned);

    // The next round starts with a single clue again.
    session.advance(result.result.advance.unwrap()).unwrap();
    assert_eq!(session.revealed_clues().unwrap().len(), 1);
}

#[test]
fn each_round_offers_the_correct_identity_among_decoys() {
    let svc = service().with_round_count(4).with_decoy_count(3);
    let mut session = svc.start_quiz(GameKind::Guessing).unwrap();

    loop {
        let correct = session.current_challenge().unwrap().id();
        let choices = session.current_choices();
        assert_eq!(choices.len(), 4);
        assert!(choices.contains(&correct));

        let result = svc
            .answer_current(&mut session, &Answer::Guess(correct))
            .unwrap();
        match result.result.advance {
            Some(token) => session.advance(token).unwrap(),
            None => break,
        }
    }
    assert!(session.is_complete());
    assert_eq!(session.summary().unwrap().correct(), 4);
}
