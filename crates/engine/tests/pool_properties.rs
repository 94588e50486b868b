use std::collections::HashSet;
use std::sync::Arc;

use engine::{Clock, GameLoopService, JsonContent, PoolBuilder, SessionError};
use quiz_core::model::{Answer, Challenge, ChallengeId, GameKind, StatementChallenge};
use quiz_core::time::fixed_now;

fn statements(n: u64) -> Vec<Challenge> {
    (1..=n)
        .map(|id| {
            Challenge::TrueFalse(
                StatementChallenge::new(ChallengeId::new(id), format!("S{id}"), id % 2 == 0, None)
                    .unwrap(),
            )
        })
        .collect()
}

#[test]
fn pool_size_is_min_of_round_count_and_master_size() {
    let master = statements(7);
    for requested in [1_usize, 5, 7, 12] {
        let pool = PoolBuilder::new(&master)
            .with_round_count(requested)
            .with_seed(2)
            .build()
            .unwrap();
        assert_eq!(pool.len(), requested.min(master.len()));
    }
}

#[test]
fn pool_never_invents_or_duplicates_challenges() {
    let master = statements(15);
    let master_ids: HashSet<_> = master.iter().map(Challenge::id).collect();

    for seed in 0..20 {
        let pool = PoolBuilder::new(&master)
            .with_round_count(10)
            .with_seed(seed)
            .build()
            .unwrap();
        let drawn: Vec<_> = pool.entries().map(|e| e.challenge().id()).collect();
        let unique: HashSet<_> = drawn.iter().copied().collect();

        assert_eq!(unique.len(), drawn.len(), "seed {seed} drew a duplicate");
        assert!(unique.is_subset(&master_ids), "seed {seed} invented an id");
    }
}

#[test]
fn building_a_pool_leaves_the_master_set_unchanged() {
    let master = statements(6);
    let before = master.clone();
    let _ = PoolBuilder::new(&master)
        .with_round_count(3)
        .with_seed(5)
        .build()
        .unwrap();
    assert_eq!(master, before);
}

#[test]
fn empty_master_set_refuses_to_start() {
    assert!(matches!(
        PoolBuilder::new(&[]).build().unwrap_err(),
        SessionError::Empty
    ));
}

#[test]
fn json_content_drives_a_full_session() {
    let doc = r#"{
        "challenges": [
            {"kind": "true_false", "id": 1, "statement": "Bees make honey", "answer": true, "explanation": "They do."},
            {"kind": "true_false", "id": 2, "statement": "The moon is made of cheese", "answer": false, "explanation": null},
            {"kind": "true_false", "id": 3, "statement": "Spiders have six legs", "answer": false, "explanation": null}
        ]
    }"#;
    let content = JsonContent::parse(doc).unwrap();
    let svc = GameLoopService::new(Clock::fixed(fixed_now()), Arc::new(content))
        .with_round_count(3)
        .with_seed(1);

    let mut session = svc.start_quiz(GameKind::TrueFalse).unwrap();
    loop {
        let truth = match session.current_challenge().unwrap() {
            Challenge::TrueFalse(c) => c.answer,
            other => panic!("unexpected challenge kind {:?}", other.kind()),
        };
        let result = svc
            .answer_current(&mut session, &Answer::Truth(truth))
            .unwrap();
        match result.result.advance {
            Some(token) => session.advance(token).unwrap(),
            None => break,
        }
    }

    let summary = session.summary().unwrap();
    assert_eq!(summary.rounds(), 3);
    assert_eq!(summary.correct(), 3);
    assert_eq!(summary.score(), 3);
    assert_eq!(summary.attempts(), 3);
}
