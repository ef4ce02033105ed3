extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    vec, Address, Env, IntoVal, TryIntoVal, Val, Vec,
};

use crate::events::{HackathonConcluded, PrizeClaimed, ProjectSubmitted, VoteCast};
use crate::test::{setup, start_evaluation, submit};
use crate::JudgeAdjusted;

/// Last event published by `contract`, skipping events from the token.
fn last_event_of(env: &Env, contract: &Address) -> (Vec<Val>, Val) {
    let mut found = None;
    for (source, topics, data) in env.events().all().iter() {
        if source == *contract {
            found = Some((topics, data));
        }
    }
    found.expect("No events found for contract")
}

#[test]
fn test_project_submitted_event() {
    let s = setup(&[100], 0);
    let (alice, id) = submit(&s, "alpha");

    let (topics, data) = last_event_of(&s.env, &s.client.address);
    let expected_topics = vec![
        &s.env,
        symbol_short!("submitted").into_val(&s.env),
        id.into_val(&s.env),
    ];
    assert_eq!(topics, expected_topics);

    let event_data: ProjectSubmitted = data.try_into_val(&s.env).unwrap();
    assert_eq!(
        event_data,
        ProjectSubmitted {
            project_id: id,
            submitter: alice.clone(),
            recipient: alice,
        }
    );
}

#[test]
fn test_vote_cast_event() {
    let s = setup(&[100], 0);
    let (_, id) = submit(&s, "alpha");
    start_evaluation(&s);
    s.client.vote(&s.judges[0], &id, &30);
    s.client.vote(&s.judges[0], &id, &12);

    let (topics, data) = last_event_of(&s.env, &s.client.address);
    let expected_topics = vec![
        &s.env,
        symbol_short!("voted").into_val(&s.env),
        id.into_val(&s.env),
    ];
    assert_eq!(topics, expected_topics);

    let event_data: VoteCast = data.try_into_val(&s.env).unwrap();
    assert_eq!(
        event_data,
        VoteCast {
            judge: s.judges[0].clone(),
            project_id: id,
            amount: 12,
            project_votes: 12,
        }
    );
}

#[test]
fn test_judge_adjusted_event() {
    let s = setup(&[100], 0);
    let newcomer = Address::generate(&s.env);
    s.client.adjust_judge_tokens(&s.admin, &newcomer, &25);

    let (topics, data) = last_event_of(&s.env, &s.client.address);
    let expected_topics = vec![
        &s.env,
        symbol_short!("judge_adj").into_val(&s.env),
        newcomer.into_val(&s.env),
    ];
    assert_eq!(topics, expected_topics);

    let event_data: JudgeAdjusted = data.try_into_val(&s.env).unwrap();
    assert_eq!(event_data.old_budget, 0);
    assert_eq!(event_data.new_budget, 25);
    assert_eq!(event_data.total_tokens, 125);
}

#[test]
fn test_concluded_and_claimed_events() {
    let s = setup(&[100, 50], 1_500);
    let (alice, id) = submit(&s, "alpha");
    start_evaluation(&s);
    s.client.vote(&s.judges[0], &id, &60);
    s.client.conclude_hackathon(&s.admin);

    let (topics, data) = last_event_of(&s.env, &s.client.address);
    assert_eq!(
        topics,
        vec![&s.env, symbol_short!("concluded").into_val(&s.env)]
    );
    let event_data: HackathonConcluded = data.try_into_val(&s.env).unwrap();
    assert_eq!(
        event_data,
        HackathonConcluded {
            admin: s.admin.clone(),
            total_tokens: 150,
            prize_pool: 1_500,
            project_count: 1,
        }
    );

    s.client.claim_prize(&alice, &id);

    let (topics, data) = last_event_of(&s.env, &s.client.address);
    let expected_topics = vec![
        &s.env,
        symbol_short!("claimed").into_val(&s.env),
        id.into_val(&s.env),
    ];
    assert_eq!(topics, expected_topics);
    let event_data: PrizeClaimed = data.try_into_val(&s.env).unwrap();
    assert_eq!(
        event_data,
        PrizeClaimed {
            project_id: id,
            recipient: alice,
            amount: 600,
        }
    );
}
