extern crate std;

use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::Address;

use crate::invariants;
use crate::test::{setup, start_evaluation, submit, SUBMISSION_END};
use crate::{Error, JudgeBudget};

#[test]
fn test_vote_during_submission_fails() {
    let s = setup(&[100], 0);
    let (_, id) = submit(&s, "alpha");

    s.env.ledger().set_timestamp(SUBMISSION_END);
    let result = s.client.try_vote(&s.judges[0], &id, &10);
    assert_eq!(result, Err(Ok(Error::EvaluationNotOpen)));
    assert_eq!(s.client.project_votes(&id), 0);
}

#[test]
fn test_vote_after_conclusion_fails() {
    let s = setup(&[100], 0);
    let (_, id) = submit(&s, "alpha");
    start_evaluation(&s);
    s.client.conclude_hackathon(&s.admin);

    let result = s.client.try_vote(&s.judges[0], &id, &10);
    assert_eq!(result, Err(Ok(Error::AlreadyConcluded)));
}

#[test]
fn test_vote_records_weight() {
    let s = setup(&[100, 50], 0);
    let (_, first) = submit(&s, "alpha");
    let (_, second) = submit(&s, "beta");
    start_evaluation(&s);

    s.client.vote(&s.judges[0], &first, &60);
    s.client.vote(&s.judges[1], &first, &20);
    s.client.vote(&s.judges[1], &second, &30);

    assert_eq!(s.client.project_votes(&first), 80);
    assert_eq!(s.client.project_votes(&second), 30);
    assert_eq!(s.client.judge_vote(&s.judges[0], &first), 60);
    assert_eq!(
        s.client.get_judge(&s.judges[1]),
        Some(JudgeBudget {
            token_budget: 50,
            remaining: 0
        })
    );
    invariants::assert_all_invariants(&s.client);
}

#[test]
fn test_vote_overwrites_previous_weight() {
    let s = setup(&[100], 0);
    let (_, id) = submit(&s, "alpha");
    start_evaluation(&s);

    s.client.vote(&s.judges[0], &id, &30);
    assert_eq!(s.client.get_judge(&s.judges[0]).unwrap().remaining, 70);

    s.client.vote(&s.judges[0], &id, &10);

    assert_eq!(s.client.judge_vote(&s.judges[0], &id), 10);
    assert_eq!(s.client.project_votes(&id), 10);
    assert_eq!(s.client.get_judge(&s.judges[0]).unwrap().remaining, 90);
    invariants::assert_all_invariants(&s.client);
}

#[test]
fn test_vote_can_spend_weight_held_on_the_same_project() {
    let s = setup(&[100], 0);
    let (_, first) = submit(&s, "alpha");
    let (_, second) = submit(&s, "beta");
    start_evaluation(&s);

    s.client.vote(&s.judges[0], &first, &60);
    s.client.vote(&s.judges[0], &second, &40);

    // Budget is exhausted; re-casting the first vote only reuses its own 60.
    let result = s.client.try_vote(&s.judges[0], &second, &41);
    assert_eq!(result, Err(Ok(Error::InsufficientTokens)));
    s.client.vote(&s.judges[0], &first, &60);

    // Freeing the first project's weight lets the second take everything.
    s.client.vote(&s.judges[0], &first, &0);
    s.client.vote(&s.judges[0], &second, &100);

    assert_eq!(s.client.project_votes(&first), 0);
    assert_eq!(s.client.project_votes(&second), 100);
    assert_eq!(s.client.get_judge(&s.judges[0]).unwrap().remaining, 0);
    invariants::assert_all_invariants(&s.client);
}

#[test]
fn test_vote_exceeding_budget_leaves_state_untouched() {
    let s = setup(&[50], 0);
    let (_, id) = submit(&s, "alpha");
    start_evaluation(&s);
    s.client.vote(&s.judges[0], &id, &20);

    let result = s.client.try_vote(&s.judges[0], &id, &51);
    assert_eq!(result, Err(Ok(Error::InsufficientTokens)));

    assert_eq!(s.client.judge_vote(&s.judges[0], &id), 20);
    assert_eq!(s.client.project_votes(&id), 20);
    assert_eq!(s.client.get_judge(&s.judges[0]).unwrap().remaining, 30);
}

#[test]
fn test_vote_rejects_non_judge_and_unknown_project() {
    let s = setup(&[100], 0);
    let (_, id) = submit(&s, "alpha");
    start_evaluation(&s);
    let outsider = Address::generate(&s.env);

    let result = s.client.try_vote(&outsider, &id, &1);
    assert_eq!(result, Err(Ok(Error::InvalidParams)));

    let result = s.client.try_vote(&s.judges[0], &(id + 1), &1);
    assert_eq!(result, Err(Ok(Error::InvalidParams)));
}

#[test]
fn test_removed_judge_cannot_vote() {
    let s = setup(&[100, 50], 0);
    let (_, id) = submit(&s, "alpha");
    s.client.adjust_judge_tokens(&s.admin, &s.judges[1], &0);
    start_evaluation(&s);

    let result = s.client.try_vote(&s.judges[1], &id, &1);
    assert_eq!(result, Err(Ok(Error::InvalidParams)));
}

#[test]
fn test_budget_conserved_across_vote_sequence() {
    let s = setup(&[100, 70, 30], 0);
    let mut ids = std::vec::Vec::new();
    for name in ["a", "b", "c", "d"] {
        ids.push(submit(&s, name).1);
    }
    start_evaluation(&s);

    let plan: [(usize, usize, u64); 10] = [
        (0, 0, 40),
        (0, 1, 60),
        (1, 2, 70),
        (0, 0, 10),
        (2, 3, 30),
        (1, 2, 5),
        (1, 0, 65),
        (0, 1, 90),
        (2, 3, 0),
        (2, 1, 30),
    ];
    for (judge, project, amount) in plan {
        s.client.vote(&s.judges[judge], &ids[project], &amount);
        invariants::assert_all_invariants(&s.client);
    }

    assert_eq!(s.client.project_votes(&ids[0]), 75);
    assert_eq!(s.client.project_votes(&ids[1]), 120);
    assert_eq!(s.client.project_votes(&ids[2]), 5);
    assert_eq!(s.client.project_votes(&ids[3]), 0);
}
