extern crate std;

use soroban_sdk::testutils::Address as _;
use soroban_sdk::Address;

use crate::invariants;
use crate::test::{setup, start_evaluation, submit, text};
use crate::Error;

#[test]
fn test_proportional_payout_leaves_unallocated_dust() {
    let s = setup(&[100, 50], 1_500);
    let (alice, first) = submit(&s, "alpha");
    let (bob, second) = submit(&s, "beta");
    start_evaluation(&s);

    s.client.vote(&s.judges[0], &first, &60);
    s.client.vote(&s.judges[1], &second, &50);
    s.client.conclude_hackathon(&s.admin);

    assert_eq!(s.client.claim_prize(&alice, &first), 600);
    assert_eq!(s.client.claim_prize(&bob, &second), 500);

    assert_eq!(s.token.balance(&alice), 600);
    assert_eq!(s.token.balance(&bob), 500);
    assert_eq!(s.token.balance(&s.client.address), 400);
    invariants::assert_payout_within_pool(&[600, 500], 1_500);
}

#[test]
fn test_floor_division_never_overpays() {
    let s = setup(&[3], 100);
    let mut claims = std::vec::Vec::new();
    for name in ["a", "b", "c"] {
        claims.push(submit(&s, name));
    }
    start_evaluation(&s);
    for (_, id) in &claims {
        s.client.vote(&s.judges[0], id, &1);
    }
    s.client.conclude_hackathon(&s.admin);

    let paid: std::vec::Vec<i128> = claims
        .iter()
        .map(|(submitter, id)| s.client.claim_prize(submitter, id))
        .collect();

    assert_eq!(paid, [33, 33, 33]);
    invariants::assert_payout_within_pool(&paid, 100);
    assert_eq!(s.token.balance(&s.client.address), 1);
}

#[test]
fn test_second_claim_fails() {
    let s = setup(&[10], 1_000);
    let (alice, id) = submit(&s, "alpha");
    start_evaluation(&s);
    s.client.vote(&s.judges[0], &id, &10);
    s.client.conclude_hackathon(&s.admin);

    assert_eq!(s.client.claim_prize(&alice, &id), 1_000);
    assert!(s.client.is_claimed(&id));

    let result = s.client.try_claim_prize(&alice, &id);
    assert_eq!(result, Err(Ok(Error::AlreadyClaimed)));
    assert_eq!(s.token.balance(&alice), 1_000);
}

#[test]
fn test_claim_before_conclusion_fails() {
    let s = setup(&[10], 1_000);
    let (alice, id) = submit(&s, "alpha");
    start_evaluation(&s);
    s.client.vote(&s.judges[0], &id, &10);

    let result = s.client.try_claim_prize(&alice, &id);
    assert_eq!(result, Err(Ok(Error::NotConcluded)));
    assert!(!s.client.is_claimed(&id));
}

#[test]
fn test_claim_rejects_stranger_and_unknown_project() {
    let s = setup(&[10], 1_000);
    let (_, id) = submit(&s, "alpha");
    start_evaluation(&s);
    s.client.vote(&s.judges[0], &id, &10);
    s.client.conclude_hackathon(&s.admin);
    let mallory = Address::generate(&s.env);

    let result = s.client.try_claim_prize(&mallory, &id);
    assert_eq!(result, Err(Ok(Error::InvalidParams)));

    let result = s.client.try_claim_prize(&mallory, &(id + 1));
    assert_eq!(result, Err(Ok(Error::InvalidParams)));
    assert_eq!(s.token.balance(&mallory), 0);
}

#[test]
fn test_claim_pays_recipient() {
    let s = setup(&[10], 900);
    let submitter = Address::generate(&s.env);
    let treasury = Address::generate(&s.env);
    let id = s.client.submit_project(
        &submitter,
        &text(&s.env, "alpha"),
        &text(&s.env, "src"),
        &text(&s.env, "docs"),
        &Some(treasury.clone()),
    );
    start_evaluation(&s);
    s.client.vote(&s.judges[0], &id, &10);
    s.client.conclude_hackathon(&s.admin);

    s.client.claim_prize(&submitter, &id);

    assert_eq!(s.token.balance(&treasury), 900);
    assert_eq!(s.token.balance(&submitter), 0);
}

#[test]
fn test_claim_without_voting_weight_fails() {
    let s = setup(&[], 500);
    let (alice, id) = submit(&s, "alpha");
    start_evaluation(&s);
    s.client.conclude_hackathon(&s.admin);

    let result = s.client.try_claim_prize(&alice, &id);
    assert_eq!(result, Err(Ok(Error::NoVotesCast)));
    assert!(!s.client.is_claimed(&id));
    assert_eq!(s.client.try_prize_share(&id), Err(Ok(Error::NoVotesCast)));
}

#[test]
fn test_project_without_votes_claims_nothing() {
    let s = setup(&[10], 500);
    let (alice, first) = submit(&s, "alpha");
    let (bob, second) = submit(&s, "beta");
    start_evaluation(&s);
    s.client.vote(&s.judges[0], &first, &10);
    s.client.conclude_hackathon(&s.admin);

    assert_eq!(s.client.claim_prize(&bob, &second), 0);
    assert!(s.client.is_claimed(&second));
    assert_eq!(s.client.claim_prize(&alice, &first), 500);
}

#[test]
fn test_share_grows_with_project_votes() {
    let s = setup(&[100, 100], 1_000);
    let (_, id) = submit(&s, "alpha");
    start_evaluation(&s);

    let mut previous = s.client.prize_share(&id);
    for (judge, amount) in [(0usize, 10u64), (0, 40), (1, 25), (1, 90), (0, 100)] {
        s.client.vote(&s.judges[judge], &id, &amount);
        let share = s.client.prize_share(&id);
        assert!(share >= previous, "share fell from {previous} to {share}");
        previous = share;
    }
    assert_eq!(previous, 950);
}

// ─────────────────────────────────────────────────────────
// Prize pool funding
// ─────────────────────────────────────────────────────────

#[test]
fn test_increase_prize_pool_pulls_from_admin() {
    let s = setup(&[10], 1_000);
    s.token_sac.mint(&s.admin, &700);

    assert_eq!(s.client.increase_prize_pool(&s.admin, &300), 1_300);

    assert_eq!(s.client.prize_pool(), 1_300);
    assert_eq!(s.token.balance(&s.admin), 400);
    assert_eq!(s.token.balance(&s.client.address), 1_300);
}

#[test]
fn test_increase_prize_pool_failed_transfer_changes_nothing() {
    let s = setup(&[10], 1_000);

    let result = s.client.try_increase_prize_pool(&s.admin, &300);
    assert_eq!(result, Err(Ok(Error::TokenTransferFailed)));
    assert_eq!(s.client.prize_pool(), 1_000);
    assert_eq!(s.token.balance(&s.client.address), 1_000);
}

#[test]
fn test_increase_prize_pool_rejections() {
    let s = setup(&[10], 0);
    let stranger = Address::generate(&s.env);
    s.token_sac.mint(&stranger, &100);

    let result = s.client.try_increase_prize_pool(&stranger, &100);
    assert_eq!(result, Err(Ok(Error::NotAuthorized)));

    let result = s.client.try_increase_prize_pool(&s.admin, &0);
    assert_eq!(result, Err(Ok(Error::InvalidParams)));
}

#[test]
fn test_adjust_prize_pool_up_and_down() {
    let s = setup(&[10], 1_000);
    s.token_sac.mint(&s.admin, &500);

    s.client.adjust_prize_pool(&s.admin, &1_500);
    assert_eq!(s.client.prize_pool(), 1_500);
    assert_eq!(s.token.balance(&s.admin), 0);

    s.client.adjust_prize_pool(&s.admin, &200);
    assert_eq!(s.client.prize_pool(), 200);
    assert_eq!(s.token.balance(&s.admin), 1_300);
    assert_eq!(s.token.balance(&s.client.address), 200);

    s.client.adjust_prize_pool(&s.admin, &200);
    assert_eq!(s.client.prize_pool(), 200);

    let result = s.client.try_adjust_prize_pool(&s.admin, &-1);
    assert_eq!(result, Err(Ok(Error::InvalidParams)));
}

#[test]
fn test_pool_funded_during_evaluation_is_paid_out() {
    let s = setup(&[4], 0);
    s.token_sac.mint(&s.admin, &2_000);
    let (alice, first) = submit(&s, "alpha");
    let (bob, second) = submit(&s, "beta");
    start_evaluation(&s);
    s.client.vote(&s.judges[0], &first, &3);
    s.client.vote(&s.judges[0], &second, &1);
    s.client.increase_prize_pool(&s.admin, &2_000);
    s.client.conclude_hackathon(&s.admin);

    assert_eq!(s.client.claim_prize(&alice, &first), 1_500);
    assert_eq!(s.client.claim_prize(&bob, &second), 500);
    assert_eq!(s.token.balance(&s.client.address), 0);
}
