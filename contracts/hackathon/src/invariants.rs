#![allow(dead_code)]

extern crate std;

use soroban_sdk::{Address, Vec};

use crate::HackathonContractClient;

/// INV-1: a judge's unspent budget plus every vote they currently hold equals
/// their budget.
pub fn assert_budget_conserved(client: &HackathonContractClient, judge: &Address) {
    let budget = client
        .get_judge(judge)
        .expect("INV-1 violated: judge has no budget record");
    let mut allocated: u64 = 0;
    for id in 0..client.project_count() {
        allocated += client.judge_vote(judge, &id);
    }
    assert_eq!(
        budget.remaining + allocated,
        budget.token_budget,
        "INV-1 violated: remaining {} + allocated {} != budget {}",
        budget.remaining,
        allocated,
        budget.token_budget
    );
}

/// INV-2: total tokens equal the sum of every judge's budget.
pub fn assert_total_conserved(client: &HackathonContractClient) {
    let judges: Vec<Address> = client.get_judges(&0, &client.judge_count());
    let mut sum: u64 = 0;
    for judge in judges.iter() {
        sum += client
            .get_judge(&judge)
            .expect("INV-2 violated: listed judge has no budget")
            .token_budget;
    }
    assert_eq!(
        sum,
        client.total_tokens(),
        "INV-2 violated: sum of budgets {} != total tokens {}",
        sum,
        client.total_tokens()
    );
}

/// INV-3: a project's total equals the sum of the listed judges' votes on it.
pub fn assert_project_votes_consistent(client: &HackathonContractClient, project_id: u32) {
    let judges: Vec<Address> = client.get_judges(&0, &client.judge_count());
    let mut sum: u64 = 0;
    for judge in judges.iter() {
        sum += client.judge_vote(&judge, &project_id);
    }
    assert_eq!(
        sum,
        client.project_votes(&project_id),
        "INV-3 violated: project {} votes do not match judge ledger",
        project_id
    );
}

/// INV-4: cast votes never exceed the total budget.
pub fn assert_votes_within_total(client: &HackathonContractClient) {
    let mut cast: u64 = 0;
    for id in 0..client.project_count() {
        cast += client.project_votes(&id);
    }
    assert!(
        cast <= client.total_tokens(),
        "INV-4 violated: {} votes cast against {} total tokens",
        cast,
        client.total_tokens()
    );
}

/// INV-5: prizes paid out never exceed the pool.
pub fn assert_payout_within_pool(paid: &[i128], prize_pool: i128) {
    let total: i128 = paid.iter().sum();
    assert!(
        total <= prize_pool,
        "INV-5 violated: paid {} out of a pool of {}",
        total,
        prize_pool
    );
}

/// Run every ledger-level invariant.
pub fn assert_all_invariants(client: &HackathonContractClient) {
    assert_total_conserved(client);
    assert_votes_within_total(client);
    let judges: Vec<Address> = client.get_judges(&0, &client.judge_count());
    for judge in judges.iter() {
        assert_budget_conserved(client, &judge);
    }
    for id in 0..client.project_count() {
        assert_project_votes_consistent(client, id);
    }
}
