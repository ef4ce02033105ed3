//! # Events
//!
//! Every state change publishes one event. The first topic is a short symbol
//! naming the change; per-project events carry the project id as the second
//! topic so indexers can group them.
//!
//! | Topic                    | Data                   |
//! |--------------------------|------------------------|
//! | `("init",)`              | [`HackathonInitialized`] |
//! | `("submitted", id)`      | [`ProjectSubmitted`]   |
//! | `("edited", id)`         | [`ProjectEdited`]      |
//! | `("voted", id)`          | [`VoteCast`]           |
//! | `("judge_adj", judge)`   | [`JudgeAdjusted`]      |
//! | `("pool_set",)`          | [`PrizePoolChanged`]   |
//! | `("concluded",)`         | [`HackathonConcluded`] |
//! | `("claimed", id)`        | [`PrizeClaimed`]       |

use soroban_sdk::{contracttype, symbol_short, Address, Env};

use crate::types::Project;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HackathonInitialized {
    pub registry: Address,
    pub admin: Address,
    pub total_tokens: u64,
    pub prize_pool: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectSubmitted {
    pub project_id: u32,
    pub submitter: Address,
    pub recipient: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectEdited {
    pub project_id: u32,
    pub submitter: Address,
    pub recipient: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteCast {
    pub judge: Address,
    pub project_id: u32,
    pub amount: u64,
    /// Project total after the vote.
    pub project_votes: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct JudgeAdjusted {
    pub judge: Address,
    pub old_budget: u64,
    pub new_budget: u64,
    pub total_tokens: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrizePoolChanged {
    pub admin: Address,
    pub old_pool: i128,
    pub new_pool: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HackathonConcluded {
    pub admin: Address,
    pub total_tokens: u64,
    pub prize_pool: i128,
    pub project_count: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrizeClaimed {
    pub project_id: u32,
    pub recipient: Address,
    pub amount: i128,
}

pub fn emit_initialized(
    env: &Env,
    registry: Address,
    admin: Address,
    total_tokens: u64,
    prize_pool: i128,
) {
    env.events().publish(
        (symbol_short!("init"),),
        HackathonInitialized {
            registry,
            admin,
            total_tokens,
            prize_pool,
        },
    );
}

pub fn emit_project_submitted(env: &Env, project: &Project) {
    env.events().publish(
        (symbol_short!("submitted"), project.id),
        ProjectSubmitted {
            project_id: project.id,
            submitter: project.submitter.clone(),
            recipient: project.recipient.clone(),
        },
    );
}

pub fn emit_project_edited(env: &Env, project: &Project) {
    env.events().publish(
        (symbol_short!("edited"), project.id),
        ProjectEdited {
            project_id: project.id,
            submitter: project.submitter.clone(),
            recipient: project.recipient.clone(),
        },
    );
}

pub fn emit_vote_cast(env: &Env, judge: Address, project_id: u32, amount: u64, project_votes: u64) {
    env.events().publish(
        (symbol_short!("voted"), project_id),
        VoteCast {
            judge,
            project_id,
            amount,
            project_votes,
        },
    );
}

pub fn emit_judge_adjusted(
    env: &Env,
    judge: Address,
    old_budget: u64,
    new_budget: u64,
    total_tokens: u64,
) {
    env.events().publish(
        (symbol_short!("judge_adj"), judge.clone()),
        JudgeAdjusted {
            judge,
            old_budget,
            new_budget,
            total_tokens,
        },
    );
}

pub fn emit_prize_pool_changed(env: &Env, admin: Address, old_pool: i128, new_pool: i128) {
    env.events().publish(
        (symbol_short!("pool_set"),),
        PrizePoolChanged {
            admin,
            old_pool,
            new_pool,
        },
    );
}

pub fn emit_concluded(
    env: &Env,
    admin: Address,
    total_tokens: u64,
    prize_pool: i128,
    project_count: u32,
) {
    env.events().publish(
        (symbol_short!("concluded"),),
        HackathonConcluded {
            admin,
            total_tokens,
            prize_pool,
            project_count,
        },
    );
}

pub fn emit_prize_claimed(env: &Env, project_id: u32, recipient: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("claimed"), project_id),
        PrizeClaimed {
            project_id,
            recipient,
            amount,
        },
    );
}
