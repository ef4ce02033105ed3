//! # Hackathon Instance Contract
//!
//! One deployed instance owns a single hackathon's lifecycle: phase timing,
//! judge voting budgets, project submissions, vote accounting, prize-pool
//! funding, and proportional payout once the hackathon is concluded.
//!
//! | Phase      | Entry Point(s)                                                   |
//! |------------|------------------------------------------------------------------|
//! | Bootstrap  | [`HackathonContract::initialize`] (called by the registry)       |
//! | Setup      | `adjust_judge_tokens`, `increase_prize_pool`, `adjust_prize_pool` |
//! | Submission | `submit_project`, `edit_project`                                 |
//! | Evaluation | `vote`, `conclude_hackathon`                                     |
//! | Concluded  | `claim_prize`                                                    |
//! | Queries    | `phase`, `get_project`, `get_judge`, `prize_share`, ...          |
//!
//! ## Settlement
//!
//! A project's share of the prize pool is
//! `floor(prize_pool * project_votes / total_tokens)`. Neither operand changes
//! after conclusion, so every share is stable; a per-project claim flag blocks
//! repeat payouts. Budget a judge never allocated is still counted in
//! `total_tokens`, and the matching part of the pool stays unclaimed.
//!
//! Storage access is delegated to [`storage`]. Accounting is always written
//! before any outbound token transfer or registry notification.

#![no_std]

use hackathon_interface::{HackathonConfig, JudgeAllocation, RegistryClient};
use soroban_sdk::{contract, contracterror, contractimpl, token, Address, Env, String, Vec};

mod events;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_events;
#[cfg(test)]
mod test_prize;
#[cfg(test)]
mod test_voting;

pub use events::{
    HackathonConcluded, HackathonInitialized, JudgeAdjusted, PrizeClaimed, PrizePoolChanged,
    ProjectEdited, ProjectSubmitted, VoteCast,
};
pub use types::{JudgeBudget, Phase, Project};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized  = 1,
    NotInitialized      = 2,
    InvalidParams       = 3,
    NotAuthorized       = 4,
    SubmissionClosed    = 5,
    EvaluationNotOpen   = 6,
    AlreadyConcluded    = 7,
    NotConcluded        = 8,
    AlreadySubmitted    = 9,
    InsufficientTokens  = 10,
    AlreadyClaimed      = 11,
    NoVotesCast         = 12,
    TokenTransferFailed = 13,
    ArithmeticOverflow  = 14,
}

#[contract]
pub struct HackathonContract;

#[contractimpl]
impl HackathonContract {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Set up the hackathon. Callable once, authenticated by `registry`.
    ///
    /// The registry transfers `prize_pool` units of `config.prize_token` to
    /// this contract in the same transaction.
    pub fn initialize(
        env: Env,
        registry: Address,
        admin: Address,
        config: HackathonConfig,
        judges: Vec<JudgeAllocation>,
        prize_pool: i128,
    ) -> Result<(), Error> {
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }
        registry.require_auth();

        if config.submission_start >= config.submission_end || prize_pool < 0 {
            return Err(Error::InvalidParams);
        }

        let mut roster: Vec<Address> = Vec::new(&env);
        let mut total_tokens: u64 = 0;
        for allocation in judges.iter() {
            if allocation.tokens == 0 || roster.contains(&allocation.judge) {
                return Err(Error::InvalidParams);
            }
            total_tokens = total_tokens
                .checked_add(allocation.tokens)
                .ok_or(Error::ArithmeticOverflow)?;
            storage::save_judge(
                &env,
                &allocation.judge,
                &JudgeBudget {
                    token_budget: allocation.tokens,
                    remaining: allocation.tokens,
                },
            );
            roster.push_back(allocation.judge);
        }

        storage::init_instance(&env, &registry, &admin, &config);
        storage::save_judges(&env, &roster);
        storage::set_total_tokens(&env, total_tokens);
        storage::set_prize_pool(&env, prize_pool);

        events::emit_initialized(&env, registry, admin, total_tokens, prize_pool);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Submission phase
    // ─────────────────────────────────────────────────────────

    /// Submit the caller's project and return its id.
    ///
    /// One project per submitter; later changes go through `edit_project`.
    /// `recipient` defaults to the submitter. The first submission registers
    /// the submitter as a participant with the registry.
    pub fn submit_project(
        env: Env,
        submitter: Address,
        name: String,
        source_code: String,
        docs: String,
        recipient: Option<Address>,
    ) -> Result<u32, Error> {
        submitter.require_auth();
        let config = load_config(&env)?;
        if current_phase(&env, &config) != Phase::Submission {
            return Err(Error::SubmissionClosed);
        }
        if name.is_empty() {
            return Err(Error::InvalidParams);
        }
        if storage::get_project_of(&env, &submitter).is_some() {
            return Err(Error::AlreadySubmitted);
        }
        let registry = storage::get_registry(&env).ok_or(Error::NotInitialized)?;

        let id = storage::get_and_increment_project_id(&env);
        let project = Project {
            id,
            submitter: submitter.clone(),
            recipient: recipient.unwrap_or_else(|| submitter.clone()),
            name,
            source_code,
            docs,
        };
        storage::save_project(&env, &project);
        storage::set_project_of(&env, &submitter, id);

        let mut participants = storage::load_participants(&env);
        participants.push_back(submitter.clone());
        storage::save_participants(&env, &participants);

        events::emit_project_submitted(&env, &project);

        RegistryClient::new(&env, &registry)
            .register_participant(&env.current_contract_address(), &submitter);
        Ok(id)
    }

    /// Update an existing project in place. Only its submitter may edit it,
    /// and only during the submission phase.
    pub fn edit_project(
        env: Env,
        submitter: Address,
        project_id: u32,
        name: String,
        source_code: String,
        docs: String,
        recipient: Option<Address>,
    ) -> Result<(), Error> {
        submitter.require_auth();
        let config = load_config(&env)?;
        if current_phase(&env, &config) != Phase::Submission {
            return Err(Error::SubmissionClosed);
        }
        let mut project = storage::load_project(&env, project_id).ok_or(Error::InvalidParams)?;
        if project.submitter != submitter || name.is_empty() {
            return Err(Error::InvalidParams);
        }

        project.recipient = recipient.unwrap_or_else(|| submitter.clone());
        project.name = name;
        project.source_code = source_code;
        project.docs = docs;
        storage::save_project(&env, &project);

        events::emit_project_edited(&env, &project);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Evaluation phase
    // ─────────────────────────────────────────────────────────

    /// Set the judge's weight on `project_id` to `amount`.
    ///
    /// Votes overwrite: the judge's previous weight on the project is returned
    /// to their budget before `amount` is taken from it.
    pub fn vote(env: Env, judge: Address, project_id: u32, amount: u64) -> Result<(), Error> {
        judge.require_auth();
        let config = load_config(&env)?;
        match current_phase(&env, &config) {
            Phase::Evaluation => {}
            Phase::Concluded => return Err(Error::AlreadyConcluded),
            Phase::Upcoming | Phase::Submission => return Err(Error::EvaluationNotOpen),
        }
        if storage::load_project(&env, project_id).is_none() {
            return Err(Error::InvalidParams);
        }
        let mut budget = storage::load_judge(&env, &judge).ok_or(Error::InvalidParams)?;

        let current = storage::get_vote(&env, &judge, project_id);
        let available = budget
            .remaining
            .checked_add(current)
            .ok_or(Error::ArithmeticOverflow)?;
        if amount > available {
            return Err(Error::InsufficientTokens);
        }
        budget.remaining = available - amount;

        let project_votes = storage::get_project_votes(&env, project_id)
            .checked_sub(current)
            .and_then(|rest| rest.checked_add(amount))
            .ok_or(Error::ArithmeticOverflow)?;

        storage::save_judge(&env, &judge, &budget);
        storage::set_vote(&env, &judge, project_id, amount);
        storage::set_project_votes(&env, project_id, project_votes);

        events::emit_vote_cast(&env, judge, project_id, amount, project_votes);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Administration
    // ─────────────────────────────────────────────────────────

    /// Set `judge`'s budget to `new_amount`, adding or removing the judge.
    ///
    /// Allowed before submissions open and until the submission window
    /// closes, so no votes exist yet and the budget is reset outright. An unknown address with a positive
    /// amount becomes a judge; an existing judge set to zero is removed. Both
    /// changes are reported to the registry.
    pub fn adjust_judge_tokens(
        env: Env,
        admin: Address,
        judge: Address,
        new_amount: u64,
    ) -> Result<(), Error> {
        let config = load_config(&env)?;
        require_admin(&env, &admin)?;
        match current_phase(&env, &config) {
            Phase::Upcoming | Phase::Submission => {}
            Phase::Evaluation => return Err(Error::SubmissionClosed),
            Phase::Concluded => return Err(Error::AlreadyConcluded),
        }

        let existing = storage::load_judge(&env, &judge);
        if existing.is_none() && new_amount == 0 {
            return Err(Error::InvalidParams);
        }
        let old_budget = existing.as_ref().map(|b| b.token_budget).unwrap_or(0);
        let total_tokens = storage::get_total_tokens(&env)
            .checked_sub(old_budget)
            .and_then(|rest| rest.checked_add(new_amount))
            .ok_or(Error::ArithmeticOverflow)?;
        storage::set_total_tokens(&env, total_tokens);

        let registry = storage::get_registry(&env).ok_or(Error::NotInitialized)?;
        let registry = RegistryClient::new(&env, &registry);
        let this = env.current_contract_address();

        if new_amount == 0 {
            storage::remove_judge(&env, &judge);
            let mut judges = storage::load_judges(&env);
            if let Some(index) = judges.first_index_of(&judge) {
                swap_remove(&mut judges, index);
            }
            storage::save_judges(&env, &judges);
            events::emit_judge_adjusted(&env, judge.clone(), old_budget, 0, total_tokens);
            registry.remove_judge(&this, &judge);
            return Ok(());
        }

        storage::save_judge(
            &env,
            &judge,
            &JudgeBudget {
                token_budget: new_amount,
                remaining: new_amount,
            },
        );
        events::emit_judge_adjusted(&env, judge.clone(), old_budget, new_amount, total_tokens);

        if existing.is_none() {
            let mut judges = storage::load_judges(&env);
            judges.push_back(judge.clone());
            storage::save_judges(&env, &judges);
            registry.register_judge(&this, &judge);
        }
        Ok(())
    }

    /// Pull `amount` prize tokens from the admin into the pool.
    /// Returns the new pool size.
    pub fn increase_prize_pool(env: Env, admin: Address, amount: i128) -> Result<i128, Error> {
        let config = load_config(&env)?;
        require_admin(&env, &admin)?;
        if storage::is_concluded(&env) {
            return Err(Error::AlreadyConcluded);
        }
        if amount <= 0 {
            return Err(Error::InvalidParams);
        }

        let old_pool = storage::get_prize_pool(&env);
        let new_pool = old_pool
            .checked_add(amount)
            .ok_or(Error::ArithmeticOverflow)?;

        transfer(
            &env,
            &config.prize_token,
            &admin,
            &env.current_contract_address(),
            amount,
        )?;
        storage::set_prize_pool(&env, new_pool);

        events::emit_prize_pool_changed(&env, admin, old_pool, new_pool);
        Ok(new_pool)
    }

    /// Set the pool to exactly `new_amount`.
    ///
    /// Growth is pulled from the admin before it is credited; a reduction is
    /// recorded first and then refunded to the admin.
    pub fn adjust_prize_pool(env: Env, admin: Address, new_amount: i128) -> Result<(), Error> {
        let config = load_config(&env)?;
        require_admin(&env, &admin)?;
        if storage::is_concluded(&env) {
            return Err(Error::AlreadyConcluded);
        }
        if new_amount < 0 {
            return Err(Error::InvalidParams);
        }

        let old_pool = storage::get_prize_pool(&env);
        let this = env.current_contract_address();
        if new_amount > old_pool {
            transfer(&env, &config.prize_token, &admin, &this, new_amount - old_pool)?;
            storage::set_prize_pool(&env, new_amount);
        } else if new_amount < old_pool {
            storage::set_prize_pool(&env, new_amount);
            transfer(&env, &config.prize_token, &this, &admin, old_pool - new_amount)?;
        }

        events::emit_prize_pool_changed(&env, admin, old_pool, new_amount);
        Ok(())
    }

    /// End the evaluation phase and notify the registry. One-way.
    pub fn conclude_hackathon(env: Env, admin: Address) -> Result<(), Error> {
        let config = load_config(&env)?;
        require_admin(&env, &admin)?;
        match current_phase(&env, &config) {
            Phase::Evaluation => {}
            Phase::Concluded => return Err(Error::AlreadyConcluded),
            Phase::Upcoming | Phase::Submission => return Err(Error::EvaluationNotOpen),
        }
        let registry = storage::get_registry(&env).ok_or(Error::NotInitialized)?;

        storage::set_concluded(&env);
        events::emit_concluded(
            &env,
            admin,
            storage::get_total_tokens(&env),
            storage::get_prize_pool(&env),
            storage::get_project_count(&env),
        );

        RegistryClient::new(&env, &registry).hackathon_concluded(&env.current_contract_address());
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Settlement
    // ─────────────────────────────────────────────────────────

    /// Pay the project's share of the pool to its recipient. Returns the
    /// amount paid. Each project can be claimed once, by its submitter.
    pub fn claim_prize(env: Env, submitter: Address, project_id: u32) -> Result<i128, Error> {
        submitter.require_auth();
        let config = load_config(&env)?;
        if !storage::is_concluded(&env) {
            return Err(Error::NotConcluded);
        }
        let project = storage::load_project(&env, project_id).ok_or(Error::InvalidParams)?;
        if project.submitter != submitter {
            return Err(Error::InvalidParams);
        }
        if storage::is_claimed(&env, project_id) {
            return Err(Error::AlreadyClaimed);
        }
        let share = compute_share(&env, project_id)?;

        storage::set_claimed(&env, project_id);
        events::emit_prize_claimed(&env, project_id, project.recipient.clone(), share);

        if share > 0 {
            transfer(
                &env,
                &config.prize_token,
                &env.current_contract_address(),
                &project.recipient,
                share,
            )?;
        }
        Ok(share)
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn config(env: Env) -> Result<HackathonConfig, Error> {
        load_config(&env)
    }

    pub fn admin(env: Env) -> Result<Address, Error> {
        storage::get_admin(&env).ok_or(Error::NotInitialized)
    }

    pub fn registry(env: Env) -> Result<Address, Error> {
        storage::get_registry(&env).ok_or(Error::NotInitialized)
    }

    /// Phase at the current ledger timestamp.
    pub fn phase(env: Env) -> Result<Phase, Error> {
        let config = load_config(&env)?;
        Ok(current_phase(&env, &config))
    }

    pub fn is_concluded(env: Env) -> bool {
        storage::is_concluded(&env)
    }

    pub fn total_tokens(env: Env) -> u64 {
        storage::get_total_tokens(&env)
    }

    pub fn prize_pool(env: Env) -> i128 {
        storage::get_prize_pool(&env)
    }

    pub fn judge_count(env: Env) -> u32 {
        storage::load_judges(&env).len()
    }

    /// Judges in `[start, end)`.
    pub fn get_judges(env: Env, start: u32, end: u32) -> Result<Vec<Address>, Error> {
        let judges = storage::load_judges(&env);
        if start > end || end > judges.len() {
            return Err(Error::InvalidParams);
        }
        Ok(judges.slice(start..end))
    }

    pub fn get_judge(env: Env, judge: Address) -> Option<JudgeBudget> {
        storage::load_judge(&env, &judge)
    }

    pub fn participant_count(env: Env) -> u32 {
        storage::load_participants(&env).len()
    }

    pub fn get_participants(env: Env) -> Vec<Address> {
        storage::load_participants(&env)
    }

    pub fn project_count(env: Env) -> u32 {
        storage::get_project_count(&env)
    }

    pub fn get_project(env: Env, project_id: u32) -> Result<Project, Error> {
        storage::load_project(&env, project_id).ok_or(Error::InvalidParams)
    }

    /// Project id submitted by `submitter`, if any.
    pub fn project_of(env: Env, submitter: Address) -> Option<u32> {
        storage::get_project_of(&env, &submitter)
    }

    pub fn project_votes(env: Env, project_id: u32) -> u64 {
        storage::get_project_votes(&env, project_id)
    }

    pub fn judge_vote(env: Env, judge: Address, project_id: u32) -> u64 {
        storage::get_vote(&env, &judge, project_id)
    }

    pub fn is_claimed(env: Env, project_id: u32) -> bool {
        storage::is_claimed(&env, project_id)
    }

    /// Share `project_id` would receive if the hackathon concluded with the
    /// current totals.
    pub fn prize_share(env: Env, project_id: u32) -> Result<i128, Error> {
        if storage::load_project(&env, project_id).is_none() {
            return Err(Error::InvalidParams);
        }
        compute_share(&env, project_id)
    }
}

// ─────────────────────────────────────────────────────────
// Internal helpers
// ─────────────────────────────────────────────────────────

fn load_config(env: &Env) -> Result<HackathonConfig, Error> {
    storage::get_config(env).ok_or(Error::NotInitialized)
}

fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
    let admin = storage::get_admin(env).ok_or(Error::NotInitialized)?;
    if *caller != admin {
        return Err(Error::NotAuthorized);
    }
    caller.require_auth();
    Ok(())
}

fn current_phase(env: &Env, config: &HackathonConfig) -> Phase {
    if storage::is_concluded(env) {
        return Phase::Concluded;
    }
    let now = env.ledger().timestamp();
    if now < config.submission_start {
        Phase::Upcoming
    } else if now <= config.submission_end {
        Phase::Submission
    } else {
        Phase::Evaluation
    }
}

/// `floor(prize_pool * project_votes / total_tokens)`.
fn compute_share(env: &Env, project_id: u32) -> Result<i128, Error> {
    let total_tokens = storage::get_total_tokens(env);
    if total_tokens == 0 {
        return Err(Error::NoVotesCast);
    }
    let project_votes = storage::get_project_votes(env, project_id);
    storage::get_prize_pool(env)
        .checked_mul(project_votes as i128)
        .map(|weighted| weighted / total_tokens as i128)
        .ok_or(Error::ArithmeticOverflow)
}

fn transfer(
    env: &Env,
    token: &Address,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), Error> {
    match token::Client::new(env, token).try_transfer(from, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(Error::TokenTransferFailed),
    }
}

/// Replace `list[index]` with the last element and shrink by one.
fn swap_remove(list: &mut Vec<Address>, index: u32) {
    let last = list.len() - 1;
    if index != last {
        if let Some(tail) = list.get(last) {
            list.set(index, tail);
        }
    }
    list.pop_back();
}
