//! # Storage
//!
//! Typed helpers over the two Soroban storage tiers used by a hackathon
//! instance.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key            | Type              | Description                          |
//! |----------------|-------------------|--------------------------------------|
//! | `Admin`        | `Address`         | Organizer, fixed at initialisation   |
//! | `Registry`     | `Address`         | Registry to notify                   |
//! | `Config`       | `HackathonConfig` | Phase window and prize token         |
//! | `Concluded`    | `bool`            | Monotonic conclusion flag            |
//! | `TotalTokens`  | `u64`             | Sum of every judge's budget          |
//! | `PrizePool`    | `i128`            | Recorded prize pool                  |
//! | `ProjectCount` | `u32`             | Auto-increment project ID counter    |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                  | Type           | Description                         |
//! |----------------------|----------------|-------------------------------------|
//! | `Judges`             | `Vec<Address>` | Judge list, swap-remove on removal  |
//! | `Participants`       | `Vec<Address>` | Submitters in submission order      |
//! | `Judge(addr)`        | `JudgeBudget`  | Budget and unspent budget           |
//! | `Project(id)`        | `Project`      | Submission data                     |
//! | `ProjectOf(addr)`    | `u32`          | Submitter → project id              |
//! | `ProjectVotes(id)`   | `u64`          | Sum of current votes on the project |
//! | `Vote(judge, id)`    | `u64`          | A judge's current vote              |
//! | `Claimed(id)`        | `bool`         | One-shot claim flag                 |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.

use hackathon_interface::HackathonConfig;
use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::types::{JudgeBudget, Project};

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Admin,
    Registry,
    Config,
    Concluded,
    TotalTokens,
    PrizePool,
    ProjectCount,
    Judges,
    Participants,
    Judge(Address),
    Project(u32),
    ProjectOf(Address),
    ProjectVotes(u32),
    Vote(Address, u32),
    Claimed(u32),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

/// Write the immutable setup entries. Called once from `initialize`.
pub fn init_instance(env: &Env, registry: &Address, admin: &Address, config: &HackathonConfig) {
    env.storage().instance().set(&DataKey::Registry, registry);
    env.storage().instance().set(&DataKey::Admin, admin);
    env.storage().instance().set(&DataKey::Config, config);
    env.storage().instance().set(&DataKey::Concluded, &false);
    env.storage().instance().set(&DataKey::ProjectCount, &0u32);
    bump_instance(env);
}

pub fn get_admin(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::Admin)
}

pub fn get_registry(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::Registry)
}

pub fn get_config(env: &Env) -> Option<HackathonConfig> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::Config)
}

pub fn is_concluded(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Concluded)
        .unwrap_or(false)
}

pub fn set_concluded(env: &Env) {
    env.storage().instance().set(&DataKey::Concluded, &true);
    bump_instance(env);
}

pub fn get_total_tokens(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::TotalTokens)
        .unwrap_or(0)
}

pub fn set_total_tokens(env: &Env, total: u64) {
    env.storage().instance().set(&DataKey::TotalTokens, &total);
    bump_instance(env);
}

pub fn get_prize_pool(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::PrizePool)
        .unwrap_or(0)
}

pub fn set_prize_pool(env: &Env, amount: i128) {
    env.storage().instance().set(&DataKey::PrizePool, &amount);
    bump_instance(env);
}

pub fn get_project_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::ProjectCount)
        .unwrap_or(0)
}

/// Reads, increments, and stores the project counter.
/// Returns the ID to use for the *current* project (pre-increment value).
pub fn get_and_increment_project_id(env: &Env) -> u32 {
    bump_instance(env);
    let current = get_project_count(env);
    env.storage()
        .instance()
        .set(&DataKey::ProjectCount, &(current + 1));
    current
}

// ── Persistent Storage Helpers ───────────────────────────────────────

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

fn load_list(env: &Env, key: &DataKey) -> Vec<Address> {
    match env.storage().persistent().get(key) {
        Some(list) => {
            bump_persistent(env, key);
            list
        }
        None => Vec::new(env),
    }
}

fn save_list(env: &Env, key: &DataKey, list: &Vec<Address>) {
    env.storage().persistent().set(key, list);
    bump_persistent(env, key);
}

pub fn load_judges(env: &Env) -> Vec<Address> {
    load_list(env, &DataKey::Judges)
}

pub fn save_judges(env: &Env, judges: &Vec<Address>) {
    save_list(env, &DataKey::Judges, judges);
}

pub fn load_participants(env: &Env) -> Vec<Address> {
    load_list(env, &DataKey::Participants)
}

pub fn save_participants(env: &Env, participants: &Vec<Address>) {
    save_list(env, &DataKey::Participants, participants);
}

pub fn load_judge(env: &Env, judge: &Address) -> Option<JudgeBudget> {
    let key = DataKey::Judge(judge.clone());
    let budget = env.storage().persistent().get(&key);
    if budget.is_some() {
        bump_persistent(env, &key);
    }
    budget
}

pub fn save_judge(env: &Env, judge: &Address, budget: &JudgeBudget) {
    let key = DataKey::Judge(judge.clone());
    env.storage().persistent().set(&key, budget);
    bump_persistent(env, &key);
}

pub fn remove_judge(env: &Env, judge: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Judge(judge.clone()));
}

pub fn load_project(env: &Env, id: u32) -> Option<Project> {
    let key = DataKey::Project(id);
    let project = env.storage().persistent().get(&key);
    if project.is_some() {
        bump_persistent(env, &key);
    }
    project
}

pub fn save_project(env: &Env, project: &Project) {
    let key = DataKey::Project(project.id);
    env.storage().persistent().set(&key, project);
    bump_persistent(env, &key);
}

pub fn get_project_of(env: &Env, submitter: &Address) -> Option<u32> {
    env.storage()
        .persistent()
        .get(&DataKey::ProjectOf(submitter.clone()))
}

pub fn set_project_of(env: &Env, submitter: &Address, id: u32) {
    let key = DataKey::ProjectOf(submitter.clone());
    env.storage().persistent().set(&key, &id);
    bump_persistent(env, &key);
}

pub fn get_project_votes(env: &Env, id: u32) -> u64 {
    env.storage()
        .persistent()
        .get(&DataKey::ProjectVotes(id))
        .unwrap_or(0)
}

pub fn set_project_votes(env: &Env, id: u32, votes: u64) {
    let key = DataKey::ProjectVotes(id);
    env.storage().persistent().set(&key, &votes);
    bump_persistent(env, &key);
}

pub fn get_vote(env: &Env, judge: &Address, id: u32) -> u64 {
    env.storage()
        .persistent()
        .get(&DataKey::Vote(judge.clone(), id))
        .unwrap_or(0)
}

pub fn set_vote(env: &Env, judge: &Address, id: u32, amount: u64) {
    let key = DataKey::Vote(judge.clone(), id);
    env.storage().persistent().set(&key, &amount);
    bump_persistent(env, &key);
}

pub fn is_claimed(env: &Env, id: u32) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Claimed(id))
        .unwrap_or(false)
}

pub fn set_claimed(env: &Env, id: u32) {
    let key = DataKey::Claimed(id);
    env.storage().persistent().set(&key, &true);
    bump_persistent(env, &key);
}
