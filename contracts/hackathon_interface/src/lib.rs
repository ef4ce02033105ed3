//! # Hackathon Interface
//!
//! Types and cross-contract clients shared by the hackathon instance contract
//! and the hackathon registry contract.
//!
//! The two contracts call each other, so neither crate can depend on the
//! other. Both depend on this crate instead:
//!
//! | Direction            | Client              | Calls                                   |
//! |----------------------|---------------------|-----------------------------------------|
//! | Registry → Instance  | [`HackathonClient`] | `initialize`                            |
//! | Instance → Registry  | [`RegistryClient`]  | membership notifications, conclusion    |
//!
//! Notification methods are declared without a `Result` so a failure on the
//! registry side traps the whole transaction. Callers that need to inspect a
//! failure use the generated `try_*` variants.

#![no_std]

use soroban_sdk::{contractclient, contracttype, Address, Env, String, Vec};

/// Immutable parameters of a single hackathon, fixed at initialisation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HackathonConfig {
    /// Display name.
    pub name: String,
    /// First ledger timestamp at which projects may be submitted.
    pub submission_start: u64,
    /// Last ledger timestamp at which projects may be submitted. Voting opens
    /// strictly after it.
    pub submission_end: u64,
    /// Token contract holding the prize pool. For a native-currency pool this
    /// is the native asset's Stellar Asset Contract.
    pub prize_token: Address,
}

/// Voting budget granted to a judge at creation time.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct JudgeAllocation {
    pub judge: Address,
    pub tokens: u64,
}

/// Calls a hackathon instance makes into the registry.
///
/// Every method authenticates `hackathon`; the registry rejects instances it
/// does not track as ongoing.
#[contractclient(name = "RegistryClient")]
pub trait RegistryInterface {
    /// Record `participant` as taking part in `hackathon`.
    fn register_participant(env: Env, hackathon: Address, participant: Address);

    /// Record `judge` as judging `hackathon`.
    fn register_judge(env: Env, hackathon: Address, judge: Address);

    /// Drop `judge` from `hackathon`.
    fn remove_judge(env: Env, hackathon: Address, judge: Address);

    /// Move `hackathon` and all of its members from ongoing to past.
    fn hackathon_concluded(env: Env, hackathon: Address);
}

/// Calls the registry makes into a hackathon instance.
#[contractclient(name = "HackathonClient")]
pub trait HackathonInterface {
    /// One-time setup, authenticated by `registry`.
    fn initialize(
        env: Env,
        registry: Address,
        admin: Address,
        config: HackathonConfig,
        judges: Vec<JudgeAllocation>,
        prize_pool: i128,
    );
}
