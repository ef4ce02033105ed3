//! # Types
//!
//! Data structures stored and returned by the hackathon instance.
//!
//! ## Phase as a Finite-State Machine
//!
//! [`Phase`] is derived from the ledger clock and the `concluded` flag on
//! every call; it is never stored.
//!
//! ```text
//! Upcoming ──► Submission ──► Evaluation ──► Concluded
//!   (time)        (time)        (admin)
//! ```
//!
//! Submission cannot re-open once Evaluation begins, and `Concluded` is
//! terminal.

use soroban_sdk::{contracttype, Address, String};

/// Lifecycle phase of a hackathon.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    /// Before `submission_start`.
    Upcoming,
    /// `submission_start <= now <= submission_end`.
    Submission,
    /// After `submission_end`, judges vote until the admin concludes.
    Evaluation,
    /// Prizes are claimable; nothing else changes.
    Concluded,
}

/// Voting budget bookkeeping for one judge.
///
/// `remaining` plus the judge's current votes always equals `token_budget`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct JudgeBudget {
    pub token_budget: u64,
    pub remaining: u64,
}

/// A submitted project.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Project {
    /// Sequential identifier, starting at 0.
    pub id: u32,
    /// Address that submitted the project and may claim its prize.
    pub submitter: Address,
    /// Address the prize is paid to.
    pub recipient: Address,
    pub name: String,
    /// Link or content reference for the source code.
    pub source_code: String,
    /// Link or content reference for the documentation.
    pub docs: String,
}
