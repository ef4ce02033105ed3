//! # Types
//!
//! Partition and role markers used to key the registry's lists.

use soroban_sdk::{contracttype, Address, Vec};

/// Which partition a hackathon (or a membership entry) lives in.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HackathonStatus {
    Ongoing,
    Past,
}

/// Capacity in which an address is associated with a hackathon.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MemberRole {
    Participant,
    Judge,
}

/// Every address a hackathon reported to the registry, by role.
///
/// Conclusion migrates exactly these entries, so the roster stays in step
/// with the per-address membership lists.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Roster {
    pub judges: Vec<Address>,
    pub participants: Vec<Address>,
}
