//! # Storage
//!
//! The admin and the instance code hash live in instance storage. Every other
//! entry is per-hackathon or per-address and lives in persistent storage.
//!
//! | Key                                  | Type              | Description                         |
//! |--------------------------------------|-------------------|-------------------------------------|
//! | `Admin`                              | `Address`         | Registry administrator (instance)   |
//! | `HackathonWasm`                      | `BytesN<32>`      | Instance code hash (instance)       |
//! | `Hackathons(status)`                 | `Vec<Address>`    | Ongoing / past partitions           |
//! | `Status(hackathon)`                  | `HackathonStatus` | Which partition holds the hackathon |
//! | `Roster(hackathon)`                  | `Roster`          | Reported judges and participants    |
//! | `Membership(member, role, status)`   | `Vec<Address>`    | Hackathons an address belongs to    |
//!
//! TTL is bumped by **30 days** whenever it falls below 7 days remaining.

use soroban_sdk::{contracttype, Address, BytesN, Env, Vec};

use crate::types::{HackathonStatus, MemberRole, Roster};

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Admin,
    HackathonWasm,
    Hackathons(HackathonStatus),
    Status(Address),
    Roster(Address),
    Membership(Address, MemberRole, HackathonStatus),
}

/// Keep the contract instance itself alive alongside its data.
pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub fn init_instance(env: &Env, admin: &Address, wasm_hash: &BytesN<32>) {
    env.storage().instance().set(&DataKey::Admin, admin);
    env.storage().instance().set(&DataKey::HackathonWasm, wasm_hash);
    bump_instance(env);
}

pub fn get_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Admin)
}

pub fn get_hackathon_wasm(env: &Env) -> Option<BytesN<32>> {
    env.storage().instance().get(&DataKey::HackathonWasm)
}

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

pub fn load_hackathons(env: &Env, status: HackathonStatus) -> Vec<Address> {
    load_list(env, &DataKey::Hackathons(status))
}

pub fn save_hackathons(env: &Env, status: HackathonStatus, list: &Vec<Address>) {
    save_list(env, &DataKey::Hackathons(status), list);
}

pub fn get_status(env: &Env, hackathon: &Address) -> Option<HackathonStatus> {
    env.storage()
        .persistent()
        .get(&DataKey::Status(hackathon.clone()))
}

pub fn set_status(env: &Env, hackathon: &Address, status: HackathonStatus) {
    let key = DataKey::Status(hackathon.clone());
    env.storage().persistent().set(&key, &status);
    bump_persistent(env, &key);
}

pub fn load_roster(env: &Env, hackathon: &Address) -> Option<Roster> {
    let key = DataKey::Roster(hackathon.clone());
    let roster = env.storage().persistent().get(&key);
    if roster.is_some() {
        bump_persistent(env, &key);
    }
    roster
}

pub fn save_roster(env: &Env, hackathon: &Address, roster: &Roster) {
    let key = DataKey::Roster(hackathon.clone());
    env.storage().persistent().set(&key, roster);
    bump_persistent(env, &key);
}

pub fn load_memberships(
    env: &Env,
    member: &Address,
    role: MemberRole,
    status: HackathonStatus,
) -> Vec<Address> {
    load_list(env, &DataKey::Membership(member.clone(), role, status))
}

pub fn save_memberships(
    env: &Env,
    member: &Address,
    role: MemberRole,
    status: HackathonStatus,
    list: &Vec<Address>,
) {
    save_list(env, &DataKey::Membership(member.clone(), role, status), list);
}
