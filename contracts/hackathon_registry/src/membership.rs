//! Ordered-set operations over the registry's address lists.
//!
//! Lists are unordered sets stored as `Vec<Address>`. Removal finds the entry
//! linearly and swap-removes it (the last element takes its slot), so order
//! is not preserved across removals. Lists are bounded by the number of
//! hackathons an address joins.

use soroban_sdk::{Address, Env, Vec};

use crate::storage;
use crate::types::{HackathonStatus, MemberRole};
use crate::Error;

/// Remove `item` by moving the last element into its slot.
/// Returns `false` if `item` was not present.
pub fn swap_remove(list: &mut Vec<Address>, item: &Address) -> bool {
    let Some(index) = list.first_index_of(item) else {
        return false;
    };
    let last = list.len() - 1;
    if index != last {
        if let Some(tail) = list.get(last) {
            list.set(index, tail);
        }
    }
    list.pop_back();
    true
}

/// Copy out `[start, end)` of `list`.
pub fn page(list: &Vec<Address>, start: u32, end: u32) -> Result<Vec<Address>, Error> {
    if start > end || end > list.len() {
        return Err(Error::InvalidRange);
    }
    Ok(list.slice(start..end))
}

/// Move `hackathon` from the ongoing to the past partition.
pub fn archive_hackathon(env: &Env, hackathon: &Address) {
    let mut ongoing = storage::load_hackathons(env, HackathonStatus::Ongoing);
    swap_remove(&mut ongoing, hackathon);
    storage::save_hackathons(env, HackathonStatus::Ongoing, &ongoing);

    let mut past = storage::load_hackathons(env, HackathonStatus::Past);
    past.push_back(hackathon.clone());
    storage::save_hackathons(env, HackathonStatus::Past, &past);

    storage::set_status(env, hackathon, HackathonStatus::Past);
}

/// Append `hackathon` to `member`'s ongoing list for `role`.
pub fn join(env: &Env, member: &Address, role: MemberRole, hackathon: &Address) {
    let mut ongoing = storage::load_memberships(env, member, role, HackathonStatus::Ongoing);
    ongoing.push_back(hackathon.clone());
    storage::save_memberships(env, member, role, HackathonStatus::Ongoing, &ongoing);
}

/// Drop `hackathon` from `member`'s ongoing list for `role`.
pub fn leave(env: &Env, member: &Address, role: MemberRole, hackathon: &Address) {
    let mut ongoing = storage::load_memberships(env, member, role, HackathonStatus::Ongoing);
    if swap_remove(&mut ongoing, hackathon) {
        storage::save_memberships(env, member, role, HackathonStatus::Ongoing, &ongoing);
    }
}

/// Move `hackathon` from `member`'s ongoing list to their past list.
pub fn archive(env: &Env, member: &Address, role: MemberRole, hackathon: &Address) {
    leave(env, member, role, hackathon);
    let mut past = storage::load_memberships(env, member, role, HackathonStatus::Past);
    past.push_back(hackathon.clone());
    storage::save_memberships(env, member, role, HackathonStatus::Past, &past);
}
