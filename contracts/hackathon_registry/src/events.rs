//! Registry events. The hackathon address is always the second topic.

use soroban_sdk::{contracttype, symbol_short, Address, Env};

use crate::types::MemberRole;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HackathonCreated {
    pub hackathon: Address,
    pub organizer: Address,
    pub prize_token: Address,
    pub prize_amount: i128,
    pub judge_count: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MembershipChanged {
    pub member: Address,
    pub role: MemberRole,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HackathonArchived {
    pub hackathon: Address,
    pub judge_count: u32,
    pub participant_count: u32,
}

pub fn emit_created(env: &Env, event: HackathonCreated) {
    env.events()
        .publish((symbol_short!("created"), event.hackathon.clone()), event);
}

pub fn emit_member(env: &Env, hackathon: &Address, member: Address, role: MemberRole) {
    env.events().publish(
        (symbol_short!("member"), hackathon.clone()),
        MembershipChanged { member, role },
    );
}

pub fn emit_unmember(env: &Env, hackathon: &Address, member: Address, role: MemberRole) {
    env.events().publish(
        (symbol_short!("unmember"), hackathon.clone()),
        MembershipChanged { member, role },
    );
}

pub fn emit_archived(env: &Env, event: HackathonArchived) {
    env.events()
        .publish((symbol_short!("archived"), event.hackathon.clone()), event);
}
