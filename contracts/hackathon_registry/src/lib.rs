//! # Hackathon Registry Contract
//!
//! Enrols hackathon instances and tracks, for every judge and participant,
//! which hackathons they belong to, split into ongoing and past.
//!
//! | Caller        | Entry Point(s)                                                  |
//! |---------------|-----------------------------------------------------------------|
//! | Admin         | [`HackathonRegistry::initialize`]                               |
//! | Organizer     | [`HackathonRegistry::create_hackathon`]                         |
//! | Instance      | `register_participant`, `register_judge`, `remove_judge`, `hackathon_concluded` |
//! | Anyone        | `get_ongoing`, `get_past`, `get_memberships`, `get_roster`, ... |
//!
//! ## Trust
//!
//! The registry deploys every instance it tracks from the code hash set at
//! initialisation (see [`deploy`]), so the instance-only callbacks can trust
//! any caller that is tracked as ongoing.
//!
//! ## Conclusion
//!
//! When an instance reports its conclusion the registry moves it from the
//! ongoing to the past partition and, in the same call, moves it from the
//! ongoing to the past list of every judge and participant on its roster.
//! The roster is the registry's own record of what the instance reported;
//! the host does not allow calling back into the concluding instance.

#![no_std]

use hackathon_interface::{HackathonClient, HackathonConfig, JudgeAllocation};
use soroban_sdk::{contract, contracterror, contractimpl, token, Address, BytesN, Env, Vec};

mod deploy;
mod events;
mod membership;
mod storage;
mod types;


pub use events::{HackathonArchived, HackathonCreated, MembershipChanged};
pub use types::{HackathonStatus, MemberRole, Roster};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    InvalidParams         = 1,
    AlreadyRegistered     = 2,
    OnlyOngoingHackathons = 3,
    OnlyHackathonContract = 4,
    InvalidRange          = 5,
    TokenTransferFailed   = 6,
    NotInitialized        = 7,
    AlreadyInitialized    = 8,
}

#[contract]
pub struct HackathonRegistry;

#[contractimpl]
impl HackathonRegistry {
    // ─────────────────────────────────────────────────────────
    // Setup
    // ─────────────────────────────────────────────────────────

    /// Record the registry admin and the code hash every hackathon instance
    /// is deployed from. Callable once.
    pub fn initialize(
        env: Env,
        admin: Address,
        hackathon_wasm_hash: BytesN<32>,
    ) -> Result<(), Error> {
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }
        admin.require_auth();
        storage::init_instance(&env, &admin, &hackathon_wasm_hash);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Creation
    // ─────────────────────────────────────────────────────────

    /// Deploy a new hackathon instance at the address derived from `salt`,
    /// initialise it, fund it with `prize_amount` of `config.prize_token`
    /// from `organizer`, and enrol it as ongoing together with its initial
    /// judges. Returns the instance address.
    ///
    /// `organizer` becomes the instance admin.
    pub fn create_hackathon(
        env: Env,
        organizer: Address,
        salt: BytesN<32>,
        config: HackathonConfig,
        judges: Vec<JudgeAllocation>,
        prize_amount: i128,
    ) -> Result<Address, Error> {
        organizer.require_auth();
        let wasm_hash = storage::get_hackathon_wasm(&env).ok_or(Error::NotInitialized)?;
        if prize_amount < 0 {
            return Err(Error::InvalidParams);
        }
        if storage::get_status(&env, &deploy::instance_address(&env, &salt)).is_some() {
            return Err(Error::AlreadyRegistered);
        }

        let hackathon = deploy::deploy_instance(&env, wasm_hash, salt);
        let instance = HackathonClient::new(&env, &hackathon);
        match instance.try_initialize(
            &env.current_contract_address(),
            &organizer,
            &config,
            &judges,
            &prize_amount,
        ) {
            Ok(Ok(())) => {}
            _ => return Err(Error::InvalidParams),
        }

        if prize_amount > 0 {
            match token::Client::new(&env, &config.prize_token).try_transfer(
                &organizer,
                &hackathon,
                &prize_amount,
            ) {
                Ok(Ok(())) => {}
                _ => return Err(Error::TokenTransferFailed),
            }
        }

        let mut ongoing = storage::load_hackathons(&env, HackathonStatus::Ongoing);
        ongoing.push_back(hackathon.clone());
        storage::save_hackathons(&env, HackathonStatus::Ongoing, &ongoing);
        storage::set_status(&env, &hackathon, HackathonStatus::Ongoing);

        let mut roster = Roster {
            judges: Vec::new(&env),
            participants: Vec::new(&env),
        };
        for allocation in judges.iter() {
            membership::join(&env, &allocation.judge, MemberRole::Judge, &hackathon);
            roster.judges.push_back(allocation.judge);
        }
        storage::save_roster(&env, &hackathon, &roster);
        storage::bump_instance(&env);

        events::emit_created(
            &env,
            HackathonCreated {
                hackathon: hackathon.clone(),
                organizer,
                prize_token: config.prize_token,
                prize_amount,
                judge_count: roster.judges.len(),
            },
        );
        Ok(hackathon)
    }

    // ─────────────────────────────────────────────────────────
    // Instance callbacks
    // ─────────────────────────────────────────────────────────

    /// Record `participant` on an ongoing hackathon's roster.
    pub fn register_participant(
        env: Env,
        hackathon: Address,
        participant: Address,
    ) -> Result<(), Error> {
        Self::add_member(&env, &hackathon, participant, MemberRole::Participant)
    }

    /// Record `judge` on an ongoing hackathon's roster.
    pub fn register_judge(env: Env, hackathon: Address, judge: Address) -> Result<(), Error> {
        Self::add_member(&env, &hackathon, judge, MemberRole::Judge)
    }

    /// Take `judge` off an ongoing hackathon's roster.
    pub fn remove_judge(env: Env, hackathon: Address, judge: Address) -> Result<(), Error> {
        hackathon.require_auth();
        require_ongoing(&env, &hackathon, Error::OnlyOngoingHackathons)?;

        let mut roster = load_roster(&env, &hackathon)?;
        if !membership::swap_remove(&mut roster.judges, &judge) {
            return Err(Error::InvalidParams);
        }
        storage::save_roster(&env, &hackathon, &roster);
        membership::leave(&env, &judge, MemberRole::Judge, &hackathon);

        events::emit_unmember(&env, &hackathon, judge, MemberRole::Judge);
        Ok(())
    }

    /// Move `hackathon` and its whole roster from ongoing to past.
    ///
    /// Only the hackathon itself may report its conclusion, and only once.
    pub fn hackathon_concluded(env: Env, hackathon: Address) -> Result<(), Error> {
        hackathon.require_auth();
        require_ongoing(&env, &hackathon, Error::OnlyHackathonContract)?;

        let roster = load_roster(&env, &hackathon)?;
        membership::archive_hackathon(&env, &hackathon);
        for judge in roster.judges.iter() {
            membership::archive(&env, &judge, MemberRole::Judge, &hackathon);
        }
        for participant in roster.participants.iter() {
            membership::archive(&env, &participant, MemberRole::Participant, &hackathon);
        }
        storage::bump_instance(&env);

        events::emit_archived(
            &env,
            HackathonArchived {
                hackathon,
                judge_count: roster.judges.len(),
                participant_count: roster.participants.len(),
            },
        );
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn admin(env: Env) -> Result<Address, Error> {
        storage::get_admin(&env).ok_or(Error::NotInitialized)
    }

    pub fn hackathon_wasm_hash(env: Env) -> Result<BytesN<32>, Error> {
        storage::get_hackathon_wasm(&env).ok_or(Error::NotInitialized)
    }

    /// Address a hackathon created with `salt` is (or would be) deployed at.
    pub fn hackathon_address(env: Env, salt: BytesN<32>) -> Address {
        deploy::instance_address(&env, &salt)
    }

    pub fn ongoing_count(env: Env) -> u32 {
        storage::load_hackathons(&env, HackathonStatus::Ongoing).len()
    }

    pub fn past_count(env: Env) -> u32 {
        storage::load_hackathons(&env, HackathonStatus::Past).len()
    }

    /// Ongoing hackathons in `[start, end)`.
    pub fn get_ongoing(env: Env, start: u32, end: u32) -> Result<Vec<Address>, Error> {
        membership::page(
            &storage::load_hackathons(&env, HackathonStatus::Ongoing),
            start,
            end,
        )
    }

    /// Concluded hackathons in `[start, end)`.
    pub fn get_past(env: Env, start: u32, end: u32) -> Result<Vec<Address>, Error> {
        membership::page(
            &storage::load_hackathons(&env, HackathonStatus::Past),
            start,
            end,
        )
    }

    pub fn is_ongoing(env: Env, hackathon: Address) -> bool {
        storage::get_status(&env, &hackathon) == Some(HackathonStatus::Ongoing)
    }

    pub fn status_of(env: Env, hackathon: Address) -> Option<HackathonStatus> {
        storage::get_status(&env, &hackathon)
    }

    pub fn membership_count(
        env: Env,
        member: Address,
        role: MemberRole,
        status: HackathonStatus,
    ) -> u32 {
        storage::load_memberships(&env, &member, role, status).len()
    }

    /// Hackathons in `[start, end)` of `member`'s list for `role` and `status`.
    pub fn get_memberships(
        env: Env,
        member: Address,
        role: MemberRole,
        status: HackathonStatus,
        start: u32,
        end: u32,
    ) -> Result<Vec<Address>, Error> {
        membership::page(
            &storage::load_memberships(&env, &member, role, status),
            start,
            end,
        )
    }

    pub fn get_roster(env: Env, hackathon: Address) -> Result<Roster, Error> {
        load_roster(&env, &hackathon)
    }
}

impl HackathonRegistry {
    fn add_member(
        env: &Env,
        hackathon: &Address,
        member: Address,
        role: MemberRole,
    ) -> Result<(), Error> {
        hackathon.require_auth();
        require_ongoing(env, hackathon, Error::OnlyOngoingHackathons)?;

        let mut roster = load_roster(env, hackathon)?;
        let entries = match role {
            MemberRole::Judge => &mut roster.judges,
            MemberRole::Participant => &mut roster.participants,
        };
        if entries.contains(&member) {
            return Err(Error::AlreadyRegistered);
        }
        entries.push_back(member.clone());
        storage::save_roster(env, hackathon, &roster);
        membership::join(env, &member, role, hackathon);

        events::emit_member(env, hackathon, member, role);
        Ok(())
    }
}

fn require_ongoing(env: &Env, hackathon: &Address, error: Error) -> Result<(), Error> {
    match storage::get_status(env, hackathon) {
        Some(HackathonStatus::Ongoing) => Ok(()),
        _ => Err(error),
    }
}

fn load_roster(env: &Env, hackathon: &Address) -> Result<Roster, Error> {
    storage::load_roster(env, hackathon).ok_or(Error::InvalidParams)
}
