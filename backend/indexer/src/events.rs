//! Canonical event types emitted by the hackathon registry and its instances.
//!
//! These mirror the Soroban contract events defined in
//! `contracts/hackathon_registry/src/events.rs` and
//! `contracts/hackathon/src/events.rs`.

use serde::{Deserialize, Serialize};

/// All recognised event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// The registry enrolled a new instance (`created` topic).
    HackathonCreated,
    /// An instance reported a judge or participant (`member` topic).
    MemberRegistered,
    /// An instance reported a judge removal (`unmember` topic).
    MemberRemoved,
    /// The registry moved an instance to the past partition (`archived` topic).
    HackathonArchived,
    /// An instance was initialised (`init` topic).
    HackathonInitialized,
    /// A project was submitted (`submitted` topic).
    ProjectSubmitted,
    /// A project's metadata was edited (`edited` topic).
    ProjectEdited,
    /// A judge (re)assigned votes (`voted` topic).
    VoteCast,
    /// The admin changed a judge's budget (`judge_adj` topic).
    JudgeAdjusted,
    /// The prize pool was increased or adjusted (`pool_set` topic).
    PrizePoolChanged,
    /// The admin concluded the hackathon (`concluded` topic).
    HackathonConcluded,
    /// A project's prize share was paid out (`claimed` topic).
    PrizeClaimed,
    /// An event from a tracked contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "created" => Self::HackathonCreated,
            "member" => Self::MemberRegistered,
            "unmember" => Self::MemberRemoved,
            "archived" => Self::HackathonArchived,
            "init" => Self::HackathonInitialized,
            "submitted" => Self::ProjectSubmitted,
            "edited" => Self::ProjectEdited,
            "voted" => Self::VoteCast,
            "judge_adj" => Self::JudgeAdjusted,
            "pool_set" => Self::PrizePoolChanged,
            "concluded" => Self::HackathonConcluded,
            "claimed" => Self::PrizeClaimed,
            _ => Self::Unknown,
        }
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HackathonCreated => "hackathon_created",
            Self::MemberRegistered => "member_registered",
            Self::MemberRemoved => "member_removed",
            Self::HackathonArchived => "hackathon_archived",
            Self::HackathonInitialized => "hackathon_initialized",
            Self::ProjectSubmitted => "project_submitted",
            Self::ProjectEdited => "project_edited",
            Self::VoteCast => "vote_cast",
            Self::JudgeAdjusted => "judge_adjusted",
            Self::PrizePoolChanged => "prize_pool_changed",
            Self::HackathonConcluded => "hackathon_concluded",
            Self::PrizeClaimed => "prize_claimed",
            Self::Unknown => "unknown",
        }
    }

    /// Registry events carry the instance address as their second topic.
    pub fn is_registry_event(&self) -> bool {
        matches!(
            self,
            Self::HackathonCreated
                | Self::MemberRegistered
                | Self::MemberRemoved
                | Self::HackathonArchived
        )
    }
}

/// A fully decoded event, ready to be stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HackathonEvent {
    /// RPC event id, or a synthesised key when the RPC omits it.
    pub event_key: String,
    pub event_type: String,
    /// Instance the event concerns. For instance events this is the emitter.
    pub hackathon_id: Option<String>,
    /// Project id or judge address, depending on the event.
    pub subject_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    /// Prize token, only present on `created`.
    pub prize_token: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// A raw event record as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_type: String,
    pub hackathon_id: Option<String>,
    pub subject_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}

/// A hackathon as reconstructed from registry events.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct HackathonRecord {
    pub address: String,
    pub organizer: Option<String>,
    pub prize_token: Option<String>,
    pub prize_amount: Option<String>,
    /// `ongoing` or `past`.
    pub status: String,
    pub created_ledger: i64,
    pub concluded_ledger: Option<i64>,
}
