//! Soroban RPC client: polls `getEvents` and decodes hackathon events.
//!
//! ## Resilience
//!
//! * Exponential back-off is applied when the RPC returns an error or rate-limit
//!   response, up to [`MAX_BACKOFF_SECS`] seconds.
//! * Transient network errors (connection reset, timeout) are retried silently.
//!
//! ## Contract discovery
//!
//! Instances are deployed independently of the registry, so the RPC filter
//! cannot name them up front. We request every contract event and keep those
//! emitted by the registry or by an instance the registry has announced in a
//! `created` event. Each batch is scanned for `created` events before any event
//! is decoded: the instance's own `init` event precedes the registry's
//! `created` event in the same transaction.

use std::collections::HashSet;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use crate::errors::{IndexerError, Result};
use crate::events::{EventKind, HackathonEvent};

const MAX_BACKOFF_SECS: u64 = 60;
const INITIAL_BACKOFF_SECS: u64 = 2;

// ScVal discriminants for the scalar topics we decode from raw XDR.
const SCV_U32: u32 = 3;
const SCV_U64: u32 = 5;
const SCV_SYMBOL: u32 = 15;

/// Single-key tags used by the JSON rendering of `ScVal` scalars.
const SCALAR_TAGS: &[&str] = &[
    "bool", "u32", "i32", "u64", "i64", "u128", "i128", "symbol", "string", "address", "bytes",
];

// ─────────────────────────────────────────────────────────
// JSON-RPC response shapes
// ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    pub result: Option<EventsResult>,
    pub error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct EventsResult {
    pub events: Vec<RawEvent>,
    pub cursor: Option<String>,
    #[serde(rename = "latestLedger")]
    pub latest_ledger: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawEvent {
    /// Topic list, either XDR strings or their JSON rendering.
    #[serde(alias = "topicJson")]
    pub topic: Vec<Value>,
    /// Event data, either an XDR string or its JSON rendering.
    #[serde(alias = "valueJson")]
    pub value: Value,
    #[serde(rename = "contractId")]
    pub contract_id: Option<String>,
    #[serde(rename = "txHash")]
    pub tx_hash: Option<String>,
    pub id: Option<String>,
    pub ledger: Option<u64>,
    #[serde(rename = "ledgerClosedAt")]
    pub ledger_closed_at: Option<String>,
    #[serde(rename = "inSuccessfulContractCall")]
    pub in_successful_contract_call: Option<bool>,
    #[serde(rename = "pagingToken")]
    pub paging_token: Option<String>,
}

// ─────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────

/// Fetch a page of contract events from the RPC.
///
/// * `start_ledger`: the ledger sequence to scan from (inclusive).
/// * `cursor`: optional opaque pagination cursor from a previous response.
/// * `limit`: maximum number of events to return.
///
/// Returns `(events, next_cursor, latest_ledger)`.
pub async fn fetch_events(
    client: &Client,
    rpc_url: &str,
    start_ledger: u32,
    cursor: Option<&str>,
    limit: u32,
) -> Result<(Vec<RawEvent>, Option<String>, Option<u64>)> {
    let mut backoff = INITIAL_BACKOFF_SECS;

    loop {
        let params = build_params(start_ledger, cursor, limit);

        let response = client
            .post(rpc_url)
            .json(&json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "getEvents",
                "params": params,
            }))
            .send()
            .await;

        match response {
            Err(e) => {
                warn!("RPC request failed (will retry in {backoff}s): {e}");
                tokio::time::sleep(Duration::from_secs(backoff)).await;
                backoff = (backoff * 2).min(MAX_BACKOFF_SECS);
                continue;
            }
            Ok(resp) => {
                let status = resp.status();
                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    warn!("Rate-limited by RPC (will retry in {backoff}s)");
                    tokio::time::sleep(Duration::from_secs(backoff)).await;
                    backoff = (backoff * 2).min(MAX_BACKOFF_SECS);
                    continue;
                }

                let body: RpcResponse = resp.json().await?;

                if let Some(err) = body.error {
                    // Code -32600 / -32601 are hard failures; everything else we retry
                    if err.code == -32600 || err.code == -32601 {
                        return Err(IndexerError::EventParse(format!(
                            "RPC hard error {}: {}",
                            err.code, err.message
                        )));
                    }
                    warn!(
                        "RPC soft error (will retry in {backoff}s): {} {}",
                        err.code, err.message
                    );
                    tokio::time::sleep(Duration::from_secs(backoff)).await;
                    backoff = (backoff * 2).min(MAX_BACKOFF_SECS);
                    continue;
                }

                let result = body.result.ok_or_else(|| {
                    IndexerError::EventParse("Empty result from getEvents".to_string())
                })?;

                debug!(
                    "Fetched {} events (latest_ledger={:?})",
                    result.events.len(),
                    result.latest_ledger
                );

                return Ok((result.events, result.cursor, result.latest_ledger));
            }
        }
    }
}

fn build_params(start_ledger: u32, cursor: Option<&str>, limit: u32) -> Value {
    let mut params = json!({
        "filters": [
            { "type": "contract" }
        ],
        "xdrFormat": "json",
        "pagination": {
            "limit": limit
        }
    });

    if let Some(cur) = cursor {
        params["pagination"]["cursor"] = json!(cur);
    } else {
        params["startLedger"] = json!(start_ledger);
    }

    params
}

// ─────────────────────────────────────────────────────────
// Event decoding
// ─────────────────────────────────────────────────────────

/// Decode the events emitted by the registry or a known instance.
///
/// `known` is the set of instance addresses seen so far. Every registry
/// `created` event in `raw` adds to it before decoding starts, so events an
/// instance emits ahead of its announcement in the same batch are kept.
pub fn decode_events(
    raw: &[RawEvent],
    registry_id: &str,
    known: &mut HashSet<String>,
) -> Vec<HackathonEvent> {
    known.extend(raw.iter().filter_map(|event| announced_instance(event, registry_id)));

    let mut out = Vec::new();
    for event in raw {
        if event.in_successful_contract_call == Some(false) {
            continue;
        }
        let Some(contract_id) = event.contract_id.as_deref() else {
            continue;
        };
        let from_registry = contract_id == registry_id;
        if !from_registry && !known.contains(contract_id) {
            continue;
        }
        if let Some(decoded) = decode_single(event, contract_id, from_registry) {
            out.push(decoded);
        }
    }
    out
}

/// Instance address named by a successful registry `created` event.
fn announced_instance(event: &RawEvent, registry_id: &str) -> Option<String> {
    if event.in_successful_contract_call == Some(false)
        || event.contract_id.as_deref() != Some(registry_id)
    {
        return None;
    }
    let kind = EventKind::from_topic(&topic_string(event.topic.first()?)?);
    if kind != EventKind::HackathonCreated {
        return None;
    }
    topic_string(event.topic.get(1)?)
}

fn decode_single(raw: &RawEvent, contract_id: &str, from_registry: bool) -> Option<HackathonEvent> {
    // Extract leading topic symbol to determine event type.
    let kind = EventKind::from_topic(&topic_string(raw.topic.first()?)?);
    if from_registry && !kind.is_registry_event() {
        return None;
    }

    let ledger = raw.ledger.unwrap_or(0) as i64;
    let timestamp = raw
        .ledger_closed_at
        .as_deref()
        .and_then(parse_iso_to_unix)
        .unwrap_or(0);

    let second_topic = raw.topic.get(1).and_then(topic_string);
    let data = normalize(&raw.value);
    let decoded = decode_data(&data, kind);

    // Registry events name the instance in the topic; instance events are
    // emitted by the instance itself.
    let (hackathon_id, subject_id) = if from_registry {
        (second_topic, decoded.subject)
    } else {
        (Some(contract_id.to_string()), second_topic.or(decoded.subject))
    };

    let event_key = raw
        .id
        .clone()
        .or_else(|| raw.paging_token.clone())
        .unwrap_or_else(|| {
            format!(
                "{ledger}-{}-{}-{}",
                raw.tx_hash.as_deref().unwrap_or(""),
                kind.as_str(),
                subject_id.as_deref().unwrap_or("")
            )
        });

    Some(HackathonEvent {
        event_key,
        event_type: kind.as_str().to_string(),
        hackathon_id,
        subject_id,
        actor: decoded.actor,
        amount: decoded.amount,
        prize_token: decoded.prize_token,
        ledger,
        timestamp,
        contract_id: contract_id.to_string(),
        tx_hash: raw.tx_hash.clone(),
    })
}

#[derive(Default)]
struct DecodedData {
    actor: Option<String>,
    amount: Option<String>,
    subject: Option<String>,
    prize_token: Option<String>,
}

/// Pull the interesting fields out of an event's (normalised) data map.
fn decode_data(value: &Value, kind: EventKind) -> DecodedData {
    match kind {
        EventKind::HackathonCreated => DecodedData {
            actor: extract_field(value, &["organizer"]),
            amount: extract_field(value, &["prize_amount"]),
            prize_token: extract_field(value, &["prize_token"]),
            ..Default::default()
        },
        EventKind::MemberRegistered | EventKind::MemberRemoved => DecodedData {
            actor: extract_field(value, &["member"]),
            subject: value.get("role").and_then(enum_variant),
            ..Default::default()
        },
        EventKind::HackathonArchived => DecodedData {
            amount: extract_field(value, &["participant_count"]),
            ..Default::default()
        },
        EventKind::HackathonInitialized | EventKind::HackathonConcluded => DecodedData {
            actor: extract_field(value, &["admin"]),
            amount: extract_field(value, &["prize_pool"]),
            ..Default::default()
        },
        EventKind::ProjectSubmitted | EventKind::ProjectEdited => DecodedData {
            actor: extract_field(value, &["submitter"]),
            subject: extract_field(value, &["project_id"]),
            ..Default::default()
        },
        EventKind::VoteCast => DecodedData {
            actor: extract_field(value, &["judge"]),
            amount: extract_field(value, &["amount"]),
            subject: extract_field(value, &["project_id"]),
            ..Default::default()
        },
        EventKind::JudgeAdjusted => DecodedData {
            actor: extract_field(value, &["judge"]),
            amount: extract_field(value, &["new_budget"]),
            ..Default::default()
        },
        EventKind::PrizePoolChanged => DecodedData {
            actor: extract_field(value, &["admin"]),
            amount: extract_field(value, &["new_pool"]),
            ..Default::default()
        },
        EventKind::PrizeClaimed => DecodedData {
            actor: extract_field(value, &["recipient"]),
            amount: extract_field(value, &["amount"]),
            subject: extract_field(value, &["project_id"]),
            ..Default::default()
        },
        EventKind::Unknown => DecodedData::default(),
    }
}

fn extract_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| value.get(key).and_then(scalar_string))
}

/// A unit enum variant renders as a one-element vector holding its name.
fn enum_variant(value: &Value) -> Option<String> {
    match value {
        Value::Array(items) => items.first().and_then(scalar_string),
        other => scalar_string(other),
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Object(map) => map.get("value").and_then(scalar_string),
        _ => None,
    }
}

/// Flatten the JSON rendering of an `ScVal` into plain JSON.
///
/// `{"map":[{"key":{"symbol":"k"},"val":{"u32":1}}]}` becomes `{"k":1}`,
/// `{"vec":[..]}` becomes an array and scalar tags are dropped. Anything
/// else is returned unchanged.
fn normalize(value: &Value) -> Value {
    let Value::Object(map) = value else {
        return value.clone();
    };
    if map.len() != 1 {
        return value.clone();
    }
    let Some((tag, inner)) = map.iter().next() else {
        return value.clone();
    };
    match (tag.as_str(), inner) {
        ("map", Value::Array(entries)) => {
            let mut out = Map::new();
            for entry in entries {
                let (Some(key), Some(val)) = (entry.get("key"), entry.get("val")) else {
                    continue;
                };
                if let Some(key) = scalar_string(&normalize(key)) {
                    out.insert(key, normalize(val));
                }
            }
            Value::Object(out)
        }
        ("vec", Value::Array(items)) => Value::Array(items.iter().map(normalize).collect()),
        (tag, inner) if SCALAR_TAGS.contains(&tag) => inner.clone(),
        _ => value.clone(),
    }
}

/// Render a topic entry as a string.
///
/// Accepts the JSON rendering (`{"symbol":"created"}`), a JSON-encoded string
/// (`{"type":"symbol","value":"created"}`), base64 XDR for symbol and integer
/// topics, or falls back to the raw string.
fn topic_string(topic: &Value) -> Option<String> {
    match topic {
        Value::String(raw) => Some(
            serde_json::from_str::<Value>(raw)
                .ok()
                .and_then(|v| scalar_string(&normalize(&v)))
                .or_else(|| decode_xdr_scalar(raw))
                .unwrap_or_else(|| raw.clone()),
        ),
        other => scalar_string(&normalize(other)),
    }
}

/// Decode a base64 XDR `ScVal` holding a symbol, `u32` or `u64`.
fn decode_xdr_scalar(raw: &str) -> Option<String> {
    let bytes = BASE64.decode(raw).ok()?;
    let word = |at: usize| -> Option<u32> {
        let chunk: [u8; 4] = bytes.get(at..at + 4)?.try_into().ok()?;
        Some(u32::from_be_bytes(chunk))
    };
    match word(0)? {
        SCV_U32 => Some(word(4)?.to_string()),
        SCV_U64 => {
            let chunk: [u8; 8] = bytes.get(4..12)?.try_into().ok()?;
            Some(u64::from_be_bytes(chunk).to_string())
        }
        SCV_SYMBOL => {
            let len = word(4)? as usize;
            let symbol = bytes.get(8..8 + len)?;
            String::from_utf8(symbol.to_vec()).ok()
        }
        _ => None,
    }
}

/// Parse an ISO-8601 timestamp string into a Unix epoch (seconds).
fn parse_iso_to_unix(s: &str) -> Option<i64> {
    use chrono::DateTime;
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.timestamp())
}

// ─────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────
