//! Long-running background task that polls the Soroban RPC and writes
//! decoded registry and instance events to the database.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use sqlx::SqlitePool;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::config::Config;
use crate::db;
use crate::errors::Result;
use crate::rpc;

pub struct IndexerState {
    pub pool: SqlitePool,
    pub config: Config,
    pub client: Client,
}

/// Poll until `shutdown` is cancelled.
pub async fn run(state: Arc<IndexerState>, shutdown: CancellationToken) {
    info!("Indexer starting with registry {}", state.config.registry_id);

    // Load the cursor from the DB; fall back to config start_ledger.
    let last_ledger = db::get_last_ledger(&state.pool).await.unwrap_or(0);
    let mut cursor = db::get_cursor_string(&state.pool).await.unwrap_or(None);
    let mut known = match db::known_hackathons(&state.pool).await {
        Ok(known) => known,
        Err(e) => {
            error!("Failed to load known hackathons: {e}");
            HashSet::new()
        }
    };

    let mut current_ledger = if last_ledger > 0 {
        last_ledger as u32
    } else {
        state.config.start_ledger
    };

    info!(
        "Resuming from ledger {current_ledger} with {} known hackathons",
        known.len()
    );

    loop {
        let poll = poll_once(
            &state.pool,
            &state.client,
            &state.config,
            &mut known,
            current_ledger,
            cursor.as_deref(),
        );
        let outcome = tokio::select! {
            _ = shutdown.cancelled() => break,
            outcome = poll => outcome,
        };
        match outcome {
            Ok((next_ledger, next_cursor)) => {
                current_ledger = next_ledger;
                cursor = next_cursor;
            }
            Err(e) => {
                error!("Indexer poll error: {e}");
            }
        }

        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = tokio::time::sleep(Duration::from_secs(state.config.poll_interval_secs)) => {}
        }
    }

    info!("Indexer stopped at ledger {current_ledger}");
}

/// Perform a single poll iteration.
///
/// Returns `(next_start_ledger, next_cursor)`.
async fn poll_once(
    pool: &SqlitePool,
    client: &Client,
    config: &Config,
    known: &mut HashSet<String>,
    start_ledger: u32,
    cursor: Option<&str>,
) -> Result<(u32, Option<String>)> {
    let (raw_events, next_cursor, latest_ledger) = rpc::fetch_events(
        client,
        &config.rpc_url,
        start_ledger,
        cursor,
        config.events_per_page,
    )
    .await?;

    if !raw_events.is_empty() {
        let before = known.len();
        let decoded = rpc::decode_events(&raw_events, &config.registry_id, known);
        let inserted = db::insert_events(pool, &decoded).await?;
        db::apply_lifecycle(pool, &decoded).await?;
        info!(
            "Polled {} raw events → {} tracked, {} new records stored, {} hackathons discovered",
            raw_events.len(),
            decoded.len(),
            inserted,
            known.len() - before
        );
    }

    // Advance the ledger cursor:
    // - If there is a next_cursor string, keep the same start_ledger so the next
    //   call paginates within the same ledger range.
    // - Otherwise advance to the latest known ledger.
    let next_ledger = latest_ledger
        .map(|l| (l as u32).max(start_ledger))
        .unwrap_or(start_ledger);

    // Persist cursor so restarts are deterministic.
    db::save_cursor(pool, next_ledger as i64, next_cursor.as_deref()).await?;

    Ok((next_ledger, next_cursor))
}
