//! Database layer: migrations, queries, and cursor management.

use std::collections::HashSet;
use std::str::FromStr;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use tracing::info;

use crate::errors::Result;
use crate::events::{EventKind, EventRecord, HackathonEvent, HackathonRecord};

/// Establish a SQLite connection pool and run pending migrations.
pub async fn init_pool(database_url: &str) -> Result<SqlitePool> {
    let url = if database_url.starts_with("sqlite:") {
        database_url.to_string()
    } else {
        format!("sqlite:{database_url}")
    };

    // Every connection to `:memory:` opens its own empty database.
    let max_connections = if url.contains(":memory:") { 1 } else { 5 };

    let options = SqliteConnectOptions::from_str(&url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database migrations applied successfully");
    Ok(pool)
}

// ─────────────────────────────────────────────────────────
// Cursor helpers
// ─────────────────────────────────────────────────────────

/// Read the last-seen ledger from the cursor row.
/// Returns `0` when no cursor has been persisted yet.
pub async fn get_last_ledger(pool: &SqlitePool) -> Result<i64> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT last_ledger FROM indexer_cursor WHERE id = 1")
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|(v,)| v).unwrap_or(0))
}

/// Persist the last-seen ledger (and optionally a pagination cursor string).
pub async fn save_cursor(
    pool: &SqlitePool,
    last_ledger: i64,
    last_cursor: Option<&str>,
) -> Result<()> {
    sqlx::query("UPDATE indexer_cursor SET last_ledger = ?1, last_cursor = ?2 WHERE id = 1")
        .bind(last_ledger)
        .bind(last_cursor)
        .execute(pool)
        .await?;
    Ok(())
}

/// Read back the raw cursor string (used to resume pagination mid-ledger).
pub async fn get_cursor_string(pool: &SqlitePool) -> Result<Option<String>> {
    let row: Option<(Option<String>,)> =
        sqlx::query_as("SELECT last_cursor FROM indexer_cursor WHERE id = 1")
            .fetch_optional(pool)
            .await?;
    Ok(row.and_then(|(v,)| v))
}

// ─────────────────────────────────────────────────────────
// Event writes
// ─────────────────────────────────────────────────────────

/// Persist a batch of decoded events. Events whose `event_key` is already
/// stored are silently ignored to make the indexer idempotent.
pub async fn insert_events(pool: &SqlitePool, events: &[HackathonEvent]) -> Result<usize> {
    let mut count = 0usize;
    for ev in events {
        let rows_affected = sqlx::query(
            r#"
            INSERT OR IGNORE INTO events
                (event_key, event_type, hackathon_id, subject_id, actor, amount,
                 ledger, timestamp, contract_id, tx_hash)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&ev.event_key)
        .bind(&ev.event_type)
        .bind(&ev.hackathon_id)
        .bind(&ev.subject_id)
        .bind(&ev.actor)
        .bind(&ev.amount)
        .bind(ev.ledger)
        .bind(ev.timestamp)
        .bind(&ev.contract_id)
        .bind(&ev.tx_hash)
        .execute(pool)
        .await?
        .rows_affected();

        count += rows_affected as usize;
    }
    Ok(count)
}

// ─────────────────────────────────────────────────────────
// Hackathon lifecycle
// ─────────────────────────────────────────────────────────

/// Fold registry lifecycle events into the `hackathons` table.
///
/// `created` inserts an ongoing row, `archived` marks it past. Replays are
/// harmless.
pub async fn apply_lifecycle(pool: &SqlitePool, events: &[HackathonEvent]) -> Result<()> {
    for ev in events {
        let Some(address) = ev.hackathon_id.as_deref() else {
            continue;
        };
        if ev.event_type == EventKind::HackathonCreated.as_str() {
            sqlx::query(
                r#"
                INSERT OR IGNORE INTO hackathons
                    (address, organizer, prize_token, prize_amount, status, created_ledger)
                VALUES (?1, ?2, ?3, ?4, 'ongoing', ?5)
                "#,
            )
            .bind(address)
            .bind(&ev.actor)
            .bind(&ev.prize_token)
            .bind(&ev.amount)
            .bind(ev.ledger)
            .execute(pool)
            .await?;
        } else if ev.event_type == EventKind::HackathonArchived.as_str() {
            sqlx::query(
                r#"
                UPDATE hackathons
                SET    status = 'past', concluded_ledger = ?2
                WHERE  address = ?1 AND status = 'ongoing'
                "#,
            )
            .bind(address)
            .bind(ev.ledger)
            .execute(pool)
            .await?;
        }
    }
    Ok(())
}

/// Addresses of every hackathon the registry has announced.
pub async fn known_hackathons(pool: &SqlitePool) -> Result<HashSet<String>> {
    let rows: Vec<(String,)> = sqlx::query_as("SELECT address FROM hackathons")
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(|(address,)| address).collect())
}

// ─────────────────────────────────────────────────────────
// Reads
// ─────────────────────────────────────────────────────────

const EVENT_COLUMNS: &str = "id, event_type, hackathon_id, subject_id, actor, amount, ledger, \
                             timestamp, contract_id, tx_hash, created_at";

/// Fetch all events for a given hackathon, ordered by ledger ascending.
pub async fn get_events_for_hackathon(
    pool: &SqlitePool,
    hackathon_id: &str,
) -> Result<Vec<EventRecord>> {
    let sql = format!(
        "SELECT {EVENT_COLUMNS} FROM events WHERE hackathon_id = ?1 ORDER BY ledger ASC, id ASC"
    );
    let rows = sqlx::query_as::<_, EventRecord>(&sql)
        .bind(hackathon_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Fetch all events, optionally of a single type, ordered by ledger ascending.
pub async fn get_all_events(
    pool: &SqlitePool,
    event_type: Option<&str>,
) -> Result<Vec<EventRecord>> {
    let sql = format!(
        "SELECT {EVENT_COLUMNS} FROM events \
         WHERE ?1 IS NULL OR event_type = ?1 ORDER BY ledger ASC, id ASC"
    );
    let rows = sqlx::query_as::<_, EventRecord>(&sql)
        .bind(event_type)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// List hackathons, optionally filtered by `ongoing` / `past`.
pub async fn list_hackathons(
    pool: &SqlitePool,
    status: Option<&str>,
) -> Result<Vec<HackathonRecord>> {
    let rows = sqlx::query_as::<_, HackathonRecord>(
        r#"
        SELECT address, organizer, prize_token, prize_amount, status,
               created_ledger, concluded_ledger
        FROM   hackathons
        WHERE  ?1 IS NULL OR status = ?1
        ORDER  BY created_ledger ASC, address ASC
        "#,
    )
    .bind(status)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn get_hackathon(pool: &SqlitePool, address: &str) -> Result<Option<HackathonRecord>> {
    let row = sqlx::query_as::<_, HackathonRecord>(
        r#"
        SELECT address, organizer, prize_token, prize_amount, status,
               created_ledger, concluded_ledger
        FROM   hackathons
        WHERE  address = ?1
        "#,
    )
    .bind(address)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_pool() -> SqlitePool {
        init_pool("sqlite::memory:").await.unwrap()
    }

    fn event(key: &str, kind: EventKind, hackathon: &str, ledger: i64) -> HackathonEvent {
        HackathonEvent {
            event_key: key.to_string(),
            event_type: kind.as_str().to_string(),
            hackathon_id: Some(hackathon.to_string()),
            subject_id: None,
            actor: Some("GORGANIZER".to_string()),
            amount: Some("1500".to_string()),
            prize_token: Some("CTOKEN".to_string()),
            ledger,
            timestamp: 0,
            contract_id: "CREGISTRY".to_string(),
            tx_hash: None,
        }
    }

    #[tokio::test]
    async fn cursor_round_trip() {
        let pool = memory_pool().await;
        assert_eq!(get_last_ledger(&pool).await.unwrap(), 0);
        assert_eq!(get_cursor_string(&pool).await.unwrap(), None);

        save_cursor(&pool, 1234, Some("page-2")).await.unwrap();
        assert_eq!(get_last_ledger(&pool).await.unwrap(), 1234);
        assert_eq!(get_cursor_string(&pool).await.unwrap().as_deref(), Some("page-2"));
    }

    #[tokio::test]
    async fn insert_is_idempotent() {
        let pool = memory_pool().await;
        let batch = vec![
            event("e1", EventKind::HackathonCreated, "CH1", 10),
            event("e2", EventKind::VoteCast, "CH1", 12),
        ];

        assert_eq!(insert_events(&pool, &batch).await.unwrap(), 2);
        assert_eq!(insert_events(&pool, &batch).await.unwrap(), 0);

        let all = get_all_events(&pool, None).await.unwrap();
        assert_eq!(all.len(), 2);
        let votes = get_all_events(&pool, Some("vote_cast")).await.unwrap();
        assert_eq!(votes.len(), 1);
        assert_eq!(votes[0].ledger, 12);
    }

    #[tokio::test]
    async fn events_are_grouped_by_hackathon() {
        let pool = memory_pool().await;
        let batch = vec![
            event("e1", EventKind::ProjectSubmitted, "CH1", 11),
            event("e2", EventKind::ProjectSubmitted, "CH2", 12),
            event("e3", EventKind::VoteCast, "CH1", 13),
        ];
        insert_events(&pool, &batch).await.unwrap();

        let first = get_events_for_hackathon(&pool, "CH1").await.unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].event_type, "project_submitted");
        assert_eq!(first[1].event_type, "vote_cast");
        assert!(get_events_for_hackathon(&pool, "CH9").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn lifecycle_tracks_status() {
        let pool = memory_pool().await;
        apply_lifecycle(
            &pool,
            &[
                event("c1", EventKind::HackathonCreated, "CH1", 10),
                event("c2", EventKind::HackathonCreated, "CH2", 11),
            ],
        )
        .await
        .unwrap();

        let known = known_hackathons(&pool).await.unwrap();
        assert_eq!(known.len(), 2);
        assert!(known.contains("CH1"));

        apply_lifecycle(&pool, &[event("a1", EventKind::HackathonArchived, "CH1", 50)])
            .await
            .unwrap();

        let past = list_hackathons(&pool, Some("past")).await.unwrap();
        assert_eq!(past.len(), 1);
        assert_eq!(past[0].address, "CH1");
        assert_eq!(past[0].concluded_ledger, Some(50));

        let ongoing = list_hackathons(&pool, Some("ongoing")).await.unwrap();
        assert_eq!(ongoing.len(), 1);
        assert_eq!(ongoing[0].organizer.as_deref(), Some("GORGANIZER"));
        assert_eq!(ongoing[0].prize_amount.as_deref(), Some("1500"));

        assert_eq!(list_hackathons(&pool, None).await.unwrap().len(), 2);
        assert!(get_hackathon(&pool, "CH9").await.unwrap().is_none());
        assert_eq!(
            get_hackathon(&pool, "CH2").await.unwrap().unwrap().status,
            "ongoing"
        );
    }
}
