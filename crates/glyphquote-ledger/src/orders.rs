// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Order ledger backed by SQLite.
//
// Each order records which upload was quoted, with what profile, target and
// raw parameters, and the priced result. Upload bytes live in a blob store
// and are referenced by their content id.

use chrono::{DateTime, SecondsFormat, Utc};
use glyphquote_core::error::{QuoteError, Result};
use glyphquote_core::types::{PricingResult, TargetSize};
use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use uuid::Uuid;

const CREATE_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS orders (
        id TEXT PRIMARY KEY,
        file_id TEXT NOT NULL,
        profile TEXT NOT NULL,
        target_length INTEGER NOT NULL,
        target_height INTEGER NOT NULL,
        params TEXT NOT NULL,
        result TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
"#;

const SELECT_COLUMNS: &str =
    "SELECT id, file_id, profile, target_length, target_height, params, result, created_at
     FROM orders";

/// A persisted quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: Uuid,
    /// Content id of the uploaded file in the blob store.
    pub file_id: String,
    /// Display name of the pricing profile.
    pub profile: String,
    pub target: TargetSize,
    /// Pricing parameters exactly as the caller sent them.
    pub params: serde_json::Value,
    pub result: PricingResult,
    pub created_at: DateTime<Utc>,
}

impl OrderRecord {
    /// New record with a fresh id, stamped now.
    pub fn new(
        file_id: String,
        profile: String,
        target: TargetSize,
        params: serde_json::Value,
        result: PricingResult,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            file_id,
            profile,
            target,
            params,
            result,
            created_at: Utc::now(),
        }
    }
}

/// Persists orders and returns them by id.
pub trait OrderLedger {
    fn insert(&self, order: &OrderRecord) -> Result<()>;

    /// `None` when no order has this id.
    fn get(&self, id: &Uuid) -> Result<Option<OrderRecord>>;

    /// All orders, newest first.
    fn list(&self) -> Result<Vec<OrderRecord>>;

    /// Fails with `NotFound` when no order has this id.
    fn delete(&self, id: &Uuid) -> Result<()>;
}

/// Order ledger in a SQLite database.
///
/// `rusqlite` connections are `Send` but not `Sync`; share one behind a
/// mutex or open one per thread.
pub struct SqliteOrderLedger {
    conn: Connection,
}

impl SqliteOrderLedger {
    /// Open (or create) the ledger database at `path`.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())
            .map_err(|e| QuoteError::Database(format!("open: {e}")))?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| QuoteError::Database(format!("WAL pragma: {e}")))?;

        conn.execute_batch(CREATE_TABLE_SQL)
            .map_err(|e| QuoteError::Database(format!("create table: {e}")))?;

        info!("order ledger opened");
        Ok(Self { conn })
    }

    /// Open an in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| QuoteError::Database(format!("open in-memory: {e}")))?;

        conn.execute_batch(CREATE_TABLE_SQL)
            .map_err(|e| QuoteError::Database(format!("create table: {e}")))?;

        debug!("in-memory order ledger opened");
        Ok(Self { conn })
    }
}

impl OrderLedger for SqliteOrderLedger {
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    fn insert(&self, order: &OrderRecord) -> Result<()> {
        let params_json = serde_json::to_string(&order.params)
            .map_err(|e| QuoteError::Database(format!("serialize params: {e}")))?;
        let result_json = serde_json::to_string(&order.result)
            .map_err(|e| QuoteError::Database(format!("serialize result: {e}")))?;

        self.conn
            .execute(
                "INSERT INTO orders (id, file_id, profile, target_length, target_height,
                 params, result, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    order.id.to_string(),
                    order.file_id,
                    order.profile,
                    order.target.length,
                    order.target.height,
                    params_json,
                    result_json,
                    timestamp(&order.created_at),
                ],
            )
            .map_err(|e| QuoteError::Database(format!("insert order: {e}")))?;

        info!(total_price = order.result.total_price, "order recorded");
        Ok(())
    }

    #[instrument(skip(self), fields(order_id = %id))]
    fn get(&self, id: &Uuid) -> Result<Option<OrderRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))
            .map_err(|e| QuoteError::Database(format!("prepare get: {e}")))?;

        let mut rows = stmt
            .query_map(params![id.to_string()], row_to_order)
            .map_err(|e| QuoteError::Database(format!("query get: {e}")))?;

        match rows.next() {
            Some(Ok(order)) => Ok(Some(order)),
            Some(Err(e)) => Err(QuoteError::Database(format!("row parse: {e}"))),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    fn list(&self) -> Result<Vec<OrderRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "{SELECT_COLUMNS} ORDER BY created_at DESC, rowid DESC"
            ))
            .map_err(|e| QuoteError::Database(format!("prepare list: {e}")))?;

        let orders = stmt
            .query_map([], row_to_order)
            .map_err(|e| QuoteError::Database(format!("query list: {e}")))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| QuoteError::Database(format!("collect rows: {e}")))?;

        debug!(count = orders.len(), "listed orders");
        Ok(orders)
    }

    #[instrument(skip(self), fields(order_id = %id))]
    fn delete(&self, id: &Uuid) -> Result<()> {
        let rows = self
            .conn
            .execute("DELETE FROM orders WHERE id = ?1", params![id.to_string()])
            .map_err(|e| QuoteError::Database(format!("delete order: {e}")))?;

        if rows == 0 {
            return Err(QuoteError::NotFound(format!("order {id}")));
        }
        info!("order deleted");
        Ok(())
    }
}

/// Fixed-width UTC timestamp so text ordering matches time ordering.
fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

// ---------------------------------------------------------------------------
// Row mapping
// ---------------------------------------------------------------------------

/// Column indices follow `SELECT_COLUMNS`.
fn row_to_order(row: &rusqlite::Row<'_>) -> rusqlite::Result<OrderRecord> {
    let id_str: String = row.get(0)?;
    let file_id: String = row.get(1)?;
    let profile: String = row.get(2)?;
    let length: u32 = row.get(3)?;
    let height: u32 = row.get(4)?;
    let params_json: String = row.get(5)?;
    let result_json: String = row.get(6)?;
    let created_at_str: String = row.get(7)?;

    let conversion = |index: usize, e: Box<dyn std::error::Error + Send + Sync>| {
        rusqlite::Error::FromSqlConversionFailure(index, rusqlite::types::Type::Text, e)
    };

    let id = Uuid::parse_str(&id_str).map_err(|e| conversion(0, Box::new(e)))?;
    let params = serde_json::from_str(&params_json).map_err(|e| conversion(5, Box::new(e)))?;
    let result = serde_json::from_str(&result_json).map_err(|e| conversion(6, Box::new(e)))?;
    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion(7, Box::new(e)))?;

    Ok(OrderRecord {
        id,
        file_id,
        profile,
        target: TargetSize { length, height },
        params,
        result,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use glyphquote_core::types::{GlyphLabel, PriceLine};
    use serde_json::json;

    fn sample_order(minute: u32) -> OrderRecord {
        let mut order = OrderRecord::new(
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855".into(),
            "Aluminium Doosletter".into(),
            TargetSize {
                length: 200,
                height: 100,
            },
            json!({ "thickness_pricing": 5, "colors": ["red"] }),
            PricingResult {
                total_price: 104.5,
                prices: vec![PriceLine {
                    letter: GlyphLabel::Ordinal(1),
                    scaled_length: 200,
                    scaled_height: 52,
                    price: 104.5,
                }],
            },
        );
        order.created_at = Utc.with_ymd_and_hms(2026, 3, 1, 12, minute, 0).unwrap();
        order
    }

    #[test]
    fn insert_and_retrieve_order() {
        let ledger = SqliteOrderLedger::open_in_memory().expect("open in-memory db");
        let order = sample_order(0);
        ledger.insert(&order).expect("insert");

        let retrieved = ledger.get(&order.id).expect("get").expect("found");
        assert_eq!(retrieved, order);
    }

    #[test]
    fn missing_order_is_none() {
        let ledger = SqliteOrderLedger::open_in_memory().expect("open in-memory db");
        assert!(ledger.get(&Uuid::new_v4()).expect("get").is_none());
    }

    #[test]
    fn list_is_newest_first() {
        let ledger = SqliteOrderLedger::open_in_memory().expect("open in-memory db");
        let (early, late, middle) = (sample_order(1), sample_order(30), sample_order(15));
        for order in [&early, &late, &middle] {
            ledger.insert(order).expect("insert");
        }

        let ids: Vec<Uuid> = ledger.list().expect("list").iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![late.id, middle.id, early.id]);
    }

    #[test]
    fn delete_removes_and_then_reports_not_found() {
        let ledger = SqliteOrderLedger::open_in_memory().expect("open in-memory db");
        let order = sample_order(0);
        ledger.insert(&order).expect("insert");

        ledger.delete(&order.id).expect("delete");
        assert!(ledger.get(&order.id).expect("get").is_none());
        assert!(matches!(
            ledger.delete(&order.id),
            Err(QuoteError::NotFound(_))
        ));
    }

    #[test]
    fn file_backed_ledger_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("orders.db");
        let order = sample_order(0);
        {
            let ledger = SqliteOrderLedger::open(&path).expect("open");
            ledger.insert(&order).expect("insert");
        }
        let reopened = SqliteOrderLedger::open(&path).expect("reopen");
        assert_eq!(reopened.list().expect("list").len(), 1);
    }
}
