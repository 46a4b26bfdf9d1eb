use std::collections::HashSet;
use std::path::Path;

use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ItemiqError, Result};
use crate::models::{Item, Location, Transaction, TransactionPatch};

/// Collections served by the generic record store, next to `transactions`.
pub const COLLECTIONS: &[&str] = &[
    "Warranty",
    "ReturnRequest",
    "Waitlist",
    "MerchantProfile",
    "CorporateExpense",
];

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS transactions (
    id INTEGER PRIMARY KEY,
    raw_description TEXT NOT NULL,
    normalized_merchant TEXT NOT NULL DEFAULT '',
    merchant_category TEXT NOT NULL DEFAULT 'other',
    transaction_amount REAL NOT NULL DEFAULT 0,
    transaction_date TEXT NOT NULL,
    pos_format TEXT NOT NULL DEFAULT '',
    confidence_score REAL NOT NULL DEFAULT 0,
    items TEXT NOT NULL DEFAULT '[]',
    location TEXT NOT NULL DEFAULT '{}',
    fraud_risk_score REAL NOT NULL DEFAULT 0,
    fraud_flagged INTEGER NOT NULL DEFAULT 0,
    processing_time_ms INTEGER NOT NULL DEFAULT 0,
    status TEXT NOT NULL DEFAULT 'processed',
    created_date TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS records (
    id INTEGER PRIMARY KEY,
    collection TEXT NOT NULL,
    data TEXT NOT NULL,
    created_date TEXT DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_records_collection ON records(collection);

CREATE TABLE IF NOT EXISTS flags (
    name TEXT PRIMARY KEY,
    set_at TEXT DEFAULT (datetime('now'))
);
";

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_store(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

/// Translate an SDK-style sort spec ("-created_date" = newest first) into an
/// ORDER BY clause. Unknown keys fall back to creation order.
fn sort_clause(sort: &str) -> String {
    let (key, dir) = match sort.strip_prefix('-') {
        Some(rest) => (rest, "DESC"),
        None => (sort, "ASC"),
    };
    let column = match key {
        "created_date" => "created_date",
        "transaction_date" => "transaction_date",
        "transaction_amount" => "transaction_amount",
        _ => "created_date",
    };
    format!("ORDER BY {column} {dir}, id {dir}")
}

fn row_to_transaction(row: &rusqlite::Row<'_>) -> rusqlite::Result<Transaction> {
    let items_json: String = row.get("items")?;
    let location_json: String = row.get("location")?;
    Ok(Transaction {
        id: Some(row.get("id")?),
        raw_description: row.get("raw_description")?,
        normalized_merchant: row.get("normalized_merchant")?,
        merchant_category: row.get("merchant_category")?,
        transaction_amount: row.get("transaction_amount")?,
        transaction_date: row.get("transaction_date")?,
        pos_format: row.get("pos_format")?,
        confidence_score: row.get("confidence_score")?,
        items: serde_json::from_str::<Vec<Item>>(&items_json).unwrap_or_default(),
        location: serde_json::from_str::<Location>(&location_json).unwrap_or_default(),
        fraud_risk_score: row.get("fraud_risk_score")?,
        fraud_flagged: row.get("fraud_flagged")?,
        processing_time_ms: row.get("processing_time_ms")?,
        status: row.get("status")?,
        created_date: row.get::<_, Option<String>>("created_date")?.unwrap_or_default(),
    })
}

pub fn list_transactions(
    conn: &Connection,
    sort: &str,
    limit: Option<usize>,
) -> Result<Vec<Transaction>> {
    let limit_clause = match limit {
        Some(n) => format!(" LIMIT {n}"),
        None => String::new(),
    };
    let sql = format!(
        "SELECT * FROM transactions {}{limit_clause}",
        sort_clause(sort)
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], row_to_transaction)?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

pub fn get_transaction(conn: &Connection, id: i64) -> Result<Transaction> {
    let mut stmt = conn.prepare("SELECT * FROM transactions WHERE id = ?1")?;
    let mut rows = stmt.query_map([id], row_to_transaction)?;
    match rows.next() {
        Some(row) => Ok(row?),
        None => Err(ItemiqError::UnknownTransaction(id)),
    }
}

pub fn create_transaction(conn: &Connection, txn: &Transaction) -> Result<i64> {
    let items = serde_json::to_string(&txn.items)?;
    let location = serde_json::to_string(&txn.location)?;
    conn.execute(
        "INSERT INTO transactions (raw_description, normalized_merchant, merchant_category, \
         transaction_amount, transaction_date, pos_format, confidence_score, items, location, \
         fraud_risk_score, fraud_flagged, processing_time_ms, status) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        rusqlite::params![
            txn.raw_description,
            txn.normalized_merchant,
            txn.merchant_category,
            txn.transaction_amount,
            txn.transaction_date,
            txn.pos_format,
            txn.confidence_score,
            items,
            location,
            txn.fraud_risk_score,
            txn.fraud_flagged,
            txn.processing_time_ms,
            txn.status,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn bulk_create_transactions(conn: &Connection, txns: &[Transaction]) -> Result<usize> {
    for txn in txns {
        create_transaction(conn, txn)?;
    }
    Ok(txns.len())
}

/// Partial update, mirroring the SDK's `update(id, patch)`.
pub fn update_transaction(conn: &Connection, id: i64, patch: &TransactionPatch) -> Result<()> {
    get_transaction(conn, id)?;
    if let Some(flagged) = patch.fraud_flagged {
        conn.execute(
            "UPDATE transactions SET fraud_flagged = ?1 WHERE id = ?2",
            rusqlite::params![flagged, id],
        )?;
    }
    if let Some(risk) = patch.fraud_risk_score {
        conn.execute(
            "UPDATE transactions SET fraud_risk_score = ?1 WHERE id = ?2",
            rusqlite::params![risk, id],
        )?;
    }
    Ok(())
}

pub fn count_transactions(conn: &Connection) -> Result<i64> {
    Ok(conn.query_row("SELECT count(*) FROM transactions", [], |r| r.get(0))?)
}

/// Lowercased normalized merchant names currently in the store.
pub fn unique_merchants(conn: &Connection) -> Result<HashSet<String>> {
    let mut stmt =
        conn.prepare("SELECT DISTINCT lower(normalized_merchant) FROM transactions")?;
    let rows = stmt.query_map([], |r| r.get::<_, String>(0))?;
    Ok(rows.collect::<std::result::Result<HashSet<_>, _>>()?)
}

// ---------------------------------------------------------------------------
// Generic records (Warranty, ReturnRequest, Waitlist, ...)
// ---------------------------------------------------------------------------

pub fn create_record<T: Serialize>(conn: &Connection, collection: &str, record: &T) -> Result<i64> {
    let data = serde_json::to_string(record)?;
    conn.execute(
        "INSERT INTO records (collection, data) VALUES (?1, ?2)",
        rusqlite::params![collection, data],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_records<T: DeserializeOwned>(conn: &Connection, collection: &str) -> Result<Vec<T>> {
    let mut stmt = conn.prepare(
        "SELECT data FROM records WHERE collection = ?1 ORDER BY created_date DESC, id DESC",
    )?;
    let rows = stmt.query_map([collection], |r| r.get::<_, String>(0))?;
    let mut out = Vec::new();
    for data in rows {
        // Rows that no longer deserialize are skipped, not fatal.
        if let Ok(record) = serde_json::from_str(&data?) {
            out.push(record);
        }
    }
    Ok(out)
}

pub fn count_records(conn: &Connection, collection: &str) -> Result<i64> {
    Ok(conn.query_row(
        "SELECT count(*) FROM records WHERE collection = ?1",
        [collection],
        |r| r.get(0),
    )?)
}

// ---------------------------------------------------------------------------
// Flags (the CLI's stand-in for browser session storage)
// ---------------------------------------------------------------------------

pub fn has_flag(conn: &Connection, name: &str) -> Result<bool> {
    Ok(conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM flags WHERE name = ?1)",
        [name],
        |r| r.get(0),
    )?)
}

pub fn set_flag(conn: &Connection, name: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO flags (name) VALUES (?1) ON CONFLICT(name) DO NOTHING",
        [name],
    )?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn test_store() -> (tempfile::TempDir, Connection) {
    let dir = tempfile::tempdir().unwrap();
    let conn = get_connection(&dir.path().join("test.db")).unwrap();
    init_store(&conn).unwrap();
    (dir, conn)
}
