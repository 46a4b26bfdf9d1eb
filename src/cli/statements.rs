use colored::Colorize;
use comfy_table::{Cell, Table};
use rusqlite::Connection;

use crate::analytics::{self, StatementRow};
use crate::error::Result;
use crate::fmt::money;
use crate::store;

/// The activity list works over at most 150 recent rows, like the statement
/// viewer it mirrors.
const LOAD_LIMIT: usize = 150;

pub fn load_rows(conn: &Connection, query: Option<&str>) -> Result<Vec<StatementRow>> {
    let txns = store::list_transactions(conn, "-created_date", Some(LOAD_LIMIT))?;
    let filtered: Vec<_> = match query {
        Some(q) => txns
            .into_iter()
            .filter(|t| analytics::matches_query(t, q))
            .collect(),
        None => txns,
    };
    Ok(analytics::statement_rows(&filtered))
}

pub fn run(query: Option<String>, limit: usize) -> Result<()> {
    let conn = super::open_store()?;
    let rows = load_rows(&conn, query.as_deref())?;

    if rows.is_empty() {
        println!("No transactions found.");
        return Ok(());
    }

    let metrics = analytics::statement_metrics(&rows);
    println!(
        "Pending Charges: {}   Posted Charges: {}   Total Balance: {}",
        money(metrics.pending_amount).yellow(),
        money(metrics.posted_amount),
        money(metrics.total_balance).bold()
    );

    let mut table = Table::new();
    table.set_header(vec![
        "ID", "Date", "Status", "Merchant", "Description", "Amount", "Items",
    ]);
    for row in rows.iter().take(limit) {
        let status = if row.pending {
            "Pending".yellow().to_string()
        } else {
            "Posted".green().to_string()
        };
        let merchant = if row.txn.fraud_flagged && row.txn.fraud_risk_score >= 0.5 {
            format!("{} {}", row.display_merchant, "[fraud]".red())
        } else {
            row.display_merchant.clone()
        };
        let date: String = if row.txn.transaction_date.is_empty() {
            row.txn.created_date.chars().take(10).collect()
        } else {
            row.txn.transaction_date.clone()
        };
        table.add_row(vec![
            Cell::new(row.txn.id.unwrap_or_default()),
            Cell::new(date),
            Cell::new(status),
            Cell::new(merchant),
            Cell::new(&row.txn.raw_description),
            Cell::new(money(row.txn.transaction_amount)),
            Cell::new(row.txn.items.len()),
        ]);
    }
    println!(
        "\nActivity ({} of {} rows)\n{table}",
        rows.len().min(limit),
        rows.len()
    );
    Ok(())
}
