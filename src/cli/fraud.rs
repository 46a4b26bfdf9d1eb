use colored::Colorize;

use crate::analytics::display_merchant;
use crate::error::Result;
use crate::fmt::pct;
use crate::models::TransactionPatch;
use crate::store;

pub fn flag(id: i64) -> Result<()> {
    let conn = super::open_store()?;
    let txn = store::get_transaction(&conn, id)?;
    let risk = txn.fraud_risk_score.max(0.88);
    store::update_transaction(
        &conn,
        id,
        &TransactionPatch {
            fraud_flagged: Some(true),
            fraud_risk_score: Some(risk),
        },
    )?;
    println!(
        "{} transaction {id} ({}) flagged as fraud, risk {}",
        "!".red().bold(),
        display_merchant(&txn),
        pct(risk)
    );
    Ok(())
}

pub fn unflag(id: i64) -> Result<()> {
    let conn = super::open_store()?;
    let txn = store::get_transaction(&conn, id)?;
    store::update_transaction(
        &conn,
        id,
        &TransactionPatch {
            fraud_flagged: Some(false),
            fraud_risk_score: Some(0.0),
        },
    )?;
    println!(
        "Transaction {id} ({}) marked not fraud.",
        display_merchant(&txn)
    );
    Ok(())
}
