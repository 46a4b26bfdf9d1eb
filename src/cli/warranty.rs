use chrono::Local;
use comfy_table::{Cell, Table};

use crate::eligibility;
use crate::error::{ItemiqError, Result};
use crate::models::Warranty;
use crate::store;

pub fn track(id: i64, item: Option<usize>) -> Result<()> {
    let conn = super::open_store()?;
    let txn = store::get_transaction(&conn, id)?;
    let today = Local::now().date_naive();

    let (idx, warranty) =
        eligibility::build_warranty(&txn, item, today).ok_or(ItemiqError::NoItems(id))?;
    store::create_record(&conn, "Warranty", &warranty)?;

    println!("Warranty tracked for item {idx} on transaction {id}:");
    println!("  Item:     {}", warranty.item_name);
    println!("  Provider: {}", warranty.warranty_provider);
    println!("  Coverage: {} months", warranty.warranty_months);
    println!("  Expires:  {}", warranty.warranty_expiry_date);
    Ok(())
}

pub fn list() -> Result<()> {
    let conn = super::open_store()?;
    let warranties: Vec<Warranty> = store::list_records(&conn, "Warranty")?;

    if warranties.is_empty() {
        println!("No tracked warranties.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Item", "Merchant", "Purchased", "Expires", "Status"]);
    for w in &warranties {
        table.add_row(vec![
            Cell::new(&w.item_name),
            Cell::new(&w.merchant),
            Cell::new(&w.purchase_date),
            Cell::new(&w.warranty_expiry_date),
            Cell::new(&w.status),
        ]);
    }
    println!("Tracked Warranties ({})\n{table}", warranties.len());
    Ok(())
}
