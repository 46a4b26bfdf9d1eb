use chrono::Local;
use comfy_table::{Cell, Table};

use crate::eligibility;
use crate::error::{ItemiqError, Result};
use crate::fmt::money;
use crate::models::ReturnRequest;
use crate::store;

pub fn start(id: i64, item: Option<usize>) -> Result<()> {
    let conn = super::open_store()?;
    let txn = store::get_transaction(&conn, id)?;
    let today = Local::now().date_naive();

    let (idx, request) =
        eligibility::build_return_request(&txn, item, today).ok_or(ItemiqError::NoItems(id))?;
    store::create_record(&conn, "ReturnRequest", &request)?;

    println!("Return started for item {idx} on transaction {id}:");
    println!("  Item:     {}", request.item_name);
    println!("  Merchant: {}", request.merchant);
    println!("  Refund:   {}", money(request.refund_amount));
    println!("  Deadline: {}", request.return_deadline);
    println!("  Method:   {}", request.method);
    Ok(())
}

pub fn list() -> Result<()> {
    let conn = super::open_store()?;
    let requests: Vec<ReturnRequest> = store::list_records(&conn, "ReturnRequest")?;

    if requests.is_empty() {
        println!("No return requests.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Item", "Merchant", "Refund", "Deadline", "Status"]);
    for r in &requests {
        table.add_row(vec![
            Cell::new(&r.item_name),
            Cell::new(&r.merchant),
            Cell::new(money(r.refund_amount)),
            Cell::new(&r.return_deadline),
            Cell::new(&r.status),
        ]);
    }
    println!("Return Requests ({})\n{table}", requests.len());
    Ok(())
}
