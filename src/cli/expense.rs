use chrono::Local;
use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::fmt::money;
use crate::models::CorporateExpense;
use crate::store;

pub fn add(description: String, amount: f64, category: Option<String>, date: Option<String>) -> Result<()> {
    let conn = super::open_store()?;
    let expense = CorporateExpense {
        description,
        amount,
        expense_date: date.unwrap_or_else(|| Local::now().date_naive().format("%Y-%m-%d").to_string()),
        category: category.unwrap_or_else(|| "general".to_string()),
        status: "submitted".to_string(),
    };
    store::create_record(&conn, "CorporateExpense", &expense)?;
    println!(
        "Expense recorded: {} ({}) on {}",
        expense.description,
        money(expense.amount),
        expense.expense_date
    );
    Ok(())
}

pub fn list() -> Result<()> {
    let conn = super::open_store()?;
    let expenses: Vec<CorporateExpense> = store::list_records(&conn, "CorporateExpense")?;

    if expenses.is_empty() {
        println!("No corporate expenses recorded.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Date", "Description", "Category", "Amount", "Status"]);
    for e in &expenses {
        table.add_row(vec![
            Cell::new(&e.expense_date),
            Cell::new(&e.description),
            Cell::new(&e.category),
            Cell::new(money(e.amount)),
            Cell::new(&e.status),
        ]);
    }
    println!("Corporate Expenses ({})\n{table}", expenses.len());
    Ok(())
}
