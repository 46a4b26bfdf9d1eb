use std::io::Write;

use chrono::Local;
use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::error::{ItemiqError, Result};
use crate::fmt::{money, pct};
use crate::processor::{self, SAMPLE_DESCRIPTIONS, STEPS};
use crate::store;

pub fn run(raw: Option<String>, sample: Option<usize>, save: bool, no_delay: bool) -> Result<()> {
    let raw = match (raw, sample) {
        (Some(r), _) => r,
        (None, Some(n)) => SAMPLE_DESCRIPTIONS
            .get(n.wrapping_sub(1))
            .map(|s| s.to_string())
            .ok_or_else(|| {
                ItemiqError::Other(format!(
                    "Sample {n} does not exist (1-{})",
                    SAMPLE_DESCRIPTIONS.len()
                ))
            })?,
        (None, None) => {
            println!("Provide a raw description, or pick a sample with --sample:");
            for (i, s) in SAMPLE_DESCRIPTIONS.iter().enumerate() {
                println!("  {}. {s}", i + 1);
            }
            return Ok(());
        }
    };

    println!("Processing: {}", raw.bold());
    println!();
    for step in STEPS {
        print!("  {:<22} {}", step.name, step.description.dimmed());
        std::io::stdout().flush()?;
        if !no_delay {
            std::thread::sleep(std::time::Duration::from_millis(step.duration_ms));
        }
        println!("  {}", "done".green());
    }
    println!();

    let today = Local::now().date_naive();
    let txn = processor::enrich(&raw, today);

    println!("Merchant:        {}", txn.normalized_merchant.bold());
    println!("Category:        {}", txn.merchant_category);
    println!("POS format:      {}", txn.pos_format);
    println!("Date:            {}", txn.transaction_date);
    println!("Amount:          {}", money(txn.transaction_amount).bold());
    println!("Confidence:      {}", pct(txn.confidence_score));
    println!("Fraud risk:      {}", pct(txn.fraud_risk_score));
    println!("Processing time: {} ms", txn.processing_time_ms);

    let mut table = Table::new();
    table.set_header(vec!["Item", "Category", "Qty", "Unit", "Total"]);
    for item in &txn.items {
        table.add_row(vec![
            Cell::new(&item.name),
            Cell::new(&item.category),
            Cell::new(item.quantity),
            Cell::new(money(item.unit_price)),
            Cell::new(money(item.total_price)),
        ]);
    }
    println!("\nItemized Breakdown\n{table}");

    if save {
        let conn = super::open_store()?;
        let id = store::create_transaction(&conn, &txn)?;
        println!("\nSaved as transaction {id}.");
    }

    Ok(())
}
