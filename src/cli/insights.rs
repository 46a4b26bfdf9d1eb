use chrono::Local;
use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::analytics;
use crate::cli::statements::load_rows;
use crate::error::Result;
use crate::fmt::{money, pct};

const MONTH_LABELS: &[&str] = &[
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn merchants() -> Result<()> {
    let conn = super::open_store()?;
    let rows = load_rows(&conn, None)?;
    let spend = analytics::spend_by_merchant(&rows);

    if spend.is_empty() {
        println!("No merchant spend yet. Run `itemiq seed` to load demo data.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Merchant", "Spend"]);
    for bucket in &spend {
        table.add_row(vec![Cell::new(&bucket.name), Cell::new(money(bucket.total))]);
    }
    println!("Spend by Merchant (top {})\n{table}", spend.len());
    Ok(())
}

pub fn categories() -> Result<()> {
    let conn = super::open_store()?;
    let rows = load_rows(&conn, None)?;
    let spend = analytics::spend_by_category(&rows);

    if spend.is_empty() {
        println!("No category spend yet. Run `itemiq seed` to load demo data.");
        return Ok(());
    }

    let total: f64 = spend.iter().map(|b| b.total).sum();
    let mut table = Table::new();
    table.set_header(vec!["Category", "Spend", "%"]);
    for bucket in &spend {
        let share = if total != 0.0 { bucket.total / total } else { 0.0 };
        table.add_row(vec![
            Cell::new(&bucket.name),
            Cell::new(money(bucket.total)),
            Cell::new(pct(share)),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(money(total)),
        Cell::new(""),
    ]);
    println!("Category Breakdown\n{table}");
    Ok(())
}

pub fn trend() -> Result<()> {
    let conn = super::open_store()?;
    let rows = load_rows(&conn, None)?;
    let today = Local::now().date_naive();
    let months = analytics::monthly_trend(&rows, today);

    let mut table = Table::new();
    table.set_header(vec!["Month", "Spend"]);
    for month in &months {
        table.add_row(vec![
            Cell::new(format!("{} {}", month.label, &month.key[..4])),
            Cell::new(money(month.amount)),
        ]);
    }
    println!("Spend Trend (last 12 months)\n{table}");
    Ok(())
}

pub fn items() -> Result<()> {
    let conn = super::open_store()?;
    let rows = load_rows(&conn, None)?;
    let observations = analytics::all_items(&rows);
    let top = analytics::top_items(&observations);

    if top.is_empty() {
        println!("Not enough itemized data yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Item", "Purchases", "Avg Cost"]);
    for (i, item) in top.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&item.name),
            Cell::new(item.purchases),
            Cell::new(money(item.avg_price)),
        ]);
    }
    println!("Most Purchased Items\n{table}");
    Ok(())
}

pub fn seasonality() -> Result<()> {
    let conn = super::open_store()?;
    let rows = load_rows(&conn, None)?;
    let observations = analytics::all_items(&rows);
    let seasonal = analytics::seasonality(&observations);

    if seasonal.is_empty() {
        println!("Item seasonality needs samples in at least two different months.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Item", "Samples", "Avg Price", "By Month", "Best Month(s)", "Save",
    ]);
    for s in &seasonal {
        let best: Vec<&str> = s
            .best_months
            .iter()
            .map(|m| MONTH_LABELS[(*m as usize - 1) % 12])
            .collect();
        let by_month: Vec<String> = s
            .monthly
            .iter()
            .enumerate()
            .filter_map(|(m, avg)| avg.map(|a| format!("{} {}", MONTH_LABELS[m], money(a))))
            .collect();
        table.add_row(vec![
            Cell::new(&s.name),
            Cell::new(s.samples),
            Cell::new(money(s.avg_price)),
            Cell::new(by_month.join(", ")),
            Cell::new(best.join(", ")),
            Cell::new(format!("{}%", (s.savings_pct * 100.0).round())),
        ]);
    }
    println!("Seasonality — Price by Month\n{table}");
    Ok(())
}

pub fn health() -> Result<()> {
    let conn = super::open_store()?;
    let rows = load_rows(&conn, None)?;
    let observations = analytics::all_items(&rows);
    let metrics = analytics::health_metrics(&observations);

    if metrics.total_spent == 0.0 {
        println!("Not enough itemized data for a health score yet.");
        return Ok(());
    }

    let grade = analytics::health_grade(metrics.score);
    let grade_colored = match grade.chars().next() {
        Some('A') | Some('B') => grade.green().bold(),
        Some('C') => grade.yellow().bold(),
        _ => grade.red().bold(),
    };
    println!("Grocery Health Score: {}% (grade {grade_colored})", metrics.score);

    let mut table = Table::new();
    table.set_header(vec!["Bucket", "Items", "Spend"]);
    table.add_row(vec![
        Cell::new("Healthy".green()),
        Cell::new(metrics.healthy_items),
        Cell::new(money(metrics.healthy_spent)),
    ]);
    table.add_row(vec![
        Cell::new("Neutral"),
        Cell::new(metrics.neutral_items),
        Cell::new(money(metrics.neutral_spent)),
    ]);
    table.add_row(vec![
        Cell::new("Unhealthy".red()),
        Cell::new(metrics.unhealthy_items),
        Cell::new(money(metrics.unhealthy_spent)),
    ]);
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(metrics.healthy_items + metrics.neutral_items + metrics.unhealthy_items),
        Cell::new(money(metrics.total_spent)),
    ]);
    println!("{table}");
    Ok(())
}
