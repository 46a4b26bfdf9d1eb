use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::survey::{CARD_IMPACT, FIELDED, INTEREST_LEVELS, KEY_METRICS, RESPONDENTS, USE_CASES};

fn slice_table(title: &str, slices: &[crate::survey::SurveySlice]) {
    let mut table = Table::new();
    table.set_header(vec!["Answer", "%"]);
    for s in slices {
        table.add_row(vec![Cell::new(s.label), Cell::new(format!("{}%", s.pct))]);
    }
    println!("\n{title}\n{table}");
}

pub fn run() -> Result<()> {
    println!("Consumer Survey Insights");
    println!("Highlights from {RESPONDENTS} affluent US consumers ({FIELDED}).");

    let mut metrics = Table::new();
    metrics.set_header(vec!["Metric", "Value", "Note"]);
    for m in KEY_METRICS {
        metrics.add_row(vec![Cell::new(m.label), Cell::new(m.value), Cell::new(m.note)]);
    }
    println!("\nKey Metrics\n{metrics}");

    slice_table("Interest Level Distribution", INTEREST_LEVELS);
    slice_table("Use Cases (multi-select)", USE_CASES);
    slice_table("Card Choice Impact", CARD_IMPACT);
    Ok(())
}
