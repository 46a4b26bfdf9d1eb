use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::fmt::{money, pct};
use crate::normalizer::{detect_merchant, detect_pos, normalize_item, SAMPLES};

fn add_row(table: &mut Table, raw: &str, price: Option<f64>) {
    let norm = normalize_item(raw);
    let flavor = if norm.flavor.is_empty() { "—" } else { &norm.flavor };
    table.add_row(vec![
        Cell::new(raw),
        Cell::new(detect_merchant(raw)),
        Cell::new(detect_pos(raw)),
        Cell::new(&norm.name),
        Cell::new(flavor),
        Cell::new(format!("{} oz", norm.size_oz)),
        Cell::new(pct(norm.confidence)),
        Cell::new(price.map(money).unwrap_or_else(|| "—".to_string())),
    ]);
}

pub fn run(raw: Vec<String>) -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec![
        "Raw Description",
        "Merchant",
        "POS",
        "Normalized Item",
        "Flavor",
        "Size",
        "Confidence",
        "Price",
    ]);

    if raw.is_empty() {
        for (sample, price) in SAMPLES {
            add_row(&mut table, sample, Some(*price));
        }
    } else {
        for line in &raw {
            add_row(&mut table, line, None);
        }
    }

    println!("Normalization Across POS Formats\n{table}");
    Ok(())
}
