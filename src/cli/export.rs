use std::path::PathBuf;

use chrono::Local;

use crate::cli::statements::load_rows;
use crate::error::Result;
use crate::settings::get_data_dir;

pub fn run(output: Option<String>) -> Result<()> {
    let conn = super::open_store()?;
    let rows = load_rows(&conn, None)?;

    let path = match output {
        Some(p) => PathBuf::from(p),
        None => {
            let dir = get_data_dir().join("exports");
            std::fs::create_dir_all(&dir)?;
            dir.join(format!(
                "statements-{}.csv",
                Local::now().format("%Y%m%d")
            ))
        }
    };

    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record([
        "date",
        "status",
        "merchant",
        "raw_description",
        "category",
        "amount",
        "confidence",
    ])?;
    for row in &rows {
        writer.write_record([
            row.txn.transaction_date.as_str(),
            if row.pending { "pending" } else { "posted" },
            row.display_merchant.as_str(),
            row.txn.raw_description.as_str(),
            row.txn.merchant_category.as_str(),
            &format!("{:.2}", row.txn.transaction_amount),
            &format!("{:.4}", row.txn.confidence_score),
        ])?;
    }
    writer.flush()?;

    println!("Exported {} rows to {}", rows.len(), path.display());
    Ok(())
}
