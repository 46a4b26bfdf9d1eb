use chrono::Local;

use crate::error::Result;
use crate::seeder;

pub fn run() -> Result<()> {
    let conn = super::open_store()?;
    let today = Local::now().date_naive();
    let summary = seeder::run(&conn, today)?;

    if summary.skipped {
        println!("Demo data already loaded.");
        return Ok(());
    }

    println!("Demo data loaded!");
    println!("  Variety merchants:   {}", summary.variety);
    println!("  Monthly groceries:   {}", summary.monthlies);
    println!("  Featured purchases:  {}", summary.featured);
    if summary.sanitized > 0 {
        println!("  Fraud flags cleared: {}", summary.sanitized);
    }
    println!();
    println!("Try these next:");
    println!("  itemiq statements");
    println!("  itemiq insights merchants");
    println!("  itemiq insights seasonality");
    println!("  itemiq insights health");
    Ok(())
}
