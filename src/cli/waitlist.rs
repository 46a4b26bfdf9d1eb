use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::models::WaitlistEntry;
use crate::store;

pub fn join(email: String) -> Result<()> {
    let conn = super::open_store()?;
    let entry = WaitlistEntry {
        email: email.trim().to_string(),
        source: "cli".to_string(),
        status: "pending".to_string(),
    };
    // Signup failures are logged and swallowed; the caller just never sees
    // the success message.
    match store::create_record(&conn, "Waitlist", &entry) {
        Ok(_) => {
            println!("You're on the list! We'll be in touch soon with updates on ItemIQ.");
        }
        Err(e) => {
            eprintln!("warning: failed to save waitlist signup: {e}");
        }
    }
    Ok(())
}

pub fn list() -> Result<()> {
    let conn = super::open_store()?;
    let entries: Vec<WaitlistEntry> = store::list_records(&conn, "Waitlist")?;

    if entries.is_empty() {
        println!("No waitlist signups yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Email", "Source", "Status"]);
    for entry in &entries {
        table.add_row(vec![
            Cell::new(&entry.email),
            Cell::new(&entry.source),
            Cell::new(&entry.status),
        ]);
    }
    println!("Waitlist ({})\n{table}", entries.len());
    Ok(())
}
