use crate::error::Result;
use crate::fmt::format_bytes;
use crate::settings::load_settings;
use crate::store;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let data_dir = std::path::PathBuf::from(&settings.data_dir);
    let db_path = data_dir.join("itemiq.db");

    println!("Data dir:   {}", data_dir.display());
    println!("Store:      {}", db_path.display());

    if !db_path.exists() {
        println!();
        println!("Store not found. Run `itemiq init` to set up.");
        return Ok(());
    }

    let size = std::fs::metadata(&db_path)?.len();
    println!("Store size: {}", format_bytes(size));

    let conn = store::get_connection(&db_path)?;
    store::init_store(&conn)?;

    let transactions = store::count_transactions(&conn)?;
    let flagged: i64 = conn.query_row(
        "SELECT count(*) FROM transactions WHERE fraud_flagged = 1",
        [],
        |r| r.get(0),
    )?;

    println!();
    println!("Transactions:  {transactions}");
    println!("Fraud flagged: {flagged}");
    for collection in store::COLLECTIONS {
        let count = store::count_records(&conn, collection)?;
        println!("{:<14} {count}", format!("{collection}:"));
    }
    Ok(())
}
