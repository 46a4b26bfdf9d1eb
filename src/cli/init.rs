use std::path::PathBuf;

use crate::error::Result;
use crate::settings::{load_settings, save_settings, shellexpand_path};
use crate::store;

pub fn run(data_dir: Option<String>) -> Result<()> {
    let mut settings = load_settings();
    if let Some(dir) = data_dir {
        settings.data_dir = shellexpand_path(&dir);
    }
    save_settings(&settings)?;

    let resolved = PathBuf::from(&settings.data_dir);
    std::fs::create_dir_all(&resolved)?;
    std::fs::create_dir_all(resolved.join("exports"))?;

    let conn = store::get_connection(&resolved.join("itemiq.db"))?;
    store::init_store(&conn)?;

    println!("Initialized itemiq at {}", resolved.display());
    println!();
    println!("Try these next:");
    println!("  itemiq seed");
    println!("  itemiq statements");
    println!("  itemiq insights merchants");
    println!("  itemiq process --sample 2");
    Ok(())
}
