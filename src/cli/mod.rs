pub mod expense;
pub mod export;
pub mod fraud;
pub mod init;
pub mod insights;
pub mod normalize;
pub mod process;
pub mod returns;
pub mod seed;
pub mod statements;
pub mod status;
pub mod survey;
pub mod waitlist;
pub mod warranty;

use clap::{Parser, Subcommand};
use rusqlite::Connection;

use crate::error::{ItemiqError, Result};
use crate::settings;
use crate::store;

/// Open the entity store, refusing politely when `init` has not run yet.
pub(crate) fn open_store() -> Result<Connection> {
    let path = settings::db_path();
    if !path.exists() {
        return Err(ItemiqError::Other(
            "No store found. Run `itemiq init` first.".to_string(),
        ));
    }
    let conn = store::get_connection(&path)?;
    store::init_store(&conn)?;
    Ok(conn)
}

#[derive(Parser)]
#[command(name = "itemiq", about = "Transaction enrichment and statement-intelligence CLI.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up ItemIQ: choose a data directory and initialize the store.
    Init {
        /// Path for ItemIQ data (default: ~/Documents/itemiq)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Run the enrichment pipeline over a raw POS description.
    Process {
        /// Raw description, e.g. "WHOLEFDS #10217 AUSTIN TX"
        raw: Option<String>,
        /// Use a built-in sample by number instead
        #[arg(long)]
        sample: Option<usize>,
        /// Persist the enriched transaction to the store
        #[arg(long)]
        save: bool,
        /// Skip the pipeline step delays
        #[arg(long = "no-delay")]
        no_delay: bool,
    },
    /// Normalize raw statement lines across POS formats.
    Normalize {
        /// Lines to normalize (defaults to the built-in samples)
        raw: Vec<String>,
    },
    /// Seed demo transactions: variety pool, monthly groceries, featured merchants.
    Seed,
    /// Statement activity: newest first, deduplicated, with pending/posted totals.
    Statements {
        /// Filter by merchant, description, or item name
        #[arg(long)]
        query: Option<String>,
        /// Maximum rows to display
        #[arg(long, default_value = "40")]
        limit: usize,
    },
    /// Spending insights computed over the statement rows.
    Insights {
        #[command(subcommand)]
        command: InsightsCommands,
    },
    /// Flag or clear fraud on a transaction.
    Fraud {
        #[command(subcommand)]
        command: FraudCommands,
    },
    /// Start and list return requests.
    Returns {
        #[command(subcommand)]
        command: ReturnsCommands,
    },
    /// Track and list item warranties.
    Warranty {
        #[command(subcommand)]
        command: WarrantyCommands,
    },
    /// Join or inspect the waitlist.
    Waitlist {
        #[command(subcommand)]
        command: WaitlistCommands,
    },
    /// Record and list corporate expenses.
    Expense {
        #[command(subcommand)]
        command: ExpenseCommands,
    },
    /// Export statement rows to CSV.
    Export {
        /// Output file path (default: <data_dir>/exports/statements-YYYYMMDD.csv)
        #[arg(long)]
        output: Option<String>,
    },
    /// Consumer survey results dashboard.
    Survey,
    /// Show current store and summary statistics.
    Status,
}

#[derive(Subcommand)]
pub enum InsightsCommands {
    /// Spend by merchant, top 10.
    Merchants,
    /// Spend by category.
    Categories,
    /// 12-month spend trend.
    Trend,
    /// Most purchased items with average cost.
    Items,
    /// Per-item price seasonality with best-month detection.
    Seasonality,
    /// Grocery health score.
    Health,
}

#[derive(Subcommand)]
pub enum FraudCommands {
    /// Flag a transaction as fraud.
    Flag {
        /// Transaction ID (shown in `itemiq statements`)
        id: i64,
    },
    /// Mark a transaction as not fraud.
    Unflag {
        /// Transaction ID (shown in `itemiq statements`)
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum ReturnsCommands {
    /// Start a return for an item on a transaction.
    Start {
        /// Transaction ID
        id: i64,
        /// Item index within the transaction (default: first eligible)
        #[arg(long)]
        item: Option<usize>,
    },
    /// List return requests.
    List,
}

#[derive(Subcommand)]
pub enum WarrantyCommands {
    /// Track warranty coverage for an item on a transaction.
    Track {
        /// Transaction ID
        id: i64,
        /// Item index within the transaction (default: first eligible)
        #[arg(long)]
        item: Option<usize>,
    },
    /// List tracked warranties.
    List,
}

#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a corporate expense.
    Add {
        /// What the expense was for
        description: String,
        /// Amount in dollars
        amount: f64,
        /// Expense category (default: general)
        #[arg(long)]
        category: Option<String>,
        /// Expense date: YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// List recorded expenses.
    List,
}

#[derive(Subcommand)]
pub enum WaitlistCommands {
    /// Join the waitlist.
    Join {
        /// Email address
        email: String,
    },
    /// List waitlist signups.
    List,
}
