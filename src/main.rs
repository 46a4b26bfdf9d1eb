mod analytics;
mod cli;
mod eligibility;
mod error;
mod fmt;
mod models;
mod normalizer;
mod pricing;
mod processor;
mod seeder;
mod settings;
mod store;
mod survey;

use clap::Parser;

use cli::{
    Cli, Commands, ExpenseCommands, FraudCommands, InsightsCommands, ReturnsCommands,
    WaitlistCommands, WarrantyCommands,
};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Process {
            raw,
            sample,
            save,
            no_delay,
        } => cli::process::run(raw, sample, save, no_delay),
        Commands::Normalize { raw } => cli::normalize::run(raw),
        Commands::Seed => cli::seed::run(),
        Commands::Statements { query, limit } => cli::statements::run(query, limit),
        Commands::Insights { command } => match command {
            InsightsCommands::Merchants => cli::insights::merchants(),
            InsightsCommands::Categories => cli::insights::categories(),
            InsightsCommands::Trend => cli::insights::trend(),
            InsightsCommands::Items => cli::insights::items(),
            InsightsCommands::Seasonality => cli::insights::seasonality(),
            InsightsCommands::Health => cli::insights::health(),
        },
        Commands::Fraud { command } => match command {
            FraudCommands::Flag { id } => cli::fraud::flag(id),
            FraudCommands::Unflag { id } => cli::fraud::unflag(id),
        },
        Commands::Returns { command } => match command {
            ReturnsCommands::Start { id, item } => cli::returns::start(id, item),
            ReturnsCommands::List => cli::returns::list(),
        },
        Commands::Warranty { command } => match command {
            WarrantyCommands::Track { id, item } => cli::warranty::track(id, item),
            WarrantyCommands::List => cli::warranty::list(),
        },
        Commands::Waitlist { command } => match command {
            WaitlistCommands::Join { email } => cli::waitlist::join(email),
            WaitlistCommands::List => cli::waitlist::list(),
        },
        Commands::Expense { command } => match command {
            ExpenseCommands::Add {
                description,
                amount,
                category,
                date,
            } => cli::expense::add(description, amount, category, date),
            ExpenseCommands::List => cli::expense::list(),
        },
        Commands::Export { output } => cli::export::run(output),
        Commands::Survey => cli::survey::run(),
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
