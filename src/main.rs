use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bank_accounts::{
    apply_batch, init_logging, load_instructions, BatchSummary, CheckingAccount, Currency,
    LogConfig, Owner, SharedAccount, DEFAULT_ACCOUNT_NUMBER, DEFAULT_OVERDRAFT_LIMIT,
};

#[derive(Parser)]
#[command(name = "bank-accounts", version, about = "Checking accounts with overdraft limit")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay the overdraft / lock / currency walkthrough on a default account
    Demo,

    /// Apply a CSV batch of transfer instructions to a fresh checking account
    Apply {
        /// CSV file with a header line
        csv: PathBuf,

        #[arg(long, default_value_t = DEFAULT_ACCOUNT_NUMBER)]
        number: u64,

        #[arg(long, default_value_t = DEFAULT_OVERDRAFT_LIMIT)]
        overdraft_limit: f64,

        /// Account currency (EUR, BGN, BAM, LTL)
        #[arg(long, default_value = "EUR")]
        currency: Currency,

        #[arg(long, default_value = "Jane")]
        first_name: String,

        #[arg(long, default_value = "Doe")]
        last_name: String,

        /// Print bookings as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    init_logging(LogConfig::from_env())?;

    let cli = Cli::parse();
    match cli.command {
        Command::Demo => run_demo(),
        Command::Apply {
            csv,
            number,
            overdraft_limit,
            currency,
            first_name,
            last_name,
            json,
        } => {
            let owner = Arc::new(Owner::new(first_name, last_name)?);
            let mut account = CheckingAccount::new(owner, number, overdraft_limit)?;
            account.change_currency(currency)?;
            // The limit was given in the target currency, not in EUR
            account.set_overdraft_limit(overdraft_limit)?;
            run_apply(SharedAccount::new(account), &csv, json)
        }
    }
}

fn run_demo() -> Result<()> {
    let account = SharedAccount::new(CheckingAccount::default());
    println!("{}", account.describe());

    let paid = account.debit(500.0, "Acme", 123, 456, "invoice")?;
    println!("debit 500.00 -> {} (balance {:.2})", paid, account.balance());

    let paid = account.debit(1.0, "Acme", 123, 456, "invoice")?;
    println!("debit 1.00   -> {} (balance {:.2})", paid, account.balance());

    account.lock();
    match account.debit(1.0, "Acme", 123, 456, "x") {
        Ok(paid) => println!("debit 1.00   -> {}", paid),
        Err(err) => println!("debit 1.00   -> {}", err),
    }

    account.credit(50.0, "Acme", 123, 456, "x")?;
    println!("credit 50.00 -> ok (balance {:.2}, still locked)", account.balance());

    account.unlock();
    account.change_currency(Currency::Bgn)?;
    println!();
    println!("{}", account.describe());

    Ok(())
}

fn run_apply(account: SharedAccount, csv: &Path, json: bool) -> Result<()> {
    let instructions = load_instructions(csv)?;
    let bookings = apply_batch(&account, &instructions);

    if json {
        let output = serde_json::to_string_pretty(&bookings)
            .context("Failed to serialize bookings")?;
        println!("{}", output);
        return Ok(());
    }

    for booking in &bookings {
        println!(
            "{} {:>6} {:>12.2} {:<24} {:<20} balance {:.2}",
            booking.booked_at.format("%Y-%m-%d %H:%M:%S"),
            format!("{:?}", booking.instruction.direction).to_lowercase(),
            booking.instruction.amount,
            booking.instruction.reference,
            booking.outcome.to_string(),
            booking.balance_after,
        );
    }

    let summary = BatchSummary::from_bookings(&bookings);
    println!();
    println!(
        "{} instructions: {} booked, {} insufficient funds, {} rejected",
        summary.total(),
        summary.booked,
        summary.insufficient_funds,
        summary.rejected
    );
    println!();
    println!("{}", account.describe());

    Ok(())
}
