use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use process::models::ReportFilter;
use records::DataFiles;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Directory holding users.json, products.json and sales.json.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Append products from a JSON list, skipping known SKUs.
    Import { file: PathBuf },

    /// Finish a sale interrupted mid-commit.
    Recover,

    /// Summarize recorded sales.
    Report {
        #[arg(long)]
        cashier: Option<String>,

        #[arg(long)]
        days: Option<i64>,
    },

    /// Make sure the default admin account exists.
    Seed {
        #[arg(long, default_value = "password")]
        password: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let files = DataFiles::new(args.data_dir);

    match args.command {
        Command::Import { file } => {
            process::import_products(&files, &file)?;
        }
        Command::Recover => {
            process::recover(&files)?;
        }
        Command::Report { cashier, days } => {
            process::report(&files, &ReportFilter { cashier, days })?;
        }
        Command::Seed { password } => {
            process::seed(&files, &password)?;
        }
    }

    Ok(())
}
