//! # Checkout Entry Point
//!
//! ```text
//! checkout [--config checkout.toml] [--input input.json]
//!          [--output output.json] [--db db.json]
//! ```
//!
//! Exit status is 0 whenever a result file was written, including
//! `{result:false}` outcomes. It is 1 when configuration, input, or output
//! handling failed.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use checkout_cli::RunOptions;

#[derive(Debug, Parser)]
#[command(name = "checkout")]
#[command(about = "Runs one cart command from a JSON file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Command file to read
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Result file to write
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Cart snapshot file
    #[arg(long)]
    db: Option<PathBuf>,
}

impl From<Args> for RunOptions {
    fn from(args: Args) -> Self {
        RunOptions {
            config: args.config,
            input: args.input,
            output: args.output,
            db: args.db,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    checkout_cli::init_tracing();

    match checkout_cli::run(args.into()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
