//! gore-cli
//!
//! Reads a disk image, runs the rosette pipeline and writes the result.

use clap::Parser;

use gore_cli::{init_tracing, run, Args};

fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.json_logs);

    if let Err(e) = run(&args) {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}
