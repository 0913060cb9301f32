//! `insight` command-line entry point.

use clap::Parser;
use insight_rs::{Cli, init_logging, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    run(Cli::parse()).await
}
