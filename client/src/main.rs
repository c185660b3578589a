//! Cadastro - command-line client for the usuarios API.

use cadastro_client::cli::{self, Cli};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Pick up RUST_LOG from a .env file, if any
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    cli::init_tracing(cli.log_level.as_deref());

    cli::run(cli).await
}
