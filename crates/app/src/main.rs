//! Roomkeeper Application CLI

use std::process;

use clap::Parser;

mod cli;

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    if let Err(error) = cli::Cli::parse().run().await {
        eprintln!("{error}");
        process::exit(1);
    }
}
