mod cli;
mod download;
mod request;
mod stations;

use anyhow::{Error, Result};
use clap::Parser;
use cli::{command, Cli, Commands};
use download::ServiceConfig;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    let config = ServiceConfig::default();

    match &cli.command {
        Commands::Fetch(args) => match command::fetch(args, &config).await {
            Ok(count) => println!(
                "\nAll done. {} station files written to `{}`",
                count,
                args.out_dir.display()
            ),
            Err(e) => eprintln!("Error: {}", e),
        },
        Commands::Stations(args) => match command::stations(args, &config).await {
            Ok(count) => println!("{} stations", count),
            Err(e) => eprintln!("Error: {}", e),
        },
    }

    Ok(())
}
