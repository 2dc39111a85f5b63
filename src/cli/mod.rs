//! Command line interface.

pub mod command;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Contains the commands
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download observations for every station in the given states
    Fetch(FetchArgs),
    /// List the stations the metadata service reports for the given states
    Stations(StationsArgs),
}

#[derive(Args)]
pub struct FetchArgs {
    /// Two-letter state codes, e.g. "CO" or "CO IA"
    pub states: String,

    /// Start of the window as "year month day [hour]"; prompted for if absent
    #[arg(long)]
    pub start: Option<String>,

    /// End of the window in the same form; defaults to the start date
    #[arg(long)]
    pub end: Option<String>,

    /// Read stations from a file (one per line) instead of the metadata service
    #[arg(long)]
    pub stations_file: Option<PathBuf>,

    /// Directory the per-station files are written to; must already exist
    #[arg(long, default_value = "data")]
    pub out_dir: PathBuf,
}

#[derive(Args)]
pub struct StationsArgs {
    /// Two-letter state codes, e.g. "CO" or "CO IA"
    pub states: String,
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}

/// Creates a progress bar.
pub fn create_progress_bar(size: u64, message: String) -> ProgressBar {
    ProgressBar::new(size).with_message(message).with_style(
        ProgressStyle::with_template("[{eta_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("##-"),
    )
}
