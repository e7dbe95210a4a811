//! adbsweep - interactive Android debloater
//!
//! Lists the packages installed on a connected device, enriches them with
//! Play Store metadata, offers a fuzzy-searchable multi-select, and
//! uninstalls the chosen packages after an explicit typed confirmation.
//! Exits 0 only when every selected package was removed.

use clap::Parser;

mod adb;
mod catalog;
mod cli;
mod config;
mod error;
mod metadata;
mod progress;
mod prompt;
mod removal;
mod run;
mod search;

use cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run::run(&cli).await {
        Ok(report) if report.is_clean() => {}
        Ok(_) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
