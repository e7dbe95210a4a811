//! CLI definitions using clap derive API

use crate::metadata::DEFAULT_CONCURRENCY;
use clap::Parser;
use clap::builder::{Styles, styling::AnsiColor};

/// adbsweep - interactive Android debloater
#[derive(Parser, Debug)]
#[command(
    name = "adbsweep",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Interactively uninstall packages from a connected Android device",
    long_about = "adbsweep lists the packages installed on a connected Android device, \
                  enriches them with Play Store metadata, lets you pick a subset with \
                  fuzzy search, and uninstalls the selection after an explicit \
                  confirmation. Set ADB_SERVER_SOCKET (tcp:<ip>:<port>) to reach a \
                  non-default adb server."
)]
pub struct Cli {
    /// Maximum concurrent Play Store lookups during the fetch phase
    #[arg(
        long,
        short = 'c',
        env = "ADBSWEEP_CONCURRENCY",
        default_value_t = DEFAULT_CONCURRENCY
    )]
    pub concurrency: usize,
}
