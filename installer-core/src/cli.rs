//! CLI argument parsing for the installer wizard.
//!
//! The interactive wizard runs when no subcommand is given.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_OS_RELEASE: &str = "/etc/os-release";

#[derive(Parser, Debug)]
#[command(name = "os-installer")]
#[command(about = "Guided operating system installation wizard")]
#[command(long_about = "Guided operating system installation wizard.\n\n\
    Run without arguments to start the interactive wizard.\n\
    Use `dump` to print every visible step as text and exit.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Running from installation media: adds the language step, Quit becomes Reboot
    #[arg(long, global = true)]
    pub boot_iso: bool,

    /// Command backend configuration (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Language catalog (JSON); the built-in catalog is used when omitted
    #[arg(long, global = true)]
    pub localization: Option<PathBuf>,

    /// Storage devices and selection (JSON)
    #[arg(long, global = true, conflicts_with = "fake_storage")]
    pub storage: Option<PathBuf>,

    /// Use built-in demo disks and an in-memory storage backend
    #[arg(long, global = true)]
    pub fake_storage: bool,

    /// Where the selected storage scenario is remembered between runs
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,

    #[arg(long, global = true, default_value = DEFAULT_OS_RELEASE)]
    pub os_release: PathBuf,

    /// Log file (defaults to /var/log/installer/wizard.log, stderr if not writable)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print every visible step as text and exit
    Dump,
}
