//! CLI argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::commands::list::SortBy;

#[derive(Parser)]
#[command(name = "angel")]
#[command(about = "macOS launchd service manager", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared shape for verbs that target one service by name.
#[derive(Args)]
pub struct NameArgs {
    /// Service name
    pub name: String,
    /// Exact match
    #[arg(short, long)]
    pub exact: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// Pattern to match
    pub pattern: Option<String>,
    /// Exact match
    #[arg(short, long)]
    pub exact: bool,
    /// Show Apple daemons
    #[arg(short = 'a', long = "apple")]
    pub show_apple: bool,
    /// Show daemons with no plist on disk
    #[arg(short = 'd', long = "dynamic")]
    pub show_dynamic: bool,
    /// Show idle daemons (no pid)
    #[arg(short = 'i', long = "idle")]
    pub show_idle: bool,
    /// Field to sort by
    #[arg(short = 's', long = "sort", default_value = "name")]
    pub sort_by: SortBy,
}

#[derive(Args)]
pub struct StatusArgs {
    /// Service name
    pub name: String,
    /// Exact match
    #[arg(short, long)]
    pub exact: bool,
    /// Show every key launchctl reports
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Args)]
pub struct StartArgs {
    /// Service name
    pub name: String,
    /// Exact match
    #[arg(short, long)]
    pub exact: bool,
    /// Kill a running instance before starting
    #[arg(short, long)]
    pub kill: bool,
}

#[derive(Args)]
pub struct StopArgs {
    /// Service name
    pub name: String,
    /// Exact match
    #[arg(short, long)]
    pub exact: bool,
    /// Signal to send
    #[arg(short, long, default_value = "sigterm")]
    pub signal: Signal,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Signal {
    /// Graceful termination (default)
    Sigterm,
    /// Force immediate termination
    Sigkill,
    /// Hangup (often used for reload)
    Sighup,
    /// Interrupt
    Sigint,
}

impl Signal {
    /// Name launchctl kill expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Sigterm => "SIGTERM",
            Signal::Sigkill => "SIGKILL",
            Signal::Sighup => "SIGHUP",
            Signal::Sigint => "SIGINT",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List services
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show service status
    Status(StatusArgs),

    /// Start a service (bootstrap + kickstart)
    #[command(alias = "kickstart")]
    Start(StartArgs),

    /// Stop a service
    #[command(alias = "kill")]
    Stop(StopArgs),

    /// Restart a service
    Restart(NameArgs),

    /// Load a service into its domain
    Bootstrap(NameArgs),

    /// Remove a service from its domain
    Bootout(NameArgs),

    /// Enable a service
    Enable(NameArgs),

    /// Disable a service
    Disable(NameArgs),

    /// Print a service's plist
    Show(NameArgs),
}
