//! angel - macOS launchd service manager CLI

use clap::Parser;
use colored::Colorize;
use log::debug;

use angel::cli::{Cli, Commands};
use angel::commands;
use angel::config::Config;
use angel::daemons::{plist_dirs, Registry};
use angel::AngelError;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("angel: {}", e);
            std::process::exit(1);
        }
    };

    let uid = real_uid();
    let registry = Registry::load(&plist_dirs(&config, uid), uid);
    debug!("registry holds {} daemons", registry.len());

    let result = match &cli.command {
        Commands::List(args) => commands::list(&registry, args),
        Commands::Status(args) => commands::status(&registry, args),
        Commands::Start(args) => commands::start(&registry, args),
        Commands::Stop(args) => commands::stop(&registry, args),
        Commands::Restart(args) => commands::restart(&registry, args),
        Commands::Bootstrap(args) => commands::bootstrap(&registry, args),
        Commands::Bootout(args) => commands::bootout(&registry, args),
        Commands::Enable(args) => commands::enable(&registry, args),
        Commands::Disable(args) => commands::disable(&registry, args),
        Commands::Show(args) => commands::show(&registry, args),
    };

    if let Err(e) = result {
        report_error(e);
    }
}

/// The uid daemons are addressed under. `sudo` sets SUDO_UID to the invoking
/// user, which is what user/gui domain targets should use, not root.
fn real_uid() -> u32 {
    std::env::var("SUDO_UID")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or_else(|| nix::unistd::getuid().as_raw())
}

fn report_error(e: AngelError) {
    match &e {
        AngelError::Ambiguous { query, candidates } => {
            println!("Multiple daemons found matching '{}':", query);
            for candidate in candidates {
                println!("  {}", candidate);
            }
            println!("{}", "Refine the pattern or pass --exact.".bright_black());
        }
        _ => {
            if e.is_clean_exit() {
                println!("{}", e);
            } else {
                eprintln!("angel: {}", e);
            }
        }
    }

    if !e.is_clean_exit() {
        std::process::exit(1);
    }
}
