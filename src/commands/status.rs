//! Show one service's runtime status via `launchctl print`

use colored::Colorize;

use crate::cli::StatusArgs;
use crate::daemons::Registry;
use crate::error::{AngelError, Result};
use crate::launchctl::{self, PrintValue};

pub fn status(registry: &Registry, args: &StatusArgs) -> Result<()> {
    let daemon = registry.find_one(&args.name, args.exact)?;
    let target = launchctl::service_target(daemon)?;

    let result = launchctl::print(&target)?;
    if !result.success() {
        return Err(AngelError::Launchctl(format!(
            "launchctl print {} failed: {}",
            target,
            result.stderr.trim()
        )));
    }

    let data = launchctl::parse_print(&result.stdout)?;

    let state = data.get("state");
    let dot = match state.as_str() {
        "running" => "●".green(),
        "" => "○".bright_black(),
        _ => "○".red(),
    };
    println!("{} {}", dot, daemon.name.bold());

    print_field("State", &state);
    print_field("Domain", &daemon.domain_str());
    print_field("PID", &data.get("pid"));
    print_field("Last exit", &data.get("last exit code"));
    let path = data.get("path");
    if !path.is_empty() {
        print_field("Path", &path);
    } else if let Some(source) = &daemon.source_path {
        print_field("Path", &source.display().to_string());
    }

    match data.get_raw("program") {
        Some(PrintValue::Map(map)) => {
            if let Some(program) = map.get("path") {
                print_field("Program", program);
            }
        }
        Some(value) => print_field("Program", &value.to_string()),
        None => {}
    }
    if let Some(PrintValue::List(arguments)) = data.get_raw("arguments") {
        print_field("Arguments", &arguments.join(" "));
    }

    if args.verbose {
        println!();
        let mut keys: Vec<&str> = data.keys().collect();
        keys.sort_unstable();
        for key in keys {
            let rendered = data.get(key);
            if !rendered.is_empty() {
                print_field(key, &rendered);
            }
        }
    }

    Ok(())
}

fn print_field(name: &str, value: &str) {
    if !value.is_empty() {
        println!("  {:>12}: {}", name.bright_black(), value);
    }
}
