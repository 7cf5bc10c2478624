//! List discovered services

use clap::ValueEnum;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use crate::cli::ListArgs;
use crate::daemons::{Daemon, Ownership, Registry};
use crate::error::Result;

#[derive(Clone, Copy, ValueEnum)]
pub enum SortBy {
    Name,
    Domain,
    Parent,
}

#[derive(Tabled)]
struct ListRow {
    #[tabled(rename = "EC")]
    exit_code: String,
    #[tabled(rename = "PID")]
    pid: String,
    #[tabled(rename = "DOMAIN")]
    domain: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "SOURCE")]
    source: String,
}

pub fn list(registry: &Registry, args: &ListArgs) -> Result<()> {
    let query = args.pattern.as_deref().unwrap_or("");
    let mut daemons = registry.find_all(query, args.exact);
    sort_daemons(args.sort_by, &mut daemons);

    let rows: Vec<ListRow> = daemons
        .iter()
        .filter(|d| visible(d, args))
        .map(|d| ListRow {
            exit_code: d
                .last_exit_code
                .map_or("-".to_string(), |c| c.to_string()),
            pid: d.pid.map_or("-".to_string(), |p| p.to_string()),
            domain: d.domain_str(),
            name: d.name.clone(),
            source: d
                .source_path
                .as_ref()
                .and_then(|p| p.parent())
                .map_or("-".to_string(), |p| p.display().to_string()),
        })
        .collect();

    if rows.is_empty() {
        println!(
            "{}",
            "No services to show (try -a, -d, or -i to widen the filter)".bright_black()
        );
        return Ok(());
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");

    Ok(())
}

/// Apple, runtime-only, and idle daemons are hidden unless asked for.
fn visible(daemon: &Daemon, args: &ListArgs) -> bool {
    if daemon.ownership == Ownership::Apple && !args.show_apple {
        return false;
    }
    if daemon.source_path.is_none() && !args.show_dynamic {
        return false;
    }
    if daemon.pid.is_none() && !args.show_idle {
        return false;
    }
    true
}

fn sort_daemons(sort_by: SortBy, daemons: &mut [&Daemon]) {
    match sort_by {
        SortBy::Name => daemons.sort_by(|a, b| a.name.cmp(&b.name)),
        SortBy::Domain => daemons.sort_by(|a, b| {
            a.domain_str()
                .cmp(&b.domain_str())
                .then_with(|| a.name.cmp(&b.name))
        }),
        SortBy::Parent => daemons.sort_by(|a, b| {
            parent_path(a)
                .cmp(&parent_path(b))
                .then_with(|| a.name.cmp(&b.name))
        }),
    }
}

fn parent_path(daemon: &Daemon) -> &str {
    daemon
        .source_path
        .as_ref()
        .and_then(|p| p.parent())
        .and_then(|p| p.to_str())
        .unwrap_or_default()
}
