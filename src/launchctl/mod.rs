//! Wrappers around the launchctl(1) subprocess
//!
//! Every verb angel performs against the running service manager goes through
//! here. Calls are synchronous; failures to spawn launchctl at all surface as
//! typed errors for the CLI layer to report.

mod parser;

pub use parser::{parse_print, PrintData, PrintParseError, PrintValue};

use std::process::Command;

use log::debug;

use crate::daemons::{Daemon, Domain};
use crate::error::{AngelError, Result};

/// Captured output of one launchctl invocation.
#[derive(Debug)]
pub struct LaunchctlResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
}

impl LaunchctlResult {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// One line of `launchctl list` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeEntry {
    pub pid: Option<u32>,
    pub last_exit_code: Option<i32>,
    pub name: String,
}

pub fn list() -> Result<LaunchctlResult> {
    launchctl(&["list"])
}

pub fn print(target: &str) -> Result<LaunchctlResult> {
    launchctl(&["print", target])
}

pub fn bootstrap(daemon: &Daemon) -> Result<LaunchctlResult> {
    let path = source_path(daemon)?;
    launchctl(&["bootstrap", &daemon.domain_str(), &path])
}

pub fn bootout(daemon: &Daemon) -> Result<LaunchctlResult> {
    let path = source_path(daemon)?;
    launchctl(&["bootout", &daemon.domain_str(), &path])
}

pub fn enable(daemon: &Daemon) -> Result<LaunchctlResult> {
    launchctl(&["enable", &service_target(daemon)?])
}

pub fn disable(daemon: &Daemon) -> Result<LaunchctlResult> {
    launchctl(&["disable", &service_target(daemon)?])
}

pub fn kickstart(daemon: &Daemon) -> Result<LaunchctlResult> {
    launchctl(&["kickstart", &service_target(daemon)?])
}

/// kickstart -k kills any running instance first.
pub fn kickstart_kill(daemon: &Daemon) -> Result<LaunchctlResult> {
    launchctl(&["kickstart", "-k", &service_target(daemon)?])
}

pub fn kill(daemon: &Daemon, signal: &str) -> Result<LaunchctlResult> {
    launchctl(&["kill", signal, &service_target(daemon)?])
}

/// Parse `launchctl list` lines: `<pid> <last-exit-code> <label>`, with `-`
/// for absent values. The header line and anything else unrecognizable is
/// skipped.
pub fn parse_list_output(output: &str) -> Vec<RuntimeEntry> {
    let mut entries = Vec::new();

    for line in output.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 3 {
            continue;
        }

        let pid = match parts[0] {
            "-" => None,
            other => match other.parse::<u32>() {
                Ok(pid) => Some(pid),
                // Header line ("PID Status Label") or noise.
                Err(_) => continue,
            },
        };
        let last_exit_code = match parts[1] {
            "-" => None,
            other => other.parse::<i32>().ok(),
        };
        let name = parts[2..].join(" ");
        if name.is_empty() {
            continue;
        }

        entries.push(RuntimeEntry {
            pid,
            last_exit_code,
            name,
        });
    }

    entries
}

/// `<domain>/<name>` wire address. Unknown domains are a failure sentinel and
/// must never reach launchctl.
pub fn service_target(daemon: &Daemon) -> Result<String> {
    if daemon.domain == Domain::Unknown {
        return Err(AngelError::Launchctl(format!(
            "daemon '{}' has no resolvable domain",
            daemon.name
        )));
    }
    Ok(format!("{}/{}", daemon.domain_str(), daemon.name))
}

fn source_path(daemon: &Daemon) -> Result<String> {
    let path = daemon.source_path.as_ref().ok_or_else(|| {
        AngelError::Launchctl(format!("daemon '{}' has no plist on disk", daemon.name))
    })?;
    path.to_str().map(str::to_string).ok_or_else(|| {
        AngelError::Launchctl(format!("daemon '{}' has a non-UTF-8 path", daemon.name))
    })
}

fn launchctl(args: &[&str]) -> Result<LaunchctlResult> {
    debug!("exec: launchctl {}", args.join(" "));

    let output = Command::new("launchctl")
        .args(args)
        .output()
        .map_err(|e| AngelError::Launchctl(format!("failed to run launchctl: {}", e)))?;

    Ok(LaunchctlResult {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        exit_code: output.status.code(),
    })
}
