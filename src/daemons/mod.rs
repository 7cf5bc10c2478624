//! Daemon model and type definitions
//!
//! A [`Daemon`] is one launchd service: its plist declaration (when a file
//! exists on disk), the ownership domain it belongs to, and whatever runtime
//! state `launchctl list` reported for it.

mod registry;

pub use registry::{plist_dirs, PlistDir, Registry};

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

/// Ownership/addressing scope used when targeting launchctl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    System,
    User(u32),
    Gui(u32),
    Unknown,
}

impl Domain {
    /// Map a plist `LimitLoadToSessionType` value to a domain. Total: every
    /// unrecognized value (including empty) is `Unknown`.
    pub fn from_session_type(session_type: &str, uid: u32) -> Domain {
        match session_type {
            "Aqua" => Domain::Gui(uid),
            "Background" | "LoginWindow" => Domain::User(uid),
            "System" => Domain::System,
            _ => Domain::Unknown,
        }
    }

    /// Resolve the effective domain for a declaration. The plist's session
    /// type wins only when it maps to a real domain; otherwise the domain
    /// implied by the source directory applies. Most plists omit the field,
    /// so the directory fallback is the common path.
    pub fn resolve(session_type: Option<&str>, directory_domain: Domain, uid: u32) -> Domain {
        match session_type {
            Some(s) => match Domain::from_session_type(s, uid) {
                Domain::Unknown => directory_domain,
                declared => declared,
            },
            None => directory_domain,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::System => write!(f, "system"),
            Domain::User(uid) => write!(f, "user/{}", uid),
            Domain::Gui(uid) => write!(f, "gui/{}", uid),
            // Failure sentinel. Never a valid launchctl target; see
            // launchctl::service_target.
            Domain::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Who a daemon belongs to. Drives default visibility in listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// Installed by the user (~/Library/LaunchAgents, configured dirs).
    User,
    /// Shipped by Apple (/System/Library).
    Apple,
    /// Third-party vendor (/Library).
    ThirdParty,
    /// Lives in a directory angel manages (~/.config/angel).
    Managed,
}

/// The plist fields angel cares about. Decoding is best-effort: launchd
/// directories routinely contain vendor plists with shapes we do not model,
/// and a partially populated declaration is fine.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LaunchdPlist {
    #[serde(rename = "Label")]
    pub label: Option<String>,

    #[serde(rename = "Program")]
    pub program: Option<String>,

    #[serde(rename = "ProgramArguments")]
    pub program_arguments: Option<Vec<String>>,

    #[serde(rename = "RunAtLoad")]
    pub run_at_load: Option<bool>,

    #[serde(rename = "KeepAlive")]
    pub keep_alive: Option<bool>,

    #[serde(rename = "WorkingDirectory")]
    pub working_directory: Option<String>,

    #[serde(rename = "StandardOutPath")]
    pub standard_out_path: Option<String>,

    #[serde(rename = "StandardErrorPath")]
    pub standard_error_path: Option<String>,

    #[serde(rename = "EnvironmentVariables")]
    pub environment_variables: Option<HashMap<String, String>>,

    #[serde(rename = "StartInterval")]
    pub start_interval: Option<i32>,

    #[serde(rename = "ThrottleInterval")]
    pub throttle_interval: Option<i32>,

    #[serde(rename = "ProcessType")]
    pub process_type: Option<String>,

    #[serde(rename = "SessionCreate")]
    pub session_create: Option<bool>,

    #[serde(rename = "LaunchOnlyOnce")]
    pub launch_only_once: Option<bool>,

    #[serde(rename = "LimitLoadToSessionType")]
    pub limit_load_to_session_type: Option<String>,
}

/// One discovered launchd service.
#[derive(Debug, Clone)]
pub struct Daemon {
    /// Unique key: the plist Label when present, else the file stem.
    pub name: String,
    /// None for daemons only known to the running launchd.
    pub source_path: Option<PathBuf>,
    pub domain: Domain,
    pub ownership: Ownership,
    pub plist: Option<LaunchdPlist>,
    pub pid: Option<u32>,
    pub last_exit_code: Option<i32>,
}

impl Daemon {
    /// Build a daemon from a decoded plist file.
    pub fn from_plist(
        plist: LaunchdPlist,
        path: PathBuf,
        directory_domain: Domain,
        ownership: Ownership,
        uid: u32,
    ) -> Daemon {
        let name = match plist.label.as_deref() {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => file_stem(&path),
        };
        let domain = Domain::resolve(
            plist.limit_load_to_session_type.as_deref(),
            directory_domain,
            uid,
        );

        Daemon {
            name,
            source_path: Some(path),
            domain,
            ownership,
            plist: Some(plist),
            pid: None,
            last_exit_code: None,
        }
    }

    /// Build a runtime-only daemon from a `launchctl list` line. There is no
    /// file to infer a domain from, so it stays `Unknown`.
    pub fn runtime_only(name: String, pid: Option<u32>, last_exit_code: Option<i32>) -> Daemon {
        let ownership = if name.contains("com.apple") {
            Ownership::Apple
        } else {
            Ownership::ThirdParty
        };
        Daemon {
            name,
            source_path: None,
            domain: Domain::Unknown,
            ownership,
            plist: None,
            pid,
            last_exit_code,
        }
    }

    pub fn domain_str(&self) -> String {
        self.domain.to_string()
    }
}

/// File name with the .plist extension stripped.
pub(crate) fn file_stem(path: &std::path::Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string()
}
