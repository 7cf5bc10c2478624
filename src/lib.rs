//! angel - macOS launchd service manager
//!
//! A CLI that:
//! - Discovers launchd plist files across system, user, and configured directories
//! - Resolves each daemon's ownership domain (system / user / gui)
//! - Parses `launchctl print` output into a queryable structure
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                     angel                       │
//! ├─────────────────────────────────────────────────┤
//! │  Daemon Registry │  Matcher  │  Print Parser    │
//! ├─────────────────────────────────────────────────┤
//! │              launchctl subprocess               │
//! └─────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod daemons;
pub mod error;
pub mod launchctl;

pub use daemons::{Daemon, Domain, Ownership};
pub use error::{AngelError, Result};
