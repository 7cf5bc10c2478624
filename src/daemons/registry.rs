//! Daemon discovery and lookup
//!
//! Scans an ordered list of plist directories, overlays daemons that only the
//! running launchd knows about, and answers pattern queries. Discovery is
//! maximally permissive: unreadable files, bad globs, and malformed plists
//! degrade the result instead of aborting, because launchd directories
//! routinely contain vendor files with unexpected shapes.

use std::collections::HashMap;
use std::path::PathBuf;

use log::{debug, warn};
use regex::Regex;

use super::{file_stem, Daemon, Domain, LaunchdPlist, Ownership};
use crate::config::Config;
use crate::error::{AngelError, Result};
use crate::launchctl::{self, RuntimeEntry};

/// One directory to scan for plists, with the domain and ownership its
/// contents inherit.
pub struct PlistDir {
    pub path: PathBuf,
    pub domain: Domain,
    pub ownership: Ownership,
}

/// The ordered scan list: built-in launchd directories first, then directories
/// from the user's config. Order matters — a later directory overrides an
/// earlier one on name collision, so user entries win.
pub fn plist_dirs(config: &Config, uid: u32) -> Vec<PlistDir> {
    let mut scan_dirs = vec![
        PlistDir {
            path: PathBuf::from("/System/Library/LaunchDaemons"),
            domain: Domain::System,
            ownership: Ownership::Apple,
        },
        PlistDir {
            path: PathBuf::from("/System/Library/LaunchAgents"),
            domain: Domain::Gui(uid),
            ownership: Ownership::Apple,
        },
        PlistDir {
            path: PathBuf::from("/Library/LaunchDaemons"),
            domain: Domain::System,
            ownership: Ownership::ThirdParty,
        },
        PlistDir {
            path: PathBuf::from("/Library/LaunchAgents"),
            domain: Domain::User(uid),
            ownership: Ownership::ThirdParty,
        },
    ];

    if let Some(home) = dirs::home_dir() {
        scan_dirs.push(PlistDir {
            path: home.join("Library/LaunchAgents"),
            domain: Domain::User(uid),
            ownership: Ownership::User,
        });
        scan_dirs.push(PlistDir {
            path: home.join(".config/angel/user"),
            domain: Domain::User(uid),
            ownership: Ownership::Managed,
        });
        scan_dirs.push(PlistDir {
            path: home.join(".config/angel/system"),
            domain: Domain::System,
            ownership: Ownership::Managed,
        });
        scan_dirs.push(PlistDir {
            path: home.join(".config/angel/gui"),
            domain: Domain::Gui(uid),
            ownership: Ownership::Managed,
        });
    }

    for entry in &config.directories {
        scan_dirs.push(PlistDir {
            path: PathBuf::from(&entry.path),
            domain: entry.domain.to_domain(uid),
            ownership: Ownership::User,
        });
    }

    scan_dirs
}

/// All discovered daemons, keyed by name. Built once at startup, read-only
/// afterwards.
#[derive(Debug, Default)]
pub struct Registry {
    map: HashMap<String, Daemon>,
}

impl Registry {
    /// Full discovery: directory scan plus the `launchctl list` overlay.
    /// A failed list invocation means no runtime-only daemons, nothing more.
    pub fn load(dirs: &[PlistDir], uid: u32) -> Registry {
        let mut registry = Registry::scan(dirs, uid);

        match launchctl::list() {
            Ok(result) if result.success() => {
                registry.overlay_runtime(launchctl::parse_list_output(&result.stdout));
            }
            Ok(result) => {
                debug!(
                    "launchctl list exited with {:?}; skipping runtime daemons",
                    result.exit_code
                );
            }
            Err(e) => {
                debug!("launchctl list failed ({}); skipping runtime daemons", e);
            }
        }

        registry
    }

    /// Scan the given directories for `*.plist` files.
    pub fn scan(dirs: &[PlistDir], uid: u32) -> Registry {
        let mut map = HashMap::new();

        for dir in dirs {
            let pattern = format!("{}/*.plist", dir.path.display());
            let paths = match glob::glob(&pattern) {
                Ok(paths) => paths,
                Err(e) => {
                    warn!("bad glob pattern '{}': {}", pattern, e);
                    continue;
                }
            };

            for path in paths.flatten() {
                let bytes = match std::fs::read(&path) {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        debug!("skipping unreadable {}: {}", path.display(), e);
                        continue;
                    }
                };

                // Best-effort decode. A malformed plist still gets an entry,
                // identified by its file name, with no declaration.
                let daemon = match plist::from_bytes::<LaunchdPlist>(&bytes) {
                    Ok(decoded) => {
                        Daemon::from_plist(decoded, path, dir.domain, dir.ownership, uid)
                    }
                    Err(e) => {
                        debug!("undecodable plist {}: {}", path.display(), e);
                        Daemon {
                            name: file_stem(&path),
                            source_path: Some(path),
                            domain: dir.domain,
                            ownership: dir.ownership,
                            plist: None,
                            pid: None,
                            last_exit_code: None,
                        }
                    }
                };

                map.insert(daemon.name.clone(), daemon);
            }
        }

        Registry { map }
    }

    /// Merge `launchctl list` entries in. File-backed daemons keep their
    /// declaration and gain pid/exit-code; names launchd knows but no scanned
    /// directory does become runtime-only entries.
    pub fn overlay_runtime(&mut self, entries: Vec<RuntimeEntry>) {
        for entry in entries {
            match self.map.get_mut(&entry.name) {
                Some(daemon) => {
                    daemon.pid = entry.pid;
                    daemon.last_exit_code = entry.last_exit_code;
                }
                None => {
                    let daemon =
                        Daemon::runtime_only(entry.name, entry.pid, entry.last_exit_code);
                    self.map.insert(daemon.name.clone(), daemon);
                }
            }
        }
    }

    /// All daemons whose name matches the query. An empty query matches
    /// everything and is never an error. Non-empty queries are matched
    /// case-insensitively as escaped literals; `exact` anchors both ends.
    /// Iteration order is map order — callers sort before display.
    pub fn find_all(&self, query: &str, exact: bool) -> Vec<&Daemon> {
        if query.is_empty() {
            return self.map.values().collect();
        }

        let pattern = if exact {
            format!("(?i)^{}$", regex::escape(query))
        } else {
            format!("(?i){}", regex::escape(query))
        };
        // An escaped literal always compiles; degrade to no matches if not.
        let Ok(re) = Regex::new(&pattern) else {
            return Vec::new();
        };

        self.map
            .values()
            .filter(|daemon| re.is_match(&daemon.name))
            .collect()
    }

    /// Exactly one matching daemon, or NoMatch / Ambiguous.
    pub fn find_one(&self, query: &str, exact: bool) -> Result<&Daemon> {
        let matches = self.find_all(query, exact);
        match matches.len() {
            0 => Err(AngelError::NoMatch(query.to_string())),
            1 => Ok(matches[0]),
            _ => {
                let mut candidates: Vec<String> =
                    matches.iter().map(|d| d.name.clone()).collect();
                candidates.sort();
                Err(AngelError::Ambiguous {
                    query: query.to_string(),
                    candidates,
                })
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Daemon> {
        self.map.values()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn daemon(name: &str) -> Daemon {
        Daemon::runtime_only(name.to_string(), None, None)
    }

    fn registry_with(names: &[&str]) -> Registry {
        let mut registry = Registry::default();
        for name in names {
            registry.map.insert(name.to_string(), daemon(name));
        }
        registry
    }

    #[test]
    fn test_empty_query_is_wildcard() {
        let registry = registry_with(&["com.example.a", "com.example.b"]);
        assert_eq!(registry.find_all("", false).len(), 2);
        assert_eq!(registry.find_all("", true).len(), 2);
    }

    #[test]
    fn test_empty_query_on_empty_registry() {
        let registry = Registry::default();
        assert!(registry.find_all("", false).is_empty());
    }

    #[test]
    fn test_substring_match_is_case_insensitive() {
        let registry = registry_with(&["com.Example.Foo", "org.other.bar"]);
        let matches = registry.find_all("example", false);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "com.Example.Foo");
    }

    #[test]
    fn test_exact_match_anchored() {
        let registry = registry_with(&["com.example.foo", "com.example.foobar"]);
        assert_eq!(registry.find_all("com.example.foo", true).len(), 1);
        assert_eq!(registry.find_all("com.example.foo", false).len(), 2);
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let registry = registry_with(&["com.example.foo", "com-example-foo"]);
        // The dots must not act as regex wildcards.
        let matches = registry.find_all("com.example", false);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "com.example.foo");
    }

    #[test]
    fn test_find_one_no_match() {
        let registry = registry_with(&["com.example.foo"]);
        let err = registry.find_one("nonexistent-xyz", false).unwrap_err();
        assert!(matches!(err, AngelError::NoMatch(q) if q == "nonexistent-xyz"));
    }

    #[test]
    fn test_find_one_ambiguous_carries_candidates() {
        let registry = registry_with(&["com.example.a", "com.example.b"]);
        let err = registry.find_one("example", false).unwrap_err();
        match err {
            AngelError::Ambiguous { query, candidates } => {
                assert_eq!(query, "example");
                assert_eq!(candidates, vec!["com.example.a", "com.example.b"]);
            }
            other => panic!("expected Ambiguous, got {:?}", other),
        }
    }

    #[test]
    fn test_find_one_single() {
        let registry = registry_with(&["com.example.foo", "org.other.bar"]);
        let daemon = registry.find_one("other", false).unwrap();
        assert_eq!(daemon.name, "org.other.bar");
    }

    #[test]
    fn test_overlay_merges_into_file_backed_daemon() {
        let mut registry = Registry::default();
        let file_daemon = Daemon::from_plist(
            LaunchdPlist {
                label: Some("com.example.svc".to_string()),
                ..Default::default()
            },
            PathBuf::from("/tmp/com.example.svc.plist"),
            Domain::System,
            Ownership::ThirdParty,
            501,
        );
        registry.map.insert(file_daemon.name.clone(), file_daemon);

        registry.overlay_runtime(vec![RuntimeEntry {
            pid: Some(424),
            last_exit_code: Some(0),
            name: "com.example.svc".to_string(),
        }]);

        let daemon = registry.find_one("com.example.svc", true).unwrap();
        // Merge, not overwrite: declaration and path survive.
        assert_eq!(daemon.pid, Some(424));
        assert_eq!(daemon.last_exit_code, Some(0));
        assert!(daemon.source_path.is_some());
        assert!(daemon.plist.is_some());
        assert_eq!(daemon.domain, Domain::System);
    }

    #[test]
    fn test_overlay_creates_runtime_only_daemon() {
        let mut registry = Registry::default();
        registry.overlay_runtime(vec![RuntimeEntry {
            pid: Some(99),
            last_exit_code: None,
            name: "com.apple.hidden".to_string(),
        }]);

        let daemon = registry.find_one("com.apple.hidden", true).unwrap();
        assert_eq!(daemon.domain, Domain::Unknown);
        assert_eq!(daemon.ownership, Ownership::Apple);
        assert!(daemon.source_path.is_none());
        assert!(daemon.plist.is_none());
    }
}
