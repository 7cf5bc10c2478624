//! YAML configuration
//!
//! Optional file listing extra plist directories to scan. Checked locations,
//! first hit wins: `~/.angelrc`, `<config dir>/angel/angelrc`,
//! `~/.config/angel/angelrc`. A missing file is not an error; a file that
//! exists but does not parse is.

use std::path::Path;

use serde::Deserialize;

use crate::daemons::Domain;
use crate::error::{AngelError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub directories: Vec<DirectoryEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryEntry {
    pub path: String,
    #[serde(default)]
    pub domain: ConfigDomain,
}

/// Domain name as written in the config file. The uid is only known at
/// runtime, so this converts to a full [`Domain`] when descriptors are built.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConfigDomain {
    System,
    #[default]
    User,
    Gui,
}

impl ConfigDomain {
    pub fn to_domain(self, uid: u32) -> Domain {
        match self {
            ConfigDomain::System => Domain::System,
            ConfigDomain::User => Domain::User(uid),
            ConfigDomain::Gui => Domain::Gui(uid),
        }
    }
}

impl Config {
    pub fn load() -> Result<Config> {
        let Some(home) = dirs::home_dir() else {
            return Ok(Config::default());
        };

        let candidates = [
            home.join(".angelrc"),
            dirs::config_dir()
                .map(|p| p.join("angel/angelrc"))
                .unwrap_or_default(),
            home.join(".config/angel/angelrc"),
        ];

        for path in candidates {
            if !path.is_file() {
                continue;
            }
            let content = std::fs::read_to_string(&path)?;
            return Config::parse(&content, &home);
        }

        Ok(Config::default())
    }

    fn parse(content: &str, home: &Path) -> Result<Config> {
        let mut config: Config = serde_yaml::from_str(content)
            .map_err(|e| AngelError::Config(e.to_string()))?;

        for entry in &mut config.directories {
            if let Some(rest) = entry.path.strip_prefix('~') {
                entry.path = format!("{}{}", home.display(), rest);
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_directories() {
        let yaml = "directories:\n\
                    \x20 - path: /opt/services\n\
                    \x20   domain: system\n\
                    \x20 - path: ~/services\n";
        let home = Path::new("/Users/test");
        let config = Config::parse(yaml, home).unwrap();

        assert_eq!(config.directories.len(), 2);
        assert_eq!(config.directories[0].path, "/opt/services");
        assert_eq!(config.directories[0].domain, ConfigDomain::System);
        // Tilde expansion, and the domain defaults to user.
        assert_eq!(config.directories[1].path, "/Users/test/services");
        assert_eq!(config.directories[1].domain, ConfigDomain::User);
    }

    #[test]
    fn test_parse_empty_mapping() {
        let config = Config::parse("{}", Path::new("/Users/test")).unwrap();
        assert!(config.directories.is_empty());
    }

    #[test]
    fn test_parse_bad_yaml_is_config_error() {
        let result = Config::parse("directories: [unclosed", Path::new("/Users/test"));
        assert!(matches!(result, Err(AngelError::Config(_))));
    }

    #[test]
    fn test_config_domain_to_domain() {
        assert_eq!(ConfigDomain::System.to_domain(501), Domain::System);
        assert_eq!(ConfigDomain::User.to_domain(501), Domain::User(501));
        assert_eq!(ConfigDomain::Gui.to_domain(501), Domain::Gui(501));
    }
}
