//! Print a service's plist file

use crate::cli::NameArgs;
use crate::daemons::Registry;
use crate::error::{AngelError, Result};

pub fn show(registry: &Registry, args: &NameArgs) -> Result<()> {
    let daemon = registry.find_one(&args.name, args.exact)?;

    let path = daemon.source_path.as_ref().ok_or_else(|| {
        AngelError::Launchctl(format!("daemon '{}' has no plist on disk", daemon.name))
    })?;

    let content = std::fs::read_to_string(path)?;
    print!("{}", content);
    Ok(())
}
