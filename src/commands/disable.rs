//! Disable a service

use crate::cli::NameArgs;
use crate::daemons::Registry;
use crate::error::Result;
use crate::launchctl;

pub fn disable(registry: &Registry, args: &NameArgs) -> Result<()> {
    let daemon = registry.find_one(&args.name, args.exact)?;

    let result = launchctl::disable(daemon)?;
    print!("{}", result.stdout);

    println!("disabled {}", daemon.name);
    Ok(())
}
