//! Remove a service from its domain

use crate::cli::NameArgs;
use crate::daemons::Registry;
use crate::error::Result;
use crate::launchctl;

pub fn bootout(registry: &Registry, args: &NameArgs) -> Result<()> {
    let daemon = registry.find_one(&args.name, args.exact)?;

    let result = launchctl::bootout(daemon)?;
    print!("{}", result.stdout);

    println!("booted out {}", daemon.name);
    Ok(())
}
