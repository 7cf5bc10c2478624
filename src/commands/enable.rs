//! Enable a service

use crate::cli::NameArgs;
use crate::daemons::Registry;
use crate::error::Result;
use crate::launchctl;

pub fn enable(registry: &Registry, args: &NameArgs) -> Result<()> {
    let daemon = registry.find_one(&args.name, args.exact)?;

    let result = launchctl::enable(daemon)?;
    print!("{}", result.stdout);

    println!("enabled {}", daemon.name);
    Ok(())
}
