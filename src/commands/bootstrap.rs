//! Bootstrap a service into its domain

use crate::cli::NameArgs;
use crate::daemons::Registry;
use crate::error::Result;
use crate::launchctl;

pub fn bootstrap(registry: &Registry, args: &NameArgs) -> Result<()> {
    let daemon = registry.find_one(&args.name, args.exact)?;

    let result = launchctl::bootstrap(daemon)?;
    print!("{}", result.stdout);

    println!("bootstrapped {}", daemon.name);
    Ok(())
}
