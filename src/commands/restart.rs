//! Restart a service

use crate::cli::NameArgs;
use crate::daemons::Registry;
use crate::error::Result;
use crate::launchctl;

pub fn restart(registry: &Registry, args: &NameArgs) -> Result<()> {
    let daemon = registry.find_one(&args.name, args.exact)?;

    let result = launchctl::kickstart_kill(daemon)?;
    print!("{}", result.stdout);

    println!("restarted {}", daemon.name);
    Ok(())
}
