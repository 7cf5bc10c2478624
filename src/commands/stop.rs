//! Stop a service

use crate::cli::StopArgs;
use crate::daemons::Registry;
use crate::error::Result;
use crate::launchctl;

pub fn stop(registry: &Registry, args: &StopArgs) -> Result<()> {
    let daemon = registry.find_one(&args.name, args.exact)?;

    let result = launchctl::kill(daemon, args.signal.as_str())?;
    print!("{}", result.stdout);

    println!("sent {} to {}", args.signal.as_str(), daemon.name);
    Ok(())
}
