//! Start a service

use log::debug;

use crate::cli::StartArgs;
use crate::daemons::Registry;
use crate::error::Result;
use crate::launchctl;

pub fn start(registry: &Registry, args: &StartArgs) -> Result<()> {
    let daemon = registry.find_one(&args.name, args.exact)?;

    // Bootstrap fails if the service is already loaded; keep going.
    if daemon.source_path.is_some() {
        match launchctl::bootstrap(daemon) {
            Ok(result) if !result.success() => {
                debug!("bootstrap {}: {}", daemon.name, result.stderr.trim());
            }
            Err(e) => debug!("bootstrap {}: {}", daemon.name, e),
            Ok(_) => {}
        }
    }

    let result = if args.kill {
        launchctl::kickstart_kill(daemon)?
    } else {
        launchctl::kickstart(daemon)?
    };
    print!("{}", result.stdout);

    println!("started {}", daemon.name);
    Ok(())
}
