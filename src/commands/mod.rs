//! CLI verb implementations

mod bootout;
mod bootstrap;
mod disable;
mod enable;
pub mod list;
mod restart;
mod show;
mod start;
mod status;
mod stop;

pub use bootout::bootout;
pub use bootstrap::bootstrap;
pub use disable::disable;
pub use enable::enable;
pub use list::list;
pub use restart::restart;
pub use show::show;
pub use start::start;
pub use status::status;
pub use stop::stop;
