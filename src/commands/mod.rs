//! Command implementations behind the `crewmeta` binary.

mod check;
pub mod config;
mod fetch;
mod installed;
mod status;
mod version;

pub use check::check;
pub use fetch::url;
pub use installed::installed;
pub use status::{InstallState, install_state, status};
pub use version::version;
