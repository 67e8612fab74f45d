//! CLI command implementations

mod check;
mod context;
mod merge;
mod style;
mod update;

pub use check::run_check;
pub use context::Connection;
pub use merge::run_merge;
pub use update::run_update;
