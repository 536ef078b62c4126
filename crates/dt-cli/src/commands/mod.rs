//! CLI subcommand implementations.

pub mod events;
pub mod report;
mod util;

pub use util::open_log;
