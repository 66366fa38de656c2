//! Subcommand modules for the `nwt` binary.

pub mod name;
pub mod resolve;
pub mod stat;
pub mod subtree;
pub mod utils;
