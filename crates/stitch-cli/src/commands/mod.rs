//! Subcommand implementations.

pub mod configure;
pub mod pull;
pub mod show;
pub mod status;
