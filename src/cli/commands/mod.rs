//! Subcommand implementations.

pub mod export;
pub mod verify;
