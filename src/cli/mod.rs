//! Command implementations for the summit-content binary

pub mod commands;
pub mod error;
pub mod output;

pub use error::CliError;
