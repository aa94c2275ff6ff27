//! Command-line interface definitions.
//!
//! - `Cli`, `Commands`: CLI argument definitions via clap

mod commands;

pub use commands::{Cli, Commands};
