//! Command-line plumbing for the `gong` binary.
//!
//! - [`args`]: subcommand handling before configuration is parsed
//! - [`logging`]: `tracing` subscriber installation
//! - [`ping`]: the `ping` subcommand
//!
//! Error reporting is in [`output`].

pub mod args;
pub mod logging;
pub mod output;
pub mod ping;
