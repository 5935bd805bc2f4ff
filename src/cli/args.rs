//! Subcommand selection.
//!
//! `ping` is the only subcommand and the default one, so `gong --pr 1` and
//! `gong ping --pr 1` are equivalent. Everything after it is left to
//! ortho-config.

use std::ffi::OsString;

use gong::PingError;

/// Name of the reminder subcommand.
pub const PING_COMMAND: &str = "ping";

/// Strips the subcommand from `args`, keeping the program name first.
///
/// # Errors
///
/// Returns [`PingError::Configuration`] when the first argument after the
/// program name is neither a flag nor `ping`.
pub fn strip_subcommand<I>(args: I) -> Result<Vec<OsString>, PingError>
where
    I: IntoIterator<Item = OsString>,
{
    let mut stripped: Vec<OsString> = args.into_iter().collect();
    let first = stripped
        .get(1)
        .map(|arg| arg.to_string_lossy().into_owned());

    match first {
        Some(command) if command == PING_COMMAND => {
            stripped.remove(1);
        }
        Some(command) if !command.starts_with('-') => {
            return Err(PingError::Configuration {
                message: format!(
                    "unknown command '{command}'; available commands: {PING_COMMAND}"
                ),
            });
        }
        _ => {}
    }

    Ok(stripped)
}
