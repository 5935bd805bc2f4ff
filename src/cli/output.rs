//! End-of-run reporting for the binary.

use std::io::{self, Write};

use tracing::{info, warn};

use gong::{PingError, PingOutcome};

/// Logs a one-line summary of a finished run.
///
/// Informational exits were already logged by the pipeline.
pub fn log_outcome(outcome: &PingOutcome) {
    let PingOutcome::Dispatched { decisions, report } = outcome else {
        return;
    };

    let due = decisions.iter().filter(|decision| decision.should_ping).count();
    if report.is_success() {
        info!(
            reviewers = decisions.len(),
            due,
            integrations = report.delivered.len(),
            "reminders dispatched"
        );
    } else {
        warn!(
            reviewers = decisions.len(),
            due,
            failed = report.failures.len(),
            "some integrations failed"
        );
    }
}

/// Writes `error` as a single line.
///
/// # Errors
///
/// Returns the writer's I/O error.
pub fn write_error<W: Write>(writer: &mut W, error: &PingError) -> io::Result<()> {
    writeln!(writer, "Error: {error}")
}
