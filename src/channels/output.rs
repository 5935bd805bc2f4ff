//! Shared line-oriented writer for channels that print to the terminal.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crate::error::PingError;

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// A cloneable handle to a writer, stdout by default.
#[derive(Clone)]
pub struct ConsoleOutput {
    writer: SharedWriter,
}

impl ConsoleOutput {
    /// Writes to the process's standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Writes to an arbitrary sink.
    #[must_use]
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Writes `text` followed by a newline and flushes.
    ///
    /// # Errors
    ///
    /// Returns [`PingError::Io`] when the write fails or the writer lock is
    /// poisoned.
    pub fn write_line(&self, text: &str) -> Result<(), PingError> {
        let mut guard = self.writer.lock().map_err(|_| PingError::Io {
            message: "console writer lock poisoned".to_owned(),
        })?;
        writeln!(guard, "{text}").map_err(|error| io_error(&error))?;
        guard.flush().map_err(|error| io_error(&error))
    }
}

impl std::fmt::Debug for ConsoleOutput {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("ConsoleOutput")
    }
}

/// Converts an I/O error to a [`PingError::Io`].
pub(crate) fn io_error(error: &io::Error) -> PingError {
    PingError::Io {
        message: error.to_string(),
    }
}
