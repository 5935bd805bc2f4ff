//! Fixtures shared by unit and integration tests.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeDelta, Utc};

use crate::ping::{DispatchContext, Integration, PingDecision, PullRequestContext, ReviewRequest};

/// A fixed instant used as "now" across tests.
#[must_use]
pub fn reference_now() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + TimeDelta::days(20_000)
}

/// In-memory writer whose contents can be read back after sharing.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    /// Everything written so far, lossily decoded.
    #[must_use]
    pub fn contents(&self) -> String {
        self.0
            .lock()
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_default()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut bytes = self
            .0
            .lock()
            .map_err(|_| io::Error::other("shared buffer lock poisoned"))?;
        bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Pull request coordinates for `octo/repo#42`.
#[must_use]
pub fn pull_request_context() -> PullRequestContext {
    PullRequestContext {
        number: 42,
        owner: "octo".to_owned(),
        repository: "repo".to_owned(),
        url: "https://github.com/octo/repo/pull/42".to_owned(),
    }
}

/// A dispatch context for `octo/repo#42` at [`reference_now`].
#[must_use]
pub fn dispatch_context(dry_run: bool) -> DispatchContext {
    DispatchContext {
        pull_request: pull_request_context(),
        dry_run,
        verbose: false,
        now: reference_now(),
    }
}

/// A decision for a user requested `hours_ago` hours before
/// [`reference_now`], routed to `integrations`.
#[must_use]
pub fn decision(
    from: &str,
    hours_ago: i64,
    delay: i64,
    enabled: bool,
    should_ping: bool,
    integrations: Vec<Integration>,
) -> PingDecision {
    PingDecision {
        request: ReviewRequest::user(from, reference_now() - TimeDelta::hours(hours_ago)),
        delay,
        enabled,
        integrations,
        should_ping,
    }
}

/// A due decision with zero delay routed to the named integration types.
#[must_use]
pub fn due(from: &str, kinds: &[&str]) -> PingDecision {
    decision(
        from,
        1,
        0,
        true,
        true,
        kinds.iter().copied().map(Integration::new).collect(),
    )
}
