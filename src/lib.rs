//! Gong library crate: reminders for pull request reviewers.
//!
//! A run reads the pending review requests of one pull request, resolves each
//! reviewer against the configured rules into a ping decision, groups the
//! decisions by integration, and hands every group to its notification
//! channel (console, pull request comment, Slack webhook, or GitHub Actions
//! outputs).
//!
//! The decision logic in [`ping`] is pure; [`github`], [`channels`],
//! [`config`], and [`local`] supply the I/O around it and [`pipeline`] ties
//! them together.

pub mod channels;
pub mod config;
pub mod error;
pub mod github;
pub mod local;
pub mod ping;
pub mod pipeline;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::GongConfig;
pub use error::PingError;
pub use pipeline::{PingJob, PingOutcome, PingPipeline};
