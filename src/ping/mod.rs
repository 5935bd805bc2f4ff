//! Rule evaluation and dispatch planning for review reminders.
//!
//! The pipeline is pure: review requests go in, [`PingDecision`]s come out,
//! and [`group_by_integration`] fans the due ones out per integration type
//! for a [`ChannelRegistry`] to deliver.

pub mod dispatch;
pub mod format;
pub mod model;
pub mod registry;
pub mod resolver;
pub mod rules;

pub use dispatch::{DispatchGroup, DispatchPlan, group_by_integration};
pub use format::{PullRequestContext, TemplateData, format_elapsed, full_info, round_to_hour};
pub use model::{
    DEFAULT_INTEGRATION, GlobPattern, Integration, PingDecision, PingDefaults, ReviewRequest,
    ReviewerStatus, Rule,
};
pub use registry::{
    Channel, ChannelFailure, ChannelRegistry, DispatchContext, DispatchReport,
};
pub use resolver::{Clock, FixedClock, SystemClock, apply_rules, resolve, should_ping};
pub use rules::{RuleSet, find_matching_rule};
