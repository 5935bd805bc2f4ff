//! Unit tests for configuration loading and precedence.
//!
//! Tests are organised into modules by functional area:
//! - `helpers`: Shared test utilities
//! - `precedence`: Layer precedence tests
//! - `field_resolution`: Token, PR number, API URL, and defaults resolution
//! - `rule_file`: Rule file selection
//! - `validation`: Rejection of malformed inputs

mod helpers;
mod rule_file;
