//! Unit tests for the GitHub module.
