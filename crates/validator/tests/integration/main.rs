//! Integration tests for flowcheck-validator.

mod composition;
mod fixtures;
mod parallel;
mod user_rules;
