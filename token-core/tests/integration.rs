//! Integration Tests
//!
//! This module aggregates all integration tests for the token core facade.

#[path = "integration/token_lifecycle_test.rs"]
mod token_lifecycle_test;

#[path = "integration/policy_engine_integration_test.rs"]
mod policy_engine_integration_test;
