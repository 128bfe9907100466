//! Test modules for the recent-topics service.
//!
//! This module contains crate-internal testing infrastructure:
//! - Configuration loading and validation tests
//! - Error taxonomy tests
//! - Registry tests against mocked and instrumented stores
//! - Property-based tracker tests
//! - Shared fixtures and store doubles


// Re-export commonly used testing tools to simplify imports in test modules
pub use test_utils::{tag_strategy, CountingStore, FailingStore, TestFixture};
