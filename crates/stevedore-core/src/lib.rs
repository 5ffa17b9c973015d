//! # stevedore-core
//!
//! Core library for the Stevedore system-test harness providing:
//! - Retry execution engine with policy-based configuration
//! - Failure-kind classification for selective retry
//! - Policy types shared with the harness configuration

pub mod retry;
pub mod types;

pub use retry::{retry_with_policy, RetryError, RetryExecutor, RetryExecutorBuilder};
pub use types::{RetryPolicy, RetryStrategy};
