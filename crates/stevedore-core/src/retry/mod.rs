//! Retry execution engine with policy-based configuration
//!
//! The engine executes a fallible async operation until it succeeds or its
//! retry budget is exhausted. A budget of `n` means at most `n + 1`
//! invocations, with the configured delay between attempts and no delay
//! after the final one.
//!
//! Failures can be filtered before the budget is consulted: a
//! [`RetryPredicate`] that rejects a failure makes it escape immediately,
//! even on the first attempt. For errors carrying a [`FailureKind`] tag,
//! [`KindPredicate`] performs an explicit set-membership check instead of
//! any type-based inspection.
//!
//! # Example
//!
//! ```rust,no_run
//! use stevedore_core::retry::{retry_with_policy, RetryError};
//! use stevedore_core::types::RetryPolicy;
//!
//! async fn example() -> Result<String, RetryError<std::io::Error>> {
//!     let policy = RetryPolicy::default();
//!
//!     retry_with_policy(&policy, || async {
//!         // Your fallible operation here
//!         Ok("success".to_string())
//!     })
//!     .await
//! }
//! ```

mod error;
mod executor;
mod observer;
mod strategies;

pub use error::RetryError;
pub use executor::{retry_with_policy, RetryExecutor, RetryExecutorBuilder};
pub use observer::{NoOpObserver, RetryObserver, StatsObserver, TracingObserver};
pub use strategies::{
    calculate_delay, AlwaysRetry, ClosurePredicate, FailureClass, FailureKind, KindPredicate,
    NeverRetry, RetryPredicate,
};
