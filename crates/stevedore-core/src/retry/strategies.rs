//! Retry delay strategies and predicates
//!
//! This module implements the delay calculation for each backoff strategy
//! and the predicates that decide whether a given failure is eligible for
//! another attempt.

use crate::types::{RetryPolicy, RetryStrategy};
use rand::Rng;
use std::time::Duration;

/// Calculate the delay before the next retry attempt
///
/// # Arguments
///
/// * `policy` - The retry policy containing strategy and timing parameters
/// * `attempt` - The index of the attempt that just failed (0-indexed)
/// * `jitter` - Whether to apply random jitter to the delay
///
/// # Example
///
/// ```rust
/// use stevedore_core::retry::calculate_delay;
/// use stevedore_core::types::{RetryPolicy, RetryStrategy};
///
/// let policy = RetryPolicy {
///     max_retries: 3,
///     strategy: RetryStrategy::FixedDelay,
///     backoff_multiplier: 2.0,
///     initial_delay_ms: 1000,
///     max_delay_ms: 30000,
/// };
///
/// assert_eq!(calculate_delay(&policy, 0, false).as_millis(), 1000);
/// assert_eq!(calculate_delay(&policy, 2, false).as_millis(), 1000);
/// ```
pub fn calculate_delay(policy: &RetryPolicy, attempt: u32, jitter: bool) -> Duration {
    let base_delay_ms = match policy.strategy {
        RetryStrategy::None => 0,

        RetryStrategy::FixedDelay => policy.initial_delay_ms,

        RetryStrategy::ExponentialBackoff => {
            let multiplier = policy.backoff_multiplier.powf(attempt as f64);
            (policy.initial_delay_ms as f64 * multiplier) as u64
        }

        RetryStrategy::LinearBackoff => policy.initial_delay_ms * (attempt as u64 + 1),
    };

    let capped_delay_ms = base_delay_ms.min(policy.max_delay_ms);

    // Jitter adds up to 25% random variation
    let final_delay_ms = if jitter && capped_delay_ms > 0 {
        let jitter_range = capped_delay_ms / 4;
        let jitter_value = rand::rng().random_range(0..=jitter_range);
        capped_delay_ms + jitter_value
    } else {
        capped_delay_ms
    };

    Duration::from_millis(final_delay_ms)
}

/// A predicate that determines whether a failure should be retried
///
/// Implement this trait to customize which failures are eligible for
/// another attempt. Rejection takes priority over the remaining budget:
/// a rejected failure escapes immediately, even on the first attempt.
pub trait RetryPredicate<E: ?Sized>: Send + Sync {
    /// Determine whether the given failure should be retried
    fn should_retry(&self, error: &E) -> bool;
}

/// A predicate that always returns true (all failures are retryable)
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysRetry;

impl<E: ?Sized> RetryPredicate<E> for AlwaysRetry {
    fn should_retry(&self, _error: &E) -> bool {
        true
    }
}

/// A predicate that never retries
#[derive(Debug, Clone, Copy)]
pub struct NeverRetry;

impl<E: ?Sized> RetryPredicate<E> for NeverRetry {
    fn should_retry(&self, _error: &E) -> bool {
        false
    }
}

/// A predicate that uses a closure to determine retryability
pub struct ClosurePredicate<F> {
    predicate: F,
}

impl<F> ClosurePredicate<F> {
    /// Create a new closure-based predicate
    pub fn new(predicate: F) -> Self {
        Self { predicate }
    }
}

impl<E, F> RetryPredicate<E> for ClosurePredicate<F>
where
    F: Fn(&E) -> bool + Send + Sync,
{
    fn should_retry(&self, error: &E) -> bool {
        (self.predicate)(error)
    }
}

/// Classification tag identifying the category of an operation failure
///
/// The set is closed: selective retry is an explicit membership test over
/// these tags, never an inspection of the error's concrete type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// A command exited non-zero or could not be executed
    Execution,

    /// An operation exceeded its time budget
    Timeout,

    /// The host refused the operation
    Permission,

    /// A required tool or resource is absent
    NotFound,

    /// Anything else
    Other,
}

/// A trait for errors that carry a [`FailureKind`] tag
pub trait FailureClass {
    /// Get the failure kind for this error
    fn failure_kind(&self) -> FailureKind;
}

/// A predicate that retries only failures whose kind is in an allowed set
///
/// # Example
///
/// ```rust
/// use stevedore_core::retry::{FailureKind, KindPredicate};
///
/// let predicate = KindPredicate::single(FailureKind::Execution);
/// assert!(predicate.allows(FailureKind::Execution));
/// assert!(!predicate.allows(FailureKind::Permission));
/// ```
#[derive(Debug, Clone)]
pub struct KindPredicate {
    allowed: Vec<FailureKind>,
}

impl KindPredicate {
    /// Create a predicate allowing the given kinds
    pub fn new(kinds: impl IntoIterator<Item = FailureKind>) -> Self {
        Self {
            allowed: kinds.into_iter().collect(),
        }
    }

    /// Create a predicate allowing exactly one kind
    pub fn single(kind: FailureKind) -> Self {
        Self::new([kind])
    }

    /// Check whether a kind is in the allowed set
    pub fn allows(&self, kind: FailureKind) -> bool {
        self.allowed.contains(&kind)
    }
}

impl<E: FailureClass> RetryPredicate<E> for KindPredicate {
    fn should_retry(&self, error: &E) -> bool {
        self.allows(error.failure_kind())
    }
}
