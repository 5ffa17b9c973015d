//! Retry execution engine
//!
//! The executor drives an async operation through its retry budget:
//! at most `max_retries + 1` invocations, a strategy-computed delay
//! between attempts, no delay after the final one, and predicate
//! filtering that takes priority over the remaining budget.

use std::error::Error;
use std::future::Future;
use std::time::Instant;

use crate::types::RetryPolicy;

use super::error::RetryError;
use super::observer::{NoOpObserver, RetryObserver};
use super::strategies::{calculate_delay, AlwaysRetry, RetryPredicate};

/// Execute an async operation with retry logic based on a policy
///
/// This is a convenience function for simple retry scenarios where every
/// failure is retryable. For kind filtering or observation, use
/// [`RetryExecutorBuilder`].
///
/// # Example
///
/// ```rust,no_run
/// use stevedore_core::retry::retry_with_policy;
/// use stevedore_core::types::RetryPolicy;
///
/// async fn example() {
///     let policy = RetryPolicy::default();
///
///     let result = retry_with_policy(&policy, || async {
///         // Simulated operation that might fail
///         Ok::<_, std::io::Error>("success")
///     })
///     .await;
/// }
/// ```
pub async fn retry_with_policy<F, Fut, T, E>(policy: &RetryPolicy, op: F) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Error + Send + 'static,
{
    RetryExecutorBuilder::new()
        .with_policy(policy.clone())
        .build()
        .execute(op)
        .await
}

/// Builder for configuring a [`RetryExecutor`]
///
/// # Example
///
/// ```rust
/// use stevedore_core::retry::{RetryExecutorBuilder, TracingObserver};
/// use stevedore_core::types::RetryPolicy;
///
/// let executor = RetryExecutorBuilder::new()
///     .with_policy(RetryPolicy::default())
///     .with_observer(TracingObserver::new("liveness-probe"))
///     .build();
/// ```
pub struct RetryExecutorBuilder<P = AlwaysRetry, O = NoOpObserver> {
    policy: RetryPolicy,
    predicate: P,
    observer: O,
    jitter: bool,
}

impl Default for RetryExecutorBuilder<AlwaysRetry, NoOpObserver> {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryExecutorBuilder<AlwaysRetry, NoOpObserver> {
    /// Create a new builder with default settings
    ///
    /// Jitter is off by default so the configured delay is exact; enable
    /// it when many callers share a target.
    pub fn new() -> Self {
        Self {
            policy: RetryPolicy::default(),
            predicate: AlwaysRetry,
            observer: NoOpObserver,
            jitter: false,
        }
    }
}

impl<P, O> RetryExecutorBuilder<P, O> {
    /// Set the retry policy
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the retry predicate
    ///
    /// The predicate decides whether a failure is eligible for another
    /// attempt. A rejected failure escapes immediately, even on the
    /// first attempt.
    pub fn with_predicate<P2>(self, predicate: P2) -> RetryExecutorBuilder<P2, O> {
        RetryExecutorBuilder {
            policy: self.policy,
            predicate,
            observer: self.observer,
            jitter: self.jitter,
        }
    }

    /// Set the observer
    pub fn with_observer<O2>(self, observer: O2) -> RetryExecutorBuilder<P, O2> {
        RetryExecutorBuilder {
            policy: self.policy,
            predicate: self.predicate,
            observer,
            jitter: self.jitter,
        }
    }

    /// Enable or disable jitter on inter-attempt delays
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Build the executor
    pub fn build(self) -> RetryExecutor<P, O> {
        RetryExecutor {
            policy: self.policy,
            predicate: self.predicate,
            observer: self.observer,
            jitter: self.jitter,
        }
    }
}

/// A retry executor with configurable policy, predicate, and observer
///
/// Use [`RetryExecutorBuilder`] to create an instance. The executor holds
/// no mutable state: each `execute` call is independent and safe to run
/// concurrently.
pub struct RetryExecutor<P, O> {
    policy: RetryPolicy,
    predicate: P,
    observer: O,
    jitter: bool,
}

impl<P, O> RetryExecutor<P, O>
where
    O: RetryObserver,
{
    /// Execute an operation with retry logic
    ///
    /// Invokes `op` between 1 and `max_retries + 1` times. A success ends
    /// the loop immediately without a trailing delay; the result is never
    /// inspected. A failure the predicate rejects propagates at once; an
    /// eligible failure consumes budget and sleeps the strategy delay
    /// before the next attempt.
    pub async fn execute<F, Fut, T, E>(&self, mut op: F) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Error + Send + 'static,
        P: RetryPredicate<E>,
    {
        let start = Instant::now();
        let budget = self.policy.max_retries;
        let total = self.policy.total_attempts();

        for attempt in 0..=budget {
            self.observer.on_attempt_start(attempt + 1, total);

            match op().await {
                Ok(result) => {
                    self.observer.on_success(attempt + 1, start.elapsed());
                    return Ok(result);
                }
                Err(err) => {
                    // Filtering takes priority over the remaining budget
                    if !self.predicate.should_retry(&err) {
                        self.observer.on_rejected(attempt + 1, &err);
                        return Err(RetryError::non_retryable(err));
                    }

                    if attempt == budget {
                        self.observer.on_exhausted(total, &err);
                        return Err(RetryError::exhausted(total, err, start.elapsed()));
                    }

                    let delay = calculate_delay(&self.policy, attempt, self.jitter);
                    self.observer.on_attempt_failed(attempt + 1, &err, delay);

                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        // The final iteration always returns above
        unreachable!("retry loop exits via success, rejection, or exhaustion")
    }
}
