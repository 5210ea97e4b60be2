//! The welcome-email job: payload, worker task, and retry policy.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;
use underway::task::{Result as TaskResult, RetryPolicy};
use underway::{Queue, Task};

use crate::error::Result;

/// Queue the welcome-email task is routed through.
///
/// The queue name doubles as the job kind: underway dispatches every task on
/// this queue to the worker built for [`WelcomeEmailTask`].
pub const DEFAULT_QUEUE: &str = "welcome_email";

/// Rolling window within which identical submissions collapse to one job.
pub const DEDUP_WINDOW: Duration = Duration::from_secs(4 * 60 * 60);

/// Fixed delay before each retry attempt, in milliseconds.
pub const RETRY_DELAY_MS: i32 = 10_000;

/// Lower bound of the simulated work delay, in seconds.
const MIN_WORK_SECS: u64 = 1;

/// Upper bound of the simulated work delay, in seconds.
const MAX_WORK_SECS: u64 = 10;

/// Payload for one welcome-email job.
///
/// The email is accepted as-is; no validation is performed locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WelcomeEmail {
    /// Recipient address.
    pub email: String,
}

/// Worker for [`WelcomeEmail`] jobs.
///
/// Stateless; one instance lives for the process lifetime. The "work" is a
/// random 1–10 second sleep standing in for variable-latency processing.
#[derive(Debug, Default, Clone, Copy)]
pub struct WelcomeEmailTask;

/// Build the welcome-email queue on the given pool.
///
/// Creating the queue also registers it in the queue tables, so producers and
/// workers both go through this before touching jobs.
pub async fn build_queue(pool: &PgPool) -> Result<Queue<WelcomeEmailTask>> {
    let queue = Queue::builder()
        .name(DEFAULT_QUEUE)
        .pool(pool.clone())
        .build()
        .await?;
    Ok(queue)
}

/// Retry policy with a constant ten-second delay between attempts.
///
/// Initial and maximum intervals are pinned to the same value and the backoff
/// coefficient is 1.0, so the computed delay never grows with the attempt
/// count — unlike the queue's default exponential curve.
pub fn constant_retry_policy() -> RetryPolicy {
    RetryPolicy::builder()
        .initial_interval_ms(RETRY_DELAY_MS)
        .max_interval_ms(RETRY_DELAY_MS)
        .backoff_coefficient(1.0)
        .build()
}

/// Draw a simulated work duration, uniform over 1..=10 seconds.
pub fn simulated_work_delay<R: Rng>(rng: &mut R) -> Duration {
    Duration::from_secs(rng.gen_range(MIN_WORK_SECS..=MAX_WORK_SECS))
}

impl Task for WelcomeEmailTask {
    type Input = WelcomeEmail;
    type Output = ();

    async fn execute(
        &self,
        _tx: Transaction<'_, Postgres>,
        input: Self::Input,
    ) -> TaskResult<Self::Output> {
        debug!(email = %input.email, "Welcome email task started");

        let delay = simulated_work_delay(&mut rand::thread_rng());

        // The sleep stands in for real work and does not watch the shutdown
        // token; underway's worker drains in-flight tasks, so a mid-sleep task
        // runs to completion after a stop request.
        tokio::time::sleep(delay).await;

        debug!(
            email = %input.email,
            delay_secs = delay.as_secs(),
            "Welcome email task finished"
        );

        Ok(())
    }

    fn retry_policy(&self) -> RetryPolicy {
        constant_retry_policy()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn payload_round_trips_through_json() {
        let input = WelcomeEmail {
            email: "test_1234@example.com".to_string(),
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value, serde_json::json!({ "email": "test_1234@example.com" }));
        let back: WelcomeEmail = serde_json::from_value(value).unwrap();
        assert_eq!(back, input);
    }

    #[test]
    fn retry_policy_is_constant_not_default() {
        let expected = RetryPolicy::builder()
            .initial_interval_ms(10_000)
            .max_interval_ms(10_000)
            .backoff_coefficient(1.0)
            .build();
        assert_eq!(WelcomeEmailTask.retry_policy(), expected);
        assert_ne!(WelcomeEmailTask.retry_policy(), RetryPolicy::default());
    }

    #[test]
    fn simulated_delay_stays_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            let delay = simulated_work_delay(&mut rng);
            assert!(delay >= Duration::from_secs(1), "delay below 1s: {delay:?}");
            assert!(delay <= Duration::from_secs(10), "delay above 10s: {delay:?}");
            seen.insert(delay.as_secs());
        }
        // Inclusive bounds: both extremes are reachable.
        assert!(seen.contains(&1));
        assert!(seen.contains(&10));
    }

    #[test]
    fn dedup_window_is_four_hours() {
        assert_eq!(DEDUP_WINDOW, Duration::from_secs(14_400));
    }
}
