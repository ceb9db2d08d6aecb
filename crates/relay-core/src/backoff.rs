//! Polling delay schedule.
//!
//! Multiplicative growth with a hard ceiling and no jitter:
//! `delay(k+1) = min(delay(k) * factor, max)`. With the default policy the
//! sequence is 500, 750, 1125, 1687.5, 2531.25, 3000, 3000, ... ms.

use std::time::Duration;

use relay_types::PollPolicy;

/// Infinite, non-decreasing sequence of delays.
#[derive(Debug, Clone)]
pub struct Backoff {
    current: Duration,
    max: Duration,
    factor: f64,
}

impl Backoff {
    /// `initial` above `max` is clamped; `factor` below 1.0 is raised to 1.0.
    pub fn new(initial: Duration, max: Duration, factor: f64) -> Self {
        Self { current: initial.min(max), max, factor: factor.max(1.0) }
    }

    pub fn from_policy(policy: &PollPolicy) -> Self {
        Self::new(policy.initial_delay(), policy.max_delay(), policy.growth_factor)
    }

    /// Delay the next call to [`Backoff::next_delay`] will return.
    pub const fn peek(&self) -> Duration {
        self.current
    }

    /// Return the current delay and advance the schedule.
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        self.current = self.current.mul_f64(self.factor).min(self.max);
        delay
    }
}

impl Iterator for Backoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        Some(self.next_delay())
    }
}

/// Longest a full polling sequence can spend sleeping: one delay between each
/// pair of consecutive attempts.
pub fn worst_case_wait(policy: &PollPolicy) -> Duration {
    Backoff::from_policy(policy)
        .take(policy.max_attempts.saturating_sub(1) as usize)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: f64) -> Duration {
        Duration::from_secs_f64(v / 1000.0)
    }

    #[test]
    fn test_default_schedule() {
        let delays = Backoff::from_policy(&PollPolicy::default()).take(8).collect::<Vec<_>>();
        assert_eq!(
            delays,
            vec![
                ms(500.0),
                ms(750.0),
                ms(1125.0),
                ms(1687.5),
                ms(2531.25),
                ms(3000.0),
                ms(3000.0),
                ms(3000.0)
            ]
        );
    }

    #[test]
    fn test_monotonic_and_capped() {
        let policies = [
            PollPolicy::default(),
            PollPolicy { initial_delay_ms: 1, max_delay_ms: 10_000, growth_factor: 2.0, ..PollPolicy::default() },
            PollPolicy { initial_delay_ms: 3000, max_delay_ms: 3000, ..PollPolicy::default() },
            PollPolicy { initial_delay_ms: 0, max_delay_ms: 100, ..PollPolicy::default() },
        ];

        for policy in policies {
            let mut backoff = Backoff::from_policy(&policy);
            let mut prev = backoff.next_delay();
            for _ in 0..50 {
                let expected = prev.mul_f64(policy.growth_factor).min(policy.max_delay());
                let next = backoff.next_delay();
                assert_eq!(next, expected);
                assert!(next >= prev, "delay decreased: {:?} -> {:?}", prev, next);
                assert!(next <= policy.max_delay());
                prev = next;
            }
        }
    }

    #[test]
    fn test_initial_above_max_is_clamped() {
        let mut backoff = Backoff::new(Duration::from_secs(10), Duration::from_secs(1), 1.5);
        assert_eq!(backoff.peek(), Duration::from_secs(1));
        assert_eq!(backoff.next_delay(), Duration::from_secs(1));
    }

    #[test]
    fn test_worst_case_wait_default_policy() {
        // 9 sleeps between 10 attempts
        let expected = ms(500.0 + 750.0 + 1125.0 + 1687.5 + 2531.25 + 3000.0 * 4.0);
        assert_eq!(worst_case_wait(&PollPolicy::default()), expected);
    }

    #[test]
    fn test_worst_case_wait_single_attempt() {
        let policy = PollPolicy { max_attempts: 1, ..PollPolicy::default() };
        assert_eq!(worst_case_wait(&policy), Duration::ZERO);
    }
}
