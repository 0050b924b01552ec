//! Deadline tracking for bounded waits.
//!
//! # Responsibilities
//! - Track the time left before a dependency's wait gives up
//! - Bound each connect attempt by both its own limit and the deadline

use std::time::Duration;
use tokio::time::Instant;

/// Furthest a deadline is placed in the future (about thirty years).
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// A point in time after which a wait is abandoned.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    at: Instant,
}

impl Deadline {
    /// Deadline `limit` from now, capped at [`FAR_FUTURE`].
    pub fn after(limit: Duration) -> Self {
        let started = Instant::now();
        let at = started
            .checked_add(limit.min(FAR_FUTURE))
            .unwrap_or(started);
        Self { started, at }
    }

    /// Time left, zero once expired.
    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }

    pub fn is_expired(&self) -> bool {
        self.remaining().is_zero()
    }

    /// Time since the deadline was created.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// `limit`, shortened to whatever is left before the deadline.
    pub fn clamp(&self, limit: Duration) -> Duration {
        limit.min(self.remaining())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn deadline_counts_down() {
        let deadline = Deadline::after(Duration::from_secs(2));
        assert!(!deadline.is_expired());
        assert_eq!(deadline.clamp(Duration::from_secs(5)), Duration::from_secs(2));
        assert_eq!(deadline.clamp(Duration::from_millis(10)), Duration::from_millis(10));

        tokio::time::advance(Duration::from_millis(1500)).await;
        assert_eq!(deadline.remaining(), Duration::from_millis(500));
        assert_eq!(deadline.elapsed(), Duration::from_millis(1500));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(deadline.is_expired());
        assert_eq!(deadline.clamp(Duration::from_secs(1)), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn oversized_limit_is_capped() {
        let deadline = Deadline::after(Duration::from_secs(u64::MAX));
        assert!(!deadline.is_expired());
        assert_eq!(deadline.remaining(), FAR_FUTURE);

        let deadline = Deadline::after(Duration::MAX);
        assert_eq!(deadline.clamp(Duration::from_secs(1)), Duration::from_secs(1));
    }
}
