use std::time::Duration;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 4;
pub const DEFAULT_MIN_WAIT: Duration = Duration::from_secs(1);

/// Bounded retransmission schedule: attempt `k` waits `min_wait << k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub min_wait: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, min_wait: Duration) -> Self {
        Self {
            max_attempts,
            min_wait,
        }
    }

    /// Receive timeout for the zero-based `attempt`.
    pub fn timeout_for(&self, attempt: u32) -> Duration {
        self.min_wait.saturating_mul(1u32 << attempt.min(31))
    }

    /// Sum of every per-attempt timeout, the longest a lookup can block.
    pub fn total_wait(&self) -> Duration {
        (0..self.max_attempts).fold(Duration::ZERO, |acc, attempt| {
            acc.saturating_add(self.timeout_for(attempt))
        })
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_MIN_WAIT)
    }
}
