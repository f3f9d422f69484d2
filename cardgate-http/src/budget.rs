//! Time budget shared by the connect and read phases of one exchange.

use std::time::Duration;

use tokio::time::Instant;

/// A fixed start instant and the total time allowed from it.
#[derive(Debug, Clone, Copy)]
pub struct Budget {
    started: Instant,
    total: Duration,
}

impl Budget {
    /// Starts a budget now.
    #[must_use]
    pub fn start(total: Duration) -> Self {
        Self {
            started: Instant::now(),
            total,
        }
    }

    /// Time left, zero once spent.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.total.saturating_sub(self.started.elapsed())
    }

    /// Time left, but never less than `floor`.
    #[must_use]
    pub fn remaining_at_least(&self, floor: Duration) -> Duration {
        self.remaining().max(floor)
    }

    /// Whether no time is left.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.remaining().is_zero()
    }
}
