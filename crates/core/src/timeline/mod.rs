//! Time sources and the single-slot tick timer underneath the player.
//!
//! Time is expressed as a [`Duration`] measured from an arbitrary origin fixed
//! when the clock is created. Deadlines live on the same axis.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Monotonic time source.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall-clock time backed by [`std::time::Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Virtual time that only moves when told to.
///
/// Clones share the same reading, so a host can keep one handle and give
/// another to a player.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, delta: Duration) {
        let delta = u64::try_from(delta.as_nanos()).unwrap_or(u64::MAX);
        let _ = self
            .nanos
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |nanos| {
                Some(nanos.saturating_add(delta))
            });
    }

    pub fn set(&self, now: Duration) {
        let now = u64::try_from(now.as_nanos()).unwrap_or(u64::MAX);
        self.nanos.store(now, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
    }
}

const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// Time as seen by the tokio runtime, including paused test time.
#[derive(Debug, Clone, Copy)]
pub struct TokioClock {
    origin: tokio::time::Instant,
}

impl TokioClock {
    pub fn new() -> Self {
        Self {
            origin: tokio::time::Instant::now(),
        }
    }

    /// Converts a deadline on this clock's axis back into a tokio instant.
    /// Offsets past what the platform can represent land on a far-future
    /// instant instead.
    pub fn instant_at(&self, offset: Duration) -> tokio::time::Instant {
        self.origin
            .checked_add(offset)
            .unwrap_or_else(|| self.origin + FAR_FUTURE)
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TokioClock {
    fn now(&self) -> Duration {
        tokio::time::Instant::now().saturating_duration_since(self.origin)
    }
}

/// Single-shot timer with exactly one slot.
///
/// Arming replaces whatever was pending, so two live ticks cannot coexist.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickTimer {
    deadline: Option<Duration>,
}

impl TickTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, deadline: Duration) {
        self.deadline = Some(deadline);
    }

    /// Clears the pending deadline, returning it if there was one.
    pub fn cancel(&mut self) -> Option<Duration> {
        self.deadline.take()
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn is_due(&self, now: Duration) -> bool {
        self.deadline.is_some_and(|deadline| deadline <= now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let other = clock.clone();

        clock.advance(Duration::from_millis(40));
        other.advance(Duration::from_millis(2));

        assert_eq!(clock.now(), Duration::from_millis(42));
        other.set(Duration::from_secs(1));
        assert_eq!(clock.now(), Duration::from_secs(1));
    }

    #[test]
    fn manual_clock_saturates_instead_of_wrapping() {
        let clock = ManualClock::new();
        clock.advance(Duration::from_secs(10));
        clock.advance(Duration::MAX);
        let ceiling = Duration::from_nanos(u64::MAX);
        assert_eq!(clock.now(), ceiling);

        clock.advance(Duration::from_secs(1));
        assert_eq!(clock.now(), ceiling);
    }

    #[test]
    fn arming_replaces_pending_deadline() {
        let mut timer = TickTimer::new();
        timer.arm(Duration::from_millis(100));
        timer.arm(Duration::from_millis(300));

        assert_eq!(timer.deadline(), Some(Duration::from_millis(300)));
        assert!(!timer.is_due(Duration::from_millis(100)));
        assert!(timer.is_due(Duration::from_millis(300)));

        assert_eq!(timer.cancel(), Some(Duration::from_millis(300)));
        assert!(!timer.is_armed());
        assert!(!timer.is_due(Duration::from_secs(10)));
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_clock_follows_paused_time() {
        let clock = TokioClock::new();
        tokio::time::advance(Duration::from_millis(250)).await;
        assert_eq!(clock.now(), Duration::from_millis(250));
        assert_eq!(
            clock.instant_at(Duration::from_millis(250)),
            tokio::time::Instant::now()
        );
        assert!(clock.instant_at(Duration::MAX) > tokio::time::Instant::now());
    }
}
