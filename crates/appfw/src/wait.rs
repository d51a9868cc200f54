//! Explicit waits.
//!
//! A bounded poll loop: probe, sleep, probe again until the probe reports a
//! value or the deadline passes. The probe is always run at least once, so a
//! zero timeout still performs a single lookup.

use std::time::{Duration, Instant};

use crate::result::AppResult;

/// Default timeout for element lookups (10 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 10_000;

/// Default polling interval (250ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 250;

/// Options for wait operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Set polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_ms = interval.as_millis() as u64;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Outcome of a finished wait
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitOutcome<T> {
    /// The probe produced a value
    Ready {
        /// Produced value
        value: T,
        /// Number of probes run
        attempts: u32,
    },
    /// The deadline passed first
    TimedOut {
        /// Number of probes run
        attempts: u32,
    },
}

impl<T> WaitOutcome<T> {
    /// The value, if ready
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Ready { value, .. } => Some(value),
            Self::TimedOut { .. } => None,
        }
    }

    /// Probes performed
    pub const fn attempts(&self) -> u32 {
        match self {
            Self::Ready { attempts, .. } | Self::TimedOut { attempts } => *attempts,
        }
    }
}

/// Poll `probe` until it returns `Some` or `options.timeout()` elapses.
///
/// Errors from the probe abort the wait and are returned as-is; only the
/// "not yet" answer (`Ok(None)`) is retried.
pub fn poll_until<T, F>(options: &WaitOptions, mut probe: F) -> AppResult<WaitOutcome<T>>
where
    F: FnMut() -> AppResult<Option<T>>,
{
    let start = Instant::now();
    let timeout = options.timeout();
    let mut attempts = 0;

    loop {
        attempts += 1;
        if let Some(value) = probe()? {
            return Ok(WaitOutcome::Ready { value, attempts });
        }

        let elapsed = start.elapsed();
        if elapsed >= timeout {
            return Ok(WaitOutcome::TimedOut { attempts });
        }
        std::thread::sleep(options.poll_interval().min(timeout - elapsed));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::AppError;

    fn fast(timeout_ms: u64) -> WaitOptions {
        WaitOptions::new()
            .with_timeout(Duration::from_millis(timeout_ms))
            .with_poll_interval(Duration::from_millis(1))
    }

    #[test]
    fn test_defaults() {
        let options = WaitOptions::default();
        assert_eq!(options.timeout(), Duration::from_secs(10));
        assert_eq!(options.poll_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_immediate_success() {
        let outcome = poll_until(&fast(100), || Ok(Some(7))).unwrap();
        assert_eq!(outcome, WaitOutcome::Ready { value: 7, attempts: 1 });
    }

    #[test]
    fn test_success_after_retries() {
        let mut calls = 0;
        let outcome = poll_until(&fast(5_000), || {
            calls += 1;
            Ok((calls == 3).then_some("found"))
        })
        .unwrap();
        assert_eq!(outcome.attempts(), 3);
        assert_eq!(outcome.into_value(), Some("found"));
    }

    #[test]
    fn test_zero_timeout_probes_once() {
        let mut calls = 0;
        let outcome: WaitOutcome<()> = poll_until(&fast(0), || {
            calls += 1;
            Ok(None)
        })
        .unwrap();
        assert_eq!(outcome, WaitOutcome::TimedOut { attempts: 1 });
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_timeout_returns_timed_out() {
        let started = Instant::now();
        let outcome: WaitOutcome<u8> = poll_until(&fast(20), || Ok(None)).unwrap();
        assert!(outcome.into_value().is_none());
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_probe_error_aborts() {
        let mut calls = 0;
        let result: AppResult<WaitOutcome<()>> = poll_until(&fast(1_000), || {
            calls += 1;
            Err(AppError::driver("session gone"))
        });
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }
}
