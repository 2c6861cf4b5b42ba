//! Wait Mechanisms
//!
//! Bounded polling waits and the settle step that separates a commit key from
//! the output read.
//!
//! The target UI exposes no "rendering complete" signal, so settling is
//! either an unconditional pause ([`Settle::Fixed`]) or a poll that waits for
//! the output region to read the same value across consecutive samples
//! ([`Settle::Stable`]).

use crate::driver::PageDriver;
use crate::locator::{Locator, Selector};
use crate::result::{ProbeError, ProbeResult};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Default timeout for wait operations (30 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 30_000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Settle pause for a standalone round-trip
pub const DEFAULT_SETTLE_MS: u64 = 2_500;

/// Settle pause when two round-trips are chained on one page
pub const CHAINED_SETTLE_MS: u64 = 2_000;

// =============================================================================
// WAIT OPTIONS
// =============================================================================

/// Options for wait operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
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

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
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

// =============================================================================
// WAIT RESULT
// =============================================================================

/// Result of a successful wait operation
#[derive(Debug, Clone)]
pub struct WaitResult {
    /// Time spent waiting
    pub elapsed: Duration,
    /// Description of what was waited for
    pub waited_for: String,
}

// =============================================================================
// POLLING
// =============================================================================

/// Poll `probe` until it reports `true` or the timeout elapses.
///
/// The probe runs at least once. Probe errors propagate immediately.
pub async fn wait_for<F, Fut>(
    waited_for: impl Into<String>,
    options: &WaitOptions,
    mut probe: F,
) -> ProbeResult<WaitResult>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ProbeResult<bool>>,
{
    let waited_for = waited_for.into();
    let start = Instant::now();

    loop {
        if probe().await? {
            return Ok(WaitResult {
                elapsed: start.elapsed(),
                waited_for,
            });
        }
        if start.elapsed() >= options.timeout() {
            return Err(ProbeError::Timeout {
                ms: options.timeout_ms,
                waited_for,
            });
        }
        tokio::time::sleep(options.poll_interval()).await;
    }
}

/// Wait until at least `min` elements match `selector`
pub async fn wait_for_count<P: PageDriver + ?Sized>(
    page: &P,
    selector: &Selector,
    min: usize,
    options: &WaitOptions,
) -> ProbeResult<WaitResult> {
    wait_for(format!("{min}+ elements matching {selector}"), options, || async move {
        Ok::<_, ProbeError>(page.count(selector).await? >= min)
    })
    .await
}

// =============================================================================
// SETTLE
// =============================================================================

/// How to let the remote page finish rendering after a commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum Settle {
    /// Unconditional pause
    Fixed {
        /// Pause length in milliseconds
        ms: u64,
    },
    /// Pause, then poll the output until it stops changing
    Stable {
        /// Pause before the first sample
        min_wait_ms: u64,
        /// Interval between samples
        poll_interval_ms: u64,
        /// Consecutive identical samples required
        stable_samples: u32,
        /// Budget for the sampling phase
        timeout_ms: u64,
    },
}

impl Default for Settle {
    fn default() -> Self {
        Self::fixed(DEFAULT_SETTLE_MS)
    }
}

impl Settle {
    /// Fixed pause of `ms` milliseconds
    #[must_use]
    pub const fn fixed(ms: u64) -> Self {
        Self::Fixed { ms }
    }

    /// Stability polling with the given minimum wait and sensible sampling defaults
    #[must_use]
    pub const fn stable(min_wait_ms: u64) -> Self {
        Self::Stable {
            min_wait_ms,
            poll_interval_ms: 250,
            stable_samples: 3,
            timeout_ms: 10_000,
        }
    }

    /// Let the page settle, sampling `output` when the strategy polls
    pub async fn settle<P: PageDriver + ?Sized>(
        &self,
        page: &P,
        output: &Locator,
    ) -> ProbeResult<Duration> {
        let start = Instant::now();
        match *self {
            Self::Fixed { ms } => {
                tokio::time::sleep(Duration::from_millis(ms)).await;
            }
            Self::Stable {
                min_wait_ms,
                poll_interval_ms,
                stable_samples,
                timeout_ms,
            } => {
                tokio::time::sleep(Duration::from_millis(min_wait_ms)).await;
                let deadline = Instant::now() + Duration::from_millis(timeout_ms);
                let mut last: Option<Option<String>> = None;
                let mut streak = 0_u32;
                loop {
                    let value = page.input_value(output).await?;
                    if last.as_ref() == Some(&value) {
                        streak += 1;
                    } else {
                        last = Some(value);
                        streak = 1;
                    }
                    if streak >= stable_samples.max(1) {
                        break;
                    }
                    if Instant::now() >= deadline {
                        return Err(ProbeError::Timeout {
                            ms: timeout_ms,
                            waited_for: format!("{output} to stop changing"),
                        });
                    }
                    tokio::time::sleep(Duration::from_millis(poll_interval_ms)).await;
                }
            }
        }
        let elapsed = start.elapsed();
        debug!(?elapsed, strategy = ?self, "page settled");
        Ok(elapsed)
    }
}

// =============================================================================
// TESTS
// =============================================================================
