// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Retry decision for automation calls rejected by a busy peer.
//!
//! Visual Studio routinely rejects calls while it is still starting up or
//! busy on its UI thread. The installed message filter consults
//! [`RetryPolicy::should_retry`] for every rejected call.

use std::time::Duration;

/// Interval between retries of a rejected call, and between polls.
pub const RETRY_INTERVAL: Duration = Duration::from_millis(150);

/// Ceiling on the time spent retrying a single rejected call.
pub const CALL_RETRY_TIMEOUT: Duration = Duration::from_secs(10);

/// Why the peer refused an outbound call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The callee rejected the call outright (`SERVERCALL_REJECTED`).
    Rejected,
    /// The callee is busy and asked us to try again (`SERVERCALL_RETRYLATER`).
    RetryLater,
    /// Any other raw reject status.
    Other(u32),
}

impl RejectReason {
    /// Decode the raw reject type handed to a message filter.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            1 => Self::Rejected,
            2 => Self::RetryLater,
            other => Self::Other(other),
        }
    }
}

/// Outcome of [`RetryPolicy::should_retry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Re-issue the call after the given delay.
    RetryAfter(Duration),
    /// Hand the decision to the previously installed filter, or give up.
    Defer,
}

/// Fixed-interval, fixed-ceiling retry policy for rejected calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub interval: Duration,
    pub ceiling: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            interval: RETRY_INTERVAL,
            ceiling: CALL_RETRY_TIMEOUT,
        }
    }
}

impl RetryPolicy {
    pub fn new(interval: Duration, ceiling: Duration) -> Self {
        Self { interval, ceiling }
    }

    /// Decide whether a rejected call should be re-issued.
    ///
    /// Pure function of the time already spent on the call and the reject
    /// reason: only busy/rejected statuses are retried, and only while
    /// `elapsed` is below the ceiling.
    pub fn should_retry(&self, elapsed: Duration, reason: RejectReason) -> RetryDecision {
        match reason {
            RejectReason::Rejected | RejectReason::RetryLater if elapsed < self.ceiling => {
                RetryDecision::RetryAfter(self.interval)
            }
            _ => RetryDecision::Defer,
        }
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
