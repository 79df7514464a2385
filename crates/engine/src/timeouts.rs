// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Polling intervals and ceilings for every blocking wait.

use std::time::Duration;

use vsopen_core::retry::RETRY_INTERVAL;
use vsopen_core::RetryPolicy;

/// How long a freshly launched process may take to appear in the running object table.
pub const DISCOVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// How long a solution may take to report itself open.
pub const SOLUTION_LOAD_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Policy for calls rejected by a busy Visual Studio.
    pub call_retry: RetryPolicy,
    pub poll_interval: Duration,
    pub discovery: Duration,
    pub solution_load: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            call_retry: RetryPolicy::default(),
            poll_interval: RETRY_INTERVAL,
            discovery: DISCOVERY_TIMEOUT,
            solution_load: SOLUTION_LOAD_TIMEOUT,
        }
    }
}
