// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.

use std::time::Duration;

use vsopen_core::{RetryPolicy, EXTRA_ARGS_VAR};
use vsopen_engine::Timeouts;

// --- Duration helper (private) ---

fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
}

// --- Launch ---

/// Raw arguments inserted into the launch command line.
pub fn extra_args() -> Option<String> {
    std::env::var(EXTRA_ARGS_VAR).ok()
}

// --- Timeouts ---

pub fn retry_interval_ms() -> Option<Duration> {
    parse_duration_ms("VSOPEN_RETRY_INTERVAL_MS")
}
pub fn call_timeout_ms() -> Option<Duration> {
    parse_duration_ms("VSOPEN_CALL_TIMEOUT_MS")
}
pub fn discovery_timeout_ms() -> Option<Duration> {
    parse_duration_ms("VSOPEN_DISCOVERY_TIMEOUT_MS")
}
pub fn solution_timeout_ms() -> Option<Duration> {
    parse_duration_ms("VSOPEN_SOLUTION_TIMEOUT_MS")
}

/// Default timeouts with any overrides from the environment applied.
///
/// The retry interval paces both rejected-call retries and polling.
pub fn timeouts() -> Timeouts {
    let defaults = Timeouts::default();
    let interval = retry_interval_ms().unwrap_or(defaults.poll_interval);
    Timeouts {
        call_retry: RetryPolicy::new(
            interval,
            call_timeout_ms().unwrap_or(defaults.call_retry.ceiling),
        ),
        poll_interval: interval,
        discovery: discovery_timeout_ms().unwrap_or(defaults.discovery),
        solution_load: solution_timeout_ms().unwrap_or(defaults.solution_load),
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
