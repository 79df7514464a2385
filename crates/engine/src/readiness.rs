// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Waiting for a freshly launched instance to finish loading its solution.
//!
//! SDK-style projects load asynchronously after the solution object exists,
//! so `IsOpen` can stay false for a while after `Solution` first succeeds.

use tracing::{debug, info, warn};
use vsopen_adapters::{Automation, Editor, Solution};
use vsopen_core::{Clock, Poller, Tick};

use crate::Timeouts;

/// Outcome of [`wait_for_solution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    TimedOut,
}

/// Poll `editor` until its solution reports open or the load ceiling passes.
pub fn wait_for_solution<A: Automation, C: Clock>(
    automation: &A,
    editor: &A::Editor,
    clock: &C,
    timeouts: &Timeouts,
) -> Readiness {
    let _filter = automation
        .install_retry_filter(timeouts.call_retry)
        .map_err(|e| warn!(error = %e, "cannot install retry filter"))
        .ok();
    let mut poller = Poller::new(clock, timeouts.poll_interval, timeouts.solution_load);

    info!("waiting for solution to be opened");
    loop {
        if solution_is_open(editor) {
            debug!(waited_ms = poller.waited().as_millis() as u64, "solution open");
            return Readiness::Ready;
        }
        if poller.tick() == Tick::Timeout {
            warn!(
                waited_ms = poller.waited().as_millis() as u64,
                "timeout waiting for solution to be opened"
            );
            return Readiness::TimedOut;
        }
        debug!("solution not open yet");
    }
}

fn solution_is_open<E: Editor>(editor: &E) -> bool {
    editor
        .solution()
        .and_then(|solution| solution.is_open())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "readiness_tests.rs"]
mod tests;
