// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::launcher::{LaunchError, Launcher};
use vsopen_core::LaunchCommand;

/// Wrapper that adds tracing to any Launcher
#[derive(Clone)]
pub struct TracedLauncher<L> {
    inner: L,
}

impl<L> TracedLauncher<L> {
    pub fn new(inner: L) -> Self {
        Self { inner }
    }
}

impl<L: Launcher> Launcher for TracedLauncher<L> {
    fn launch(&self, command: &LaunchCommand) -> Result<u32, LaunchError> {
        let span = tracing::info_span!(
            "launcher.launch",
            program = %command.executable.display()
        );
        let _entered = span.enter();
        tracing::debug!(
            extra_args = command.extra_args.as_deref().unwrap_or(""),
            "starting"
        );
        let start = std::time::Instant::now();
        let result = self.inner.launch(command);
        let elapsed_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(pid) => tracing::info!(pid, elapsed_ms, "process started"),
            Err(e) => tracing::error!(elapsed_ms, error = %e, "launch failed"),
        }
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
