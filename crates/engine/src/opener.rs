// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Search, launch, wait, open.
//!
//! An instance that already has the solution open is reused. Otherwise a new
//! process is started and the running object table is polled until that
//! process registers. Only a launched instance waits for its solution to load.

use std::time::Instant;

use tracing::{error, info, warn};
use vsopen_adapters::{Automation, LaunchError, Launcher, ProgressReporter};
use vsopen_core::{Clock, LaunchCommand, Poller, TargetRequest, Tick};

use crate::{
    find_by_process_id, find_with_solution, open_file, wait_for_solution, OpenError, Readiness,
    SolutionMatch, Timeouts,
};

/// Drives one request against the automation runtime.
pub struct Opener<'a, A, L, C, P> {
    automation: &'a A,
    launcher: &'a L,
    clock: &'a C,
    progress: &'a P,
    timeouts: Timeouts,
    extra_args: Option<String>,
}

impl<'a, A, L, C, P> Opener<'a, A, L, C, P>
where
    A: Automation,
    L: Launcher,
    C: Clock,
    P: ProgressReporter,
{
    pub fn new(
        automation: &'a A,
        launcher: &'a L,
        clock: &'a C,
        progress: &'a P,
        timeouts: Timeouts,
    ) -> Self {
        Self {
            automation,
            launcher,
            clock,
            progress,
            timeouts,
            extra_args: None,
        }
    }

    /// Raw arguments inserted before the solution when launching.
    pub fn with_extra_args(mut self, extra_args: Option<String>) -> Self {
        self.extra_args = extra_args;
        self
    }

    /// Carry out `request`. Every failure is logged at error level before it is returned.
    pub fn open(&self, request: &TargetRequest) -> Result<(), OpenError> {
        let start = Instant::now();
        let result = self.find_or_launch(request).and_then(|editor| {
            open_file(
                self.automation,
                &editor,
                self.timeouts.call_retry,
                request.file.as_ref(),
            )
        });
        match &result {
            Ok(()) => info!(elapsed_ms = start.elapsed().as_millis() as u64, "request complete"),
            Err(e) => error!(error = %e, "request failed"),
        }
        result
    }

    fn find_or_launch(&self, request: &TargetRequest) -> Result<A::Editor, OpenError> {
        let matcher = SolutionMatch::for_request(request);
        info!("looking for a running Visual Studio session");
        if let Some(editor) = find_with_solution(self.automation, self.timeouts.call_retry, &matcher)
        {
            info!("using the existing Visual Studio session");
            return Ok(editor);
        }

        info!("no running Visual Studio has the solution open, starting a new one");
        let editor = self.launch_and_discover(request)?;
        if wait_for_solution(self.automation, &editor, self.clock, &self.timeouts)
            == Readiness::TimedOut
        {
            warn!("solution not reported open, opening the file anyway");
        }
        Ok(editor)
    }

    /// Start a new process and wait for it to register.
    ///
    /// The progress indicator is shown for the whole step and always cleared.
    fn launch_and_discover(&self, request: &TargetRequest) -> Result<A::Editor, OpenError> {
        self.progress.show();
        let result = self.launch(request).and_then(|pid| self.discover(pid));
        self.progress.clear();
        result
    }

    fn launch(&self, request: &TargetRequest) -> Result<u32, OpenError> {
        let executable = request
            .executable
            .as_ref()
            .ok_or(LaunchError::NoExecutable)?;
        let command = LaunchCommand::new(executable, &request.solution)
            .with_extra_args(self.extra_args.clone());
        info!(command = %command, "starting Visual Studio");
        let pid = self.launcher.launch(&command)?;
        info!(pid, "Visual Studio process started");
        Ok(pid)
    }

    fn discover(&self, pid: u32) -> Result<A::Editor, OpenError> {
        let mut poller = Poller::new(
            self.clock,
            self.timeouts.poll_interval,
            self.timeouts.discovery,
        );
        loop {
            if let Some(editor) = find_by_process_id(self.automation, self.timeouts.call_retry, pid)
            {
                info!(pid, "launched instance registered");
                return Ok(editor);
            }
            info!(pid, "retrying to acquire DTE");
            if poller.tick() == Tick::Timeout {
                return Err(OpenError::NotRegistered {
                    pid,
                    timeout: self.timeouts.discovery,
                });
            }
        }
    }
}

#[cfg(test)]
#[path = "opener_tests.rs"]
mod tests;
