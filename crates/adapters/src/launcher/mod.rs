// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Starting new Visual Studio processes

mod process;

pub use process::ProcessLauncher;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeLauncher;

use std::path::PathBuf;
use thiserror::Error;
use vsopen_core::LaunchCommand;

/// Errors from launching a process
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("no Visual Studio executable was given")]
    NoExecutable,
    #[error("starting {} failed: {source}", program.display())]
    Spawn {
        program: PathBuf,
        source: std::io::Error,
    },
}

/// Starts a process without waiting for it to become ready.
pub trait Launcher {
    /// Start `command` and return the new process id.
    fn launch(&self, command: &LaunchCommand) -> Result<u32, LaunchError>;
}
