// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the open-file workflow

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use vsopen_adapters::{AutomationError, LaunchError};

/// Why a request could not be carried out
#[derive(Debug, Error)]
pub enum OpenError {
    #[error("starting Visual Studio failed: {0}")]
    Launch(#[from] LaunchError),
    #[error("Visual Studio process {pid} did not register within {}ms", timeout.as_millis())]
    NotRegistered { pid: u32, timeout: Duration },
    #[error("retry filter unavailable: {0}")]
    Filter(AutomationError),
    #[error("opening {} failed: {source}", path.display())]
    OpenFile {
        path: PathBuf,
        source: AutomationError,
    },
}
