// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake launcher for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{LaunchError, Launcher};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use vsopen_core::LaunchCommand;

struct FakeLauncherState {
    pid: Option<u32>,
    launches: Vec<LaunchCommand>,
}

/// Fake launcher for testing
#[derive(Clone)]
pub struct FakeLauncher {
    inner: Arc<Mutex<FakeLauncherState>>,
}

impl FakeLauncher {
    /// Launcher whose launches succeed with `pid`.
    pub fn with_pid(pid: u32) -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeLauncherState {
                pid: Some(pid),
                launches: Vec::new(),
            })),
        }
    }

    /// Launcher whose launches fail as if the executable were missing.
    pub fn failing() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeLauncherState {
                pid: None,
                launches: Vec::new(),
            })),
        }
    }

    /// Get all launched commands
    pub fn launches(&self) -> Vec<LaunchCommand> {
        self.inner.lock().launches.clone()
    }
}

impl Launcher for FakeLauncher {
    fn launch(&self, command: &LaunchCommand) -> Result<u32, LaunchError> {
        let mut inner = self.inner.lock();
        inner.launches.push(command.clone());
        inner.pid.ok_or_else(|| LaunchError::Spawn {
            program: PathBuf::from(&command.executable),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        })
    }
}
