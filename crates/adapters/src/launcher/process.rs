// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Launcher backed by `std::process`.

use super::{LaunchError, Launcher};
use std::process::{Command, Stdio};
use vsopen_core::LaunchCommand;

/// Spawns the executable in its own directory with the parent's environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessLauncher;

impl ProcessLauncher {
    pub fn new() -> Self {
        Self
    }
}

impl Launcher for ProcessLauncher {
    fn launch(&self, command: &LaunchCommand) -> Result<u32, LaunchError> {
        let mut cmd = Command::new(&command.executable);
        if let Some(dir) = command.working_dir() {
            cmd.current_dir(dir);
        }
        add_arguments(&mut cmd, command);
        // The caller's stdout is read to EOF by the host; the child must not hold it open.
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let child = cmd.spawn().map_err(|source| LaunchError::Spawn {
            program: command.executable.clone(),
            source,
        })?;
        // Dropping the child closes its process and thread handles without waiting.
        Ok(child.id())
    }
}

#[cfg(windows)]
fn add_arguments(cmd: &mut Command, command: &LaunchCommand) {
    use std::os::windows::process::CommandExt;
    use vsopen_core::launch::quote;

    if let Some(args) = &command.extra_args {
        cmd.raw_arg(args);
    }
    cmd.raw_arg(quote(&command.solution));
}

#[cfg(not(windows))]
fn add_arguments(cmd: &mut Command, command: &LaunchCommand) {
    if let Some(args) = &command.extra_args {
        cmd.args(args.split_whitespace());
    }
    cmd.arg(&command.solution);
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
