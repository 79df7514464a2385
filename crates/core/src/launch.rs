// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command line used to start a new Visual Studio process.

use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable whose value is inserted verbatim between the
/// executable and the solution when launching Visual Studio.
pub const EXTRA_ARGS_VAR: &str = "UNITY_VS_ARGS";

/// `"<exe>" [<extra args>] "<solution>"`, started in the executable's directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub executable: PathBuf,
    pub extra_args: Option<String>,
    pub solution: PathBuf,
}

impl LaunchCommand {
    pub fn new(executable: impl Into<PathBuf>, solution: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            extra_args: None,
            solution: solution.into(),
        }
    }

    /// Attach extra raw arguments; blank strings are ignored.
    pub fn with_extra_args(mut self, extra_args: Option<String>) -> Self {
        self.extra_args = extra_args.filter(|args| !args.trim().is_empty());
        self
    }

    /// Directory the new process starts in.
    pub fn working_dir(&self) -> Option<&Path> {
        self.executable.parent()
    }

    /// The full command line, as the new process sees it in `argv`.
    pub fn command_line(&self) -> String {
        let mut line = quote(&self.executable);
        line.push(' ');
        if let Some(args) = &self.extra_args {
            line.push_str(args);
            line.push(' ');
        }
        line.push_str(&quote(&self.solution));
        line
    }
}

impl fmt::Display for LaunchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// Wrap a path in double quotes.
pub fn quote(path: &Path) -> String {
    format!("\"{}\"", path.display())
}

#[cfg(test)]
#[path = "launch_tests.rs"]
mod tests;
