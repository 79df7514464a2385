// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The immutable description of what the user asked to open.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::path::absolute;

/// Errors building a [`TargetRequest`]
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("cannot resolve {}: {source}", path.display())]
    Resolve {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("solution path is empty")]
    EmptySolution,
}

/// A file to open and the line to put the caret on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTarget {
    pub path: PathBuf,
    pub line: i32,
}

impl FileTarget {
    /// The line to move the caret to, if any. Lines below 1 leave the caret alone.
    pub fn caret_line(&self) -> Option<i32> {
        (self.line > 0).then_some(self.line)
    }
}

/// Executable, solution and optional file location, all absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRequest {
    /// Visual Studio executable; `None` puts no constraint on which installation is used.
    pub executable: Option<PathBuf>,
    pub solution: PathBuf,
    pub file: Option<FileTarget>,
}

impl TargetRequest {
    /// Normalize raw command-line paths into a request.
    ///
    /// An empty executable means "any installation"; an empty file name means
    /// "only activate the window".
    pub fn resolve(
        executable: &Path,
        solution: &Path,
        file: Option<(&Path, i32)>,
    ) -> Result<Self, RequestError> {
        if solution.as_os_str().is_empty() {
            return Err(RequestError::EmptySolution);
        }
        let executable = if executable.as_os_str().is_empty() {
            None
        } else {
            Some(resolve(executable)?)
        };
        let file = match file {
            Some((path, line)) if !path.as_os_str().is_empty() => Some(FileTarget {
                path: resolve(path)?,
                line,
            }),
            _ => None,
        };
        Ok(Self {
            executable,
            solution: resolve(solution)?,
            file,
        })
    }
}

fn resolve(path: &Path) -> Result<PathBuf, RequestError> {
    absolute(path).map_err(|source| RequestError::Resolve {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
