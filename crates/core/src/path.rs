// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Path normalization and filesystem equivalence.

use std::io;
use std::path::{Path, PathBuf};

/// Make `path` absolute against the current directory without touching the filesystem.
pub fn absolute(path: impl AsRef<Path>) -> io::Result<PathBuf> {
    std::path::absolute(path)
}

/// True when both paths resolve to the same existing file.
///
/// Resolution follows symlinks and, on case-insensitive filesystems, yields
/// the on-disk spelling, so differently-cased or linked paths compare equal.
/// A path that cannot be resolved is never equivalent to anything.
pub fn equivalent(a: impl AsRef<Path>, b: impl AsRef<Path>) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
#[path = "path_tests.rs"]
mod tests;
