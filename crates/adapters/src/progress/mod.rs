// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Progress markers for the hosting editor

mod stdout;

pub use stdout::StdoutProgress;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeProgress, ProgressCall};

/// Tells whoever launched us that a long wait started or finished.
pub trait ProgressReporter {
    fn show(&self);
    fn clear(&self);
}
