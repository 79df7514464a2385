// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for Visual Studio automation and process launching

pub mod automation;
pub mod launcher;
pub mod progress;
pub mod traced;

pub use automation::{
    Automation, AutomationError, DirectoryEntry, Editor, ItemOperations, Solution, TextSelection,
    Window, VIEW_KIND_PRIMARY,
};
#[cfg(windows)]
pub use automation::{ComAutomation, MessageFilterScope};
pub use launcher::{LaunchError, Launcher, ProcessLauncher};
pub use progress::{ProgressReporter, StdoutProgress};
pub use traced::TracedLauncher;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use automation::{AutomationCall, FakeAutomation, FakeEditor, FakeInstance};
#[cfg(any(test, feature = "test-support"))]
pub use launcher::FakeLauncher;
#[cfg(any(test, feature = "test-support"))]
pub use progress::{FakeProgress, ProgressCall};
