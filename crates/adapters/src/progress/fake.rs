// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake progress reporter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::ProgressReporter;
use parking_lot::Mutex;
use std::sync::Arc;

/// Recorded progress marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressCall {
    Show,
    Clear,
}

/// Fake progress reporter for testing
#[derive(Clone, Default)]
pub struct FakeProgress {
    calls: Arc<Mutex<Vec<ProgressCall>>>,
}

impl FakeProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded markers
    pub fn calls(&self) -> Vec<ProgressCall> {
        self.calls.lock().clone()
    }
}

impl ProgressReporter for FakeProgress {
    fn show(&self) {
        self.calls.lock().push(ProgressCall::Show);
    }

    fn clear(&self) {
        self.calls.lock().push(ProgressCall::Clear);
    }
}
