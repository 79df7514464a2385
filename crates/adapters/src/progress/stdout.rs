// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Progress markers written to stdout.
//!
//! The hosting editor scrapes our stdout line by line and toggles its
//! progress bar when it sees one of these exact lines.

use super::ProgressReporter;

pub const SHOW_MARKER: &str = "displayProgressBar";
pub const CLEAR_MARKER: &str = "clearprogressbar";

#[derive(Clone, Copy, Debug, Default)]
pub struct StdoutProgress;

impl StdoutProgress {
    pub fn new() -> Self {
        Self
    }
}

impl ProgressReporter for StdoutProgress {
    fn show(&self) {
        println!("{SHOW_MARKER}");
    }

    fn clear(&self) {
        println!("{CLEAR_MARKER}");
    }
}
