// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Visual Studio automation surface.
//!
//! A running Visual Studio publishes a DTE object in the running object
//! table. The traits here cover the slice of DTE this tool drives: the
//! directory of registered instances, the instance itself, its solution,
//! item operations, windows and text selection.

#[cfg(windows)]
mod com;

#[cfg(windows)]
pub use com::{ComAutomation, MessageFilterScope};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{AutomationCall, FakeAutomation, FakeEditor, FakeInstance};

use std::fmt::Display;
use std::path::Path;

use thiserror::Error;
use vsopen_core::RetryPolicy;

/// `vsViewKindPrimary`: open a document in its default view.
pub const VIEW_KIND_PRIMARY: &str = "{00000000-0000-0000-0000-000000000000}";

/// Errors from automation calls
#[derive(Debug, Error)]
pub enum AutomationError {
    #[error("automation unavailable: {0}")]
    Unavailable(String),
    #[error("{member} failed: {message}")]
    Call { member: String, message: String },
    #[error("{0} returned nothing")]
    Missing(&'static str),
    #[error("call rejected, Visual Studio is busy")]
    Busy,
}

impl AutomationError {
    pub fn call(member: impl Into<String>, err: impl Display) -> Self {
        Self::Call {
            member: member.into(),
            message: err.to_string(),
        }
    }
}

/// Access to the process-wide automation runtime.
pub trait Automation {
    type Entry: DirectoryEntry<Editor = Self::Editor>;
    type Editor: Editor;
    /// Restores the previously active retry filter when dropped.
    type FilterGuard;

    /// Make `policy` the active filter for rejected outbound calls.
    fn install_retry_filter(&self, policy: RetryPolicy)
        -> Result<Self::FilterGuard, AutomationError>;

    /// Snapshot of the objects currently registered in the running object table.
    fn entries(&self) -> Result<Box<dyn Iterator<Item = Self::Entry> + '_>, AutomationError>;

    /// Allow `pid` to bring one of its windows to the foreground.
    fn allow_set_foreground(&self, pid: u32) -> Result<(), AutomationError>;
}

/// One registration in the running object table.
pub trait DirectoryEntry {
    type Editor;

    /// The moniker display name, e.g. `!VisualStudio.DTE.17.0:1234`.
    fn display_name(&self) -> Result<String, AutomationError>;

    /// Resolve the registration to a DTE object.
    fn bind(&self) -> Result<Self::Editor, AutomationError>;
}

/// A running Visual Studio instance (`EnvDTE._DTE`).
pub trait Editor {
    type Solution: Solution;
    type Window: Window;
    type ItemOperations: ItemOperations<Window = Self::Window>;

    /// Full path of the instance's executable.
    fn full_name(&self) -> Result<String, AutomationError>;
    fn solution(&self) -> Result<Self::Solution, AutomationError>;
    fn item_operations(&self) -> Result<Self::ItemOperations, AutomationError>;
    fn main_window(&self) -> Result<Self::Window, AutomationError>;
}

/// `EnvDTE._Solution`
pub trait Solution {
    /// Full path of the solution file, empty when none is open.
    fn full_name(&self) -> Result<String, AutomationError>;
    fn is_open(&self) -> Result<bool, AutomationError>;
}

/// `EnvDTE.ItemOperations`
pub trait ItemOperations {
    type Window;

    /// Open `path` in the given view, returning the document window if one was created.
    fn open_file(&self, path: &Path, view_kind: &str)
        -> Result<Option<Self::Window>, AutomationError>;
}

/// `EnvDTE.Window`
pub trait Window {
    type Selection: TextSelection;

    fn selection(&self) -> Result<Option<Self::Selection>, AutomationError>;
    /// Id of the process owning the native window handle.
    fn process_id(&self) -> Result<u32, AutomationError>;
    fn activate(&self) -> Result<(), AutomationError>;
}

/// `EnvDTE.TextSelection`
pub trait TextSelection {
    fn goto_line(&self, line: i32, select: bool) -> Result<(), AutomationError>;
    fn end_of_line(&self, extend: bool) -> Result<(), AutomationError>;
}
