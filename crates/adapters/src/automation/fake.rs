// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake automation backend for testing
//!
//! Every editor-level call fails with [`AutomationError::Busy`] unless a
//! retry filter is installed, mirroring how a freshly started Visual Studio
//! rejects unfiltered calls.
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{
    Automation, AutomationError, DirectoryEntry, Editor, ItemOperations, Solution, TextSelection,
    Window,
};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use vsopen_core::RetryPolicy;

/// Recorded automation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutomationCall {
    InstallFilter { depth: usize },
    RestoreFilter { depth: usize },
    Scan,
    Bind { identity: String },
    FullName { pid: u32 },
    Solution { pid: u32 },
    SolutionFullName { pid: u32 },
    IsOpen { pid: u32 },
    ItemOperations { pid: u32 },
    OpenFile {
        pid: u32,
        path: PathBuf,
        view_kind: String,
    },
    Selection { pid: u32 },
    GotoLine { pid: u32, line: i32, select: bool },
    EndOfLine { pid: u32, extend: bool },
    MainWindow { pid: u32 },
    WindowProcessId { pid: u32 },
    Activate { pid: u32 },
    AllowSetForeground { pid: u32 },
}

/// A scripted Visual Studio instance
#[derive(Debug, Clone)]
pub struct FakeInstance {
    pub pid: u32,
    pub identity: String,
    /// `None` makes `FullName` fail.
    pub executable: Option<String>,
    /// `None` makes `Solution.FullName` fail.
    pub solution: Option<String>,
    /// Number of `Solution` requests that fail before one succeeds.
    pub solution_unavailable_for: usize,
    /// Number of `IsOpen` polls answering `false` before `true`; `None` never opens.
    pub open_after: Option<usize>,
    pub open_file_fails: bool,
    pub has_selection: bool,
    pub has_main_window: bool,
    /// Number of scans that miss this instance before it is registered.
    pub registered_after_scans: usize,
}

impl FakeInstance {
    pub fn new(pid: u32) -> Self {
        Self {
            pid,
            identity: format!("!VisualStudio.DTE.17.0:{pid}"),
            executable: Some(String::new()),
            solution: Some(String::new()),
            solution_unavailable_for: 0,
            open_after: Some(0),
            open_file_fails: false,
            has_selection: true,
            has_main_window: true,
            registered_after_scans: 0,
        }
    }

    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = identity.into();
        self
    }

    pub fn with_executable(mut self, executable: impl AsRef<Path>) -> Self {
        self.executable = Some(executable.as_ref().to_string_lossy().into_owned());
        self
    }

    pub fn without_executable(mut self) -> Self {
        self.executable = None;
        self
    }

    pub fn with_solution(mut self, solution: impl AsRef<Path>) -> Self {
        self.solution = Some(solution.as_ref().to_string_lossy().into_owned());
        self
    }

    pub fn failing_solution_name(mut self) -> Self {
        self.solution = None;
        self
    }

    pub fn solution_unavailable_for(mut self, polls: usize) -> Self {
        self.solution_unavailable_for = polls;
        self
    }

    pub fn opens_after(mut self, polls: usize) -> Self {
        self.open_after = Some(polls);
        self
    }

    pub fn never_opens(mut self) -> Self {
        self.open_after = None;
        self
    }

    pub fn failing_open_file(mut self) -> Self {
        self.open_file_fails = true;
        self
    }

    pub fn without_selection(mut self) -> Self {
        self.has_selection = false;
        self
    }

    pub fn without_main_window(mut self) -> Self {
        self.has_main_window = false;
        self
    }

    pub fn registered_after(mut self, scans: usize) -> Self {
        self.registered_after_scans = scans;
        self
    }
}

struct InstanceState {
    script: FakeInstance,
    solution_requests: usize,
    open_polls: usize,
}

struct FakeAutomationState {
    instances: Vec<InstanceState>,
    /// Policies of the installed filters, innermost last.
    filters: Vec<RetryPolicy>,
    scans: usize,
    directory_unavailable: bool,
    foreground_denied: bool,
    calls: Vec<AutomationCall>,
}

/// Fake automation backend for testing
#[derive(Clone)]
pub struct FakeAutomation {
    inner: Arc<Mutex<FakeAutomationState>>,
}

impl Default for FakeAutomation {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeAutomationState {
                instances: Vec::new(),
                filters: Vec::new(),
                scans: 0,
                directory_unavailable: false,
                foreground_denied: false,
                calls: Vec::new(),
            })),
        }
    }
}

impl FakeAutomation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scripted instance in the fake running object table.
    pub fn add_instance(&self, instance: FakeInstance) {
        self.inner.lock().instances.push(InstanceState {
            script: instance,
            solution_requests: 0,
            open_polls: 0,
        });
    }

    /// Make every subsequent scan fail to obtain the running object table.
    pub fn set_directory_unavailable(&self, unavailable: bool) {
        self.inner.lock().directory_unavailable = unavailable;
    }

    /// Make `allow_set_foreground` fail the way `AllowSetForegroundWindow`
    /// does for a process that is not in the foreground.
    pub fn deny_foreground(&self) {
        self.inner.lock().foreground_denied = true;
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<AutomationCall> {
        self.inner.lock().calls.clone()
    }

    /// Number of retry filters currently installed
    pub fn filter_depth(&self) -> usize {
        self.inner.lock().filters.len()
    }

    /// Policy of the innermost installed filter
    pub fn active_policy(&self) -> Option<RetryPolicy> {
        self.inner.lock().filters.last().copied()
    }

    pub fn scans(&self) -> usize {
        self.inner.lock().scans
    }

    /// Number of `IsOpen` polls made against `pid`.
    pub fn open_polls(&self, pid: u32) -> usize {
        self.inner
            .lock()
            .instances
            .iter()
            .find(|i| i.script.pid == pid)
            .map_or(0, |i| i.open_polls)
    }

    fn record(&self, call: AutomationCall) {
        self.inner.lock().calls.push(call);
    }

    /// Record `call` and run `f` against the instance, failing while unfiltered.
    fn with_instance<T>(
        &self,
        pid: u32,
        call: AutomationCall,
        f: impl FnOnce(&mut InstanceState) -> Result<T, AutomationError>,
    ) -> Result<T, AutomationError> {
        let mut inner = self.inner.lock();
        inner.calls.push(call);
        if inner.filters.is_empty() {
            return Err(AutomationError::Busy);
        }
        let instance = inner
            .instances
            .iter_mut()
            .find(|i| i.script.pid == pid)
            .ok_or_else(|| AutomationError::call("GetObject", "instance exited"))?;
        f(instance)
    }
}

/// Pops the fake filter stack when dropped.
pub struct FakeFilterGuard {
    automation: FakeAutomation,
}

impl Drop for FakeFilterGuard {
    fn drop(&mut self) {
        let mut inner = self.automation.inner.lock();
        inner.filters.pop();
        let depth = inner.filters.len();
        inner.calls.push(AutomationCall::RestoreFilter { depth });
    }
}

impl Automation for FakeAutomation {
    type Entry = FakeEntry;
    type Editor = FakeEditor;
    type FilterGuard = FakeFilterGuard;

    fn install_retry_filter(&self, policy: RetryPolicy) -> Result<FakeFilterGuard, AutomationError> {
        let mut inner = self.inner.lock();
        inner.filters.push(policy);
        let depth = inner.filters.len();
        inner.calls.push(AutomationCall::InstallFilter { depth });
        Ok(FakeFilterGuard {
            automation: self.clone(),
        })
    }

    fn entries(&self) -> Result<Box<dyn Iterator<Item = FakeEntry> + '_>, AutomationError> {
        let mut inner = self.inner.lock();
        inner.calls.push(AutomationCall::Scan);
        if inner.directory_unavailable {
            return Err(AutomationError::call(
                "GetRunningObjectTable",
                "directory unavailable",
            ));
        }
        inner.scans += 1;
        let scan = inner.scans;
        let entries: Vec<FakeEntry> = inner
            .instances
            .iter()
            .filter(|i| scan > i.script.registered_after_scans)
            .map(|i| FakeEntry {
                automation: self.clone(),
                pid: i.script.pid,
                identity: i.script.identity.clone(),
            })
            .collect();
        Ok(Box::new(entries.into_iter()))
    }

    fn allow_set_foreground(&self, pid: u32) -> Result<(), AutomationError> {
        let mut inner = self.inner.lock();
        inner.calls.push(AutomationCall::AllowSetForeground { pid });
        if inner.foreground_denied {
            return Err(AutomationError::call(
                "AllowSetForegroundWindow",
                "Access is denied.",
            ));
        }
        Ok(())
    }
}

pub struct FakeEntry {
    automation: FakeAutomation,
    pid: u32,
    identity: String,
}

impl DirectoryEntry for FakeEntry {
    type Editor = FakeEditor;

    fn display_name(&self) -> Result<String, AutomationError> {
        Ok(self.identity.clone())
    }

    fn bind(&self) -> Result<FakeEditor, AutomationError> {
        self.automation.record(AutomationCall::Bind {
            identity: self.identity.clone(),
        });
        Ok(FakeEditor {
            automation: self.automation.clone(),
            pid: self.pid,
        })
    }
}

/// Handle to a fake instance
#[derive(Clone)]
pub struct FakeEditor {
    automation: FakeAutomation,
    pid: u32,
}

impl FakeEditor {
    pub fn pid(&self) -> u32 {
        self.pid
    }
}

impl Editor for FakeEditor {
    type Solution = FakeSolution;
    type Window = FakeWindow;
    type ItemOperations = FakeItemOperations;

    fn full_name(&self) -> Result<String, AutomationError> {
        let pid = self.pid;
        self.automation
            .with_instance(pid, AutomationCall::FullName { pid }, |i| {
                i.script
                    .executable
                    .clone()
                    .ok_or_else(|| AutomationError::call("FullName", "scripted failure"))
            })
    }

    fn solution(&self) -> Result<FakeSolution, AutomationError> {
        let pid = self.pid;
        self.automation
            .with_instance(pid, AutomationCall::Solution { pid }, |i| {
                i.solution_requests += 1;
                if i.solution_requests <= i.script.solution_unavailable_for {
                    return Err(AutomationError::Missing("Solution"));
                }
                Ok(())
            })?;
        Ok(FakeSolution {
            automation: self.automation.clone(),
            pid,
        })
    }

    fn item_operations(&self) -> Result<FakeItemOperations, AutomationError> {
        let pid = self.pid;
        self.automation
            .with_instance(pid, AutomationCall::ItemOperations { pid }, |_| Ok(()))?;
        Ok(FakeItemOperations {
            automation: self.automation.clone(),
            pid,
        })
    }

    fn main_window(&self) -> Result<FakeWindow, AutomationError> {
        let pid = self.pid;
        self.automation
            .with_instance(pid, AutomationCall::MainWindow { pid }, |i| {
                if i.script.has_main_window {
                    Ok(())
                } else {
                    Err(AutomationError::Missing("MainWindow"))
                }
            })?;
        Ok(FakeWindow {
            automation: self.automation.clone(),
            pid,
        })
    }
}

pub struct FakeSolution {
    automation: FakeAutomation,
    pid: u32,
}

impl Solution for FakeSolution {
    fn full_name(&self) -> Result<String, AutomationError> {
        let pid = self.pid;
        self.automation
            .with_instance(pid, AutomationCall::SolutionFullName { pid }, |i| {
                i.script
                    .solution
                    .clone()
                    .ok_or_else(|| AutomationError::call("FullName", "scripted failure"))
            })
    }

    fn is_open(&self) -> Result<bool, AutomationError> {
        let pid = self.pid;
        self.automation
            .with_instance(pid, AutomationCall::IsOpen { pid }, |i| {
                i.open_polls += 1;
                Ok(i.script.open_after.is_some_and(|after| i.open_polls > after))
            })
    }
}

pub struct FakeItemOperations {
    automation: FakeAutomation,
    pid: u32,
}

impl ItemOperations for FakeItemOperations {
    type Window = FakeWindow;

    fn open_file(&self, path: &Path, view_kind: &str) -> Result<Option<FakeWindow>, AutomationError> {
        let pid = self.pid;
        let call = AutomationCall::OpenFile {
            pid,
            path: path.to_path_buf(),
            view_kind: view_kind.to_string(),
        };
        self.automation.with_instance(pid, call, |i| {
            if i.script.open_file_fails {
                Err(AutomationError::call("OpenFile", "scripted failure"))
            } else {
                Ok(())
            }
        })?;
        Ok(Some(FakeWindow {
            automation: self.automation.clone(),
            pid,
        }))
    }
}

pub struct FakeWindow {
    automation: FakeAutomation,
    pid: u32,
}

impl Window for FakeWindow {
    type Selection = FakeSelection;

    fn selection(&self) -> Result<Option<FakeSelection>, AutomationError> {
        let pid = self.pid;
        let has_selection = self
            .automation
            .with_instance(pid, AutomationCall::Selection { pid }, |i| {
                Ok(i.script.has_selection)
            })?;
        Ok(has_selection.then(|| FakeSelection {
            automation: self.automation.clone(),
            pid,
        }))
    }

    fn process_id(&self) -> Result<u32, AutomationError> {
        let pid = self.pid;
        self.automation
            .with_instance(pid, AutomationCall::WindowProcessId { pid }, |i| Ok(i.script.pid))
    }

    fn activate(&self) -> Result<(), AutomationError> {
        let pid = self.pid;
        self.automation
            .with_instance(pid, AutomationCall::Activate { pid }, |_| Ok(()))
    }
}

pub struct FakeSelection {
    automation: FakeAutomation,
    pid: u32,
}

impl TextSelection for FakeSelection {
    fn goto_line(&self, line: i32, select: bool) -> Result<(), AutomationError> {
        let pid = self.pid;
        self.automation
            .with_instance(pid, AutomationCall::GotoLine { pid, line, select }, |_| Ok(()))
    }

    fn end_of_line(&self, extend: bool) -> Result<(), AutomationError> {
        let pid = self.pid;
        self.automation
            .with_instance(pid, AutomationCall::EndOfLine { pid, extend }, |_| Ok(()))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
