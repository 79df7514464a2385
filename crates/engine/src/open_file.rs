// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Opening a file in a bound instance and bringing it to the front.

use tracing::{debug, info};
use vsopen_adapters::{
    Automation, AutomationError, Editor, ItemOperations, TextSelection, Window, VIEW_KIND_PRIMARY,
};
use vsopen_core::{FileTarget, RetryPolicy};

use crate::OpenError;

/// Open `file` (if any) in `editor`, place the caret, then activate the main window.
///
/// Only a failed `OpenFile` is reported. Caret placement and activation are
/// best effort.
pub fn open_file<A: Automation>(
    automation: &A,
    editor: &A::Editor,
    policy: RetryPolicy,
    file: Option<&FileTarget>,
) -> Result<(), OpenError> {
    let _filter = automation
        .install_retry_filter(policy)
        .map_err(OpenError::Filter)?;

    if let Some(file) = file {
        let window = editor
            .item_operations()
            .and_then(|ops| ops.open_file(&file.path, VIEW_KIND_PRIMARY))
            .map_err(|source| OpenError::OpenFile {
                path: file.path.clone(),
                source,
            })?;
        info!(path = %file.path.display(), "file opened");

        if let (Some(line), Some(window)) = (file.caret_line(), window) {
            if let Err(e) = place_caret(&window, line) {
                debug!(line, error = %e, "cannot move caret");
            }
        }
    }

    if let Err(e) = activate_main_window(automation, editor) {
        debug!(error = %e, "cannot activate main window");
    }
    Ok(())
}

fn place_caret<W: Window>(window: &W, line: i32) -> Result<(), AutomationError> {
    let Some(selection) = window.selection()? else {
        return Ok(());
    };
    selection.goto_line(line, false)?;
    selection.end_of_line(false)
}

/// Grant foreground rights to the window's process, then activate it.
///
/// Only a missing main window or a failed `Activate` is an error; the pid
/// lookup and the foreground grant are skipped over when they fail.
fn activate_main_window<A: Automation>(
    automation: &A,
    editor: &A::Editor,
) -> Result<(), AutomationError> {
    let window = editor.main_window()?;
    match window.process_id() {
        Ok(pid) => {
            if let Err(e) = automation.allow_set_foreground(pid) {
                debug!(pid, error = %e, "cannot grant foreground rights");
            }
        }
        Err(e) => debug!(error = %e, "cannot find the main window's process"),
    }
    window.activate()
}

#[cfg(test)]
#[path = "open_file_tests.rs"]
mod tests;
