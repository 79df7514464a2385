// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Running object table scan.
//!
//! The table is shared with every other process and changes underneath us:
//! an instance returned here may be gone by the time it is used, and callers
//! treat a later failed call on it like "no match".

use vsopen_adapters::{Automation, DirectoryEntry};
use vsopen_core::{IdentityFilter, RetryPolicy};

/// First registered Visual Studio instance accepted by `filter` and `accept`.
///
/// The retry filter stays installed for the whole scan, including every
/// `accept` call. Failing to install it, or to read the table, yields `None`.
pub fn find_instance<A, F>(
    automation: &A,
    policy: RetryPolicy,
    filter: IdentityFilter,
    mut accept: F,
) -> Option<A::Editor>
where
    A: Automation,
    F: FnMut(&A::Editor) -> bool,
{
    let _filter = match automation.install_retry_filter(policy) {
        Ok(guard) => guard,
        Err(e) => {
            tracing::warn!(error = %e, "cannot install retry filter");
            return None;
        }
    };
    let entries = match automation.entries() {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(error = %e, "running object table unavailable");
            return None;
        }
    };

    for entry in entries {
        let Ok(identity) = entry.display_name() else {
            continue;
        };
        if !filter.matches(&identity) {
            continue;
        }
        let editor = match entry.bind() {
            Ok(editor) => editor,
            Err(e) => {
                tracing::debug!(%identity, error = %e, "cannot bind registered instance");
                continue;
            }
        };
        if accept(&editor) {
            tracing::debug!(%identity, "instance accepted");
            return Some(editor);
        }
    }
    None
}

/// The instance registered by process `pid`, if it has registered yet.
pub fn find_by_process_id<A: Automation>(
    automation: &A,
    policy: RetryPolicy,
    pid: u32,
) -> Option<A::Editor> {
    find_instance(automation, policy, IdentityFilter::for_process(pid), |_| true)
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
