// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Display-name filter for entries in the running object table.
//!
//! Visual Studio registers itself as `!VisualStudio.DTE.<version>:<pid>`,
//! e.g. `!VisualStudio.DTE.17.0:1234`.

/// Prefix shared by every registered Visual Studio automation object.
pub const DTE_IDENTITY_PREFIX: &str = "!VisualStudio.DTE";

/// Accepts DTE display names, optionally pinned to one process id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdentityFilter {
    process_id: Option<u32>,
}

impl IdentityFilter {
    /// Accept any Visual Studio instance.
    pub fn any() -> Self {
        Self::default()
    }

    /// Accept only the instance owned by `pid`. A pid of 0 accepts any instance.
    pub fn for_process(pid: u32) -> Self {
        Self {
            process_id: (pid != 0).then_some(pid),
        }
    }

    pub fn process_id(&self) -> Option<u32> {
        self.process_id
    }

    pub fn matches(&self, identity: &str) -> bool {
        if !identity.starts_with(DTE_IDENTITY_PREFIX) {
            return false;
        }
        match self.process_id {
            None => true,
            Some(pid) => identity.ends_with(&format!(":{pid}")),
        }
    }
}

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;
