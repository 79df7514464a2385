// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Matching a running instance against the requested solution.

use std::path::Path;

use tracing::info;
use vsopen_adapters::{Automation, Editor, Solution};
use vsopen_core::{path, IdentityFilter, RetryPolicy, TargetRequest};

use crate::scan::find_instance;

/// Accepts an instance that has the requested solution open, optionally
/// running from the requested installation.
#[derive(Debug, Clone, Copy)]
pub struct SolutionMatch<'a> {
    pub solution: &'a Path,
    pub executable: Option<&'a Path>,
}

impl<'a> SolutionMatch<'a> {
    pub fn new(solution: &'a Path, executable: Option<&'a Path>) -> Self {
        Self {
            solution,
            executable,
        }
    }

    pub fn for_request(request: &'a TargetRequest) -> Self {
        Self::new(&request.solution, request.executable.as_deref())
    }

    /// Any failed query rejects the candidate.
    pub fn matches<E: Editor>(&self, editor: &E) -> bool {
        let Ok(executable) = editor.full_name() else {
            return false;
        };
        let Ok(solution) = editor.solution() else {
            return false;
        };
        let Ok(solution_path) = solution.full_name() else {
            return false;
        };
        if solution_path.is_empty() {
            return false;
        }

        info!(solution = %solution_path, "Visual Studio opened on solution");
        if !path::equivalent(&solution_path, self.solution) {
            return false;
        }

        info!("found a running Visual Studio session with the solution open");
        match self.executable {
            None => {
                info!("no Visual Studio installation requested, using this running session");
                true
            }
            Some(wanted) if path::equivalent(&executable, wanted) => true,
            Some(_) => {
                info!(
                    %executable,
                    "running session is not the requested installation, continuing search"
                );
                false
            }
        }
    }
}

/// First running instance satisfying `matcher`.
pub fn find_with_solution<A: Automation>(
    automation: &A,
    policy: RetryPolicy,
    matcher: &SolutionMatch<'_>,
) -> Option<A::Editor> {
    find_instance(automation, policy, IdentityFilter::any(), |editor| {
        matcher.matches(editor)
    })
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
