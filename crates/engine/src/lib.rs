// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! vsopen engine: find or launch Visual Studio and open a file in it

mod error;
mod matcher;
mod open_file;
mod opener;
mod readiness;
mod scan;
mod timeouts;

#[cfg(test)]
mod test_helpers;

pub use error::OpenError;
pub use matcher::{find_with_solution, SolutionMatch};
pub use open_file::open_file;
pub use opener::Opener;
pub use readiness::{wait_for_solution, Readiness};
pub use scan::{find_by_process_id, find_instance};
pub use timeouts::{Timeouts, DISCOVERY_TIMEOUT, SOLUTION_LOAD_TIMEOUT};
