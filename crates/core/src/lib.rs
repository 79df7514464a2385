// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! vsopen-core: domain types for locating and driving a Visual Studio instance

pub mod clock;
pub mod identity;
pub mod launch;
pub mod path;
pub mod poll;
pub mod request;
pub mod retry;

pub use clock::{Clock, FakeClock, SystemClock};
pub use identity::{IdentityFilter, DTE_IDENTITY_PREFIX};
pub use launch::{LaunchCommand, EXTRA_ARGS_VAR};
pub use poll::{Poller, Tick};
pub use request::{FileTarget, RequestError, TargetRequest};
pub use retry::{RejectReason, RetryDecision, RetryPolicy};
