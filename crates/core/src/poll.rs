// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded fixed-interval polling.
//!
//! Elapsed time is counted in whole intervals slept rather than read from a
//! wall clock, so a poll loop performs at most `ceil(ceiling / interval)`
//! sleeps.

use std::time::Duration;

use crate::clock::Clock;

/// Result of waiting for the next poll tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Ready for the next poll iteration.
    Ready,
    /// The ceiling was reached.
    Timeout,
}

/// A polling loop helper with a fixed interval and a hard ceiling.
pub struct Poller<'c, C: Clock> {
    clock: &'c C,
    interval: Duration,
    ceiling: Duration,
    waited: Duration,
}

impl<'c, C: Clock> Poller<'c, C> {
    pub fn new(clock: &'c C, interval: Duration, ceiling: Duration) -> Self {
        Self {
            clock,
            interval,
            ceiling,
            waited: Duration::ZERO,
        }
    }

    /// Wait for the next poll tick.
    ///
    /// Returns [`Tick::Timeout`] without sleeping if the ceiling was already
    /// reached, otherwise sleeps one interval and returns [`Tick::Timeout`]
    /// if that sleep reached the ceiling, [`Tick::Ready`] if not.
    pub fn tick(&mut self) -> Tick {
        if self.waited >= self.ceiling {
            return Tick::Timeout;
        }
        self.clock.sleep(self.interval);
        self.waited += self.interval;
        if self.waited >= self.ceiling {
            return Tick::Timeout;
        }
        Tick::Ready
    }

    /// Total time slept so far.
    pub fn waited(&self) -> Duration {
        self.waited
    }
}

#[cfg(test)]
#[path = "poll_tests.rs"]
mod tests;
