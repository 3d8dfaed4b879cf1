// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Iteration-count busy-wait.
//!
//! This is not a timer. The time spent depends on the core clock, flash wait
//! states and whatever the spin hook compiles to; no wall-clock duration is
//! promised.

/// What happens to the outer counter between two waits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterPolicy {
    /// The outer counter is never reset: only the first wait spins the full
    /// `outer * inner` iterations, later waits return immediately.
    Latched,
    /// The outer counter restarts on every wait.
    Rearm,
}

#[derive(Debug, Clone)]
pub struct BusyWait {
    outer: u32,
    inner: u32,
    policy: CounterPolicy,
    count: u32,
}

impl BusyWait {
    pub const fn new(outer: u32, inner: u32, policy: CounterPolicy) -> Self {
        Self {
            outer,
            inner,
            policy,
            count: 0,
        }
    }

    pub const fn policy(&self) -> CounterPolicy {
        self.policy
    }

    /// Spin for roughly `outer * inner` iterations, calling `spin` once per
    /// inner iteration so the loop cannot be optimized away.
    pub fn wait<F: FnMut()>(&mut self, mut spin: F) {
        if self.policy == CounterPolicy::Rearm {
            self.count = 0;
        }
        while self.count < self.outer {
            self.count += 1;
            for _ in 0..self.inner {
                spin();
            }
        }
    }
}
