// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The atomic units a coroutine is made of.

use cadence_core::SuspendPoint;
use std::fmt;

/// An action executed by a [`Step::Run`].
///
/// Implemented for every `Fn()` closure, so most callers never name it.
pub trait Runnable {
    /// Performs the action.
    fn run(&self);
}

impl<F: Fn()> Runnable for F {
    fn run(&self) {
        self()
    }
}

/// A condition polled by a [`Step::WaitUntil`].
///
/// Implemented for every `Fn() -> bool` closure.
pub trait Predicate {
    /// Evaluates the condition.
    fn check(&self) -> bool;
}

impl<F: Fn() -> bool> Predicate for F {
    fn check(&self) -> bool {
        self()
    }
}

/// Which predicate result lets a [`Step::WaitUntil`] complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Polarity {
    /// Wait until the predicate returns `true`.
    #[default]
    Until,
    /// Wait while the predicate returns `true`, completing once it returns `false`.
    While,
}

impl Polarity {
    /// Returns `true` when `value` completes the wait.
    pub fn is_satisfied(self, value: bool) -> bool {
        match self {
            Polarity::Until => value,
            Polarity::While => !value,
        }
    }
}

/// One step of a coroutine: either a run-once action or a blocking condition.
pub enum Step {
    /// Invokes the action once and completes immediately.
    Run(Box<dyn Runnable>),
    /// Completes only when the executor is continued at the given phase.
    WaitForSuspensionPoint(SuspendPoint),
    /// Completes once the accumulated time reaches the given seconds.
    WaitForDuration(f32),
    /// Completes once the accumulated frame count reaches the given value.
    WaitForFrameCount(u32),
    /// Completes once the predicate matches the polarity. Polled at every phase.
    WaitUntil {
        /// The polled condition.
        predicate: Box<dyn Predicate>,
        /// The predicate result that completes the wait.
        polarity: Polarity,
    },
}

impl Step {
    /// Returns `true` if the step only makes progress at the accumulation point.
    pub fn is_accumulating(&self) -> bool {
        matches!(self, Step::WaitForDuration(_) | Step::WaitForFrameCount(_))
    }

    /// Returns `true` if completing the step consumes a positive amount of
    /// accumulated time or frames.
    pub fn consumes_delta(&self) -> bool {
        match self {
            Step::WaitForDuration(seconds) => *seconds > 0.0,
            Step::WaitForFrameCount(frames) => *frames > 0,
            _ => false,
        }
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Run(_) => f.write_str("Run"),
            Step::WaitForSuspensionPoint(point) => {
                f.debug_tuple("WaitForSuspensionPoint").field(point).finish()
            }
            Step::WaitForDuration(seconds) => {
                f.debug_tuple("WaitForDuration").field(seconds).finish()
            }
            Step::WaitForFrameCount(frames) => {
                f.debug_tuple("WaitForFrameCount").field(frames).finish()
            }
            Step::WaitUntil { polarity, .. } => f
                .debug_struct("WaitUntil")
                .field("polarity", polarity)
                .finish_non_exhaustive(),
        }
    }
}
