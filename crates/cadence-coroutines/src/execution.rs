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

//! Run state of a single in-flight coroutine.

use crate::builder::Coroutine;
use crate::step::Step;
use cadence_core::{Delta, ExecutionId, SuspendPoint};

/// How many full passes through the steps remain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Repeats {
    Finite(u32),
    Infinite,
}

impl Repeats {
    fn has_remaining(self) -> bool {
        !matches!(self, Repeats::Finite(0))
    }

    fn consume(&mut self) {
        if let Repeats::Finite(remaining) = self {
            *remaining -= 1;
        }
    }
}

/// Outcome of advancing an execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub(crate) enum Progress {
    /// Blocked on a step or paused; keep it alive.
    Pending,
    /// Every repeat has been exhausted; the owner must drop it.
    Finished,
}

/// One running instantiation of a [`Coroutine`].
#[derive(Debug)]
pub(crate) struct Execution {
    coroutine: Coroutine,
    accumulator: Delta,
    id: ExecutionId,
    step_index: usize,
    repeats: Repeats,
    accumulation_point: SuspendPoint,
    paused: bool,
    /// A pass consumes accumulated delta, so looping drains the accumulator.
    throttled: bool,
    /// Whether any step of the current pass has been evaluated yet.
    pass_touched: bool,
}

impl Execution {
    /// # Panics
    ///
    /// Panics on `Repeats::Finite(0)`: an execution must run at least once.
    pub(crate) fn new(
        coroutine: Coroutine,
        accumulation_point: SuspendPoint,
        id: ExecutionId,
        repeats: Repeats,
    ) -> Self {
        assert!(
            repeats != Repeats::Finite(0),
            "coroutines must have at least one repeat"
        );

        Self {
            throttled: coroutine.is_throttled(),
            coroutine,
            accumulator: Delta::ZERO,
            id,
            step_index: 0,
            repeats,
            accumulation_point,
            paused: false,
            pass_touched: false,
        }
    }

    pub(crate) fn id(&self) -> ExecutionId {
        self.id
    }

    pub(crate) fn is_paused(&self) -> bool {
        self.paused
    }

    pub(crate) fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    #[cfg(test)]
    pub(crate) fn accumulator(&self) -> Delta {
        self.accumulator
    }

    #[cfg(test)]
    pub(crate) fn step_index(&self) -> usize {
        self.step_index
    }

    /// Runs steps until one blocks or the last repeat is exhausted.
    ///
    /// A paused execution is left untouched and does not consume `delta`.
    /// A looping execution keeps passing while the accumulated delta satisfies
    /// its waits. One whose steps consume no delta yields after completing a
    /// pass that also began in this call, so it cannot spin forever.
    ///
    /// # Panics
    ///
    /// Panics if the coroutine has no steps.
    pub(crate) fn advance(&mut self, point: SuspendPoint, delta: Delta) -> Progress {
        if self.paused {
            return Progress::Pending;
        }

        assert!(
            !self.coroutine.is_empty(),
            "coroutines must have at least one step"
        );

        let mut delta = delta;
        let at_accumulation_point = point == self.accumulation_point;
        let mut pass_started_here = !self.pass_touched;

        while self.repeats.has_remaining() {
            while let Some(step) = self.coroutine.step(self.step_index) {
                self.pass_touched = true;
                if !try_make_step(
                    step,
                    point,
                    at_accumulation_point,
                    &mut delta,
                    &mut self.accumulator,
                ) {
                    return Progress::Pending;
                }
                self.step_index += 1;
            }

            self.step_index = 0;
            self.pass_touched = false;
            self.repeats.consume();

            if self.repeats == Repeats::Infinite && !self.throttled && pass_started_here {
                return Progress::Pending;
            }
            pass_started_here = true;
        }

        Progress::Finished
    }
}

/// Evaluates one step, returning `true` if it completed.
fn try_make_step(
    step: &Step,
    point: SuspendPoint,
    at_accumulation_point: bool,
    delta: &mut Delta,
    accumulator: &mut Delta,
) -> bool {
    if step.is_accumulating() && !at_accumulation_point {
        return false;
    }

    match step {
        Step::Run(action) => {
            action.run();
            true
        }

        Step::WaitForSuspensionPoint(target) => *target == point,

        Step::WaitForDuration(seconds) => {
            accumulator.absorb(delta);
            if *seconds > accumulator.time {
                return false;
            }

            accumulator.time -= *seconds;
            true
        }

        Step::WaitForFrameCount(frames) => {
            accumulator.absorb(delta);
            if *frames > accumulator.frames {
                return false;
            }

            accumulator.frames -= *frames;
            true
        }

        Step::WaitUntil {
            predicate,
            polarity,
        } => polarity.is_satisfied(predicate.check()),
    }
}
