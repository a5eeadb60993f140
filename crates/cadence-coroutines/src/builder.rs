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

//! Construction of immutable, shareable coroutine definitions.

use crate::step::{Polarity, Predicate, Runnable, Step};
use cadence_core::SuspendPoint;
use std::ops::Deref;
use std::rc::Rc;

/// An immutable, reference-counted sequence of [`Step`]s.
///
/// Cloning a `Coroutine` is cheap: it only increments the reference count.
/// Any number of executions may run the same definition at once, each with its
/// own progress cursor.
///
/// A definition with no steps can be built, but running it is a fatal usage
/// error.
#[derive(Debug, Clone)]
pub struct Coroutine(Rc<[Step]>);

impl Coroutine {
    /// Returns a builder for a new coroutine.
    pub fn builder() -> CoroutineBuilder {
        CoroutineBuilder::new()
    }

    /// Returns the step at `index`, if any.
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.0.get(index)
    }

    /// Returns all steps in execution order.
    pub fn steps(&self) -> &[Step] {
        &self.0
    }

    /// Returns `true` if a pass through the steps consumes accumulated time
    /// or frames, so repeating it cannot go on without fresh delta.
    pub fn is_throttled(&self) -> bool {
        self.steps().iter().any(Step::consumes_delta)
    }

    /// Returns `true` if both values refer to the same shared definition.
    pub fn ptr_eq(&self, other: &Coroutine) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for Coroutine {
    type Target = [Step];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Step>> for Coroutine {
    fn from(steps: Vec<Step>) -> Self {
        Self(Rc::from(steps))
    }
}

/// Appends steps in order and freezes them into a [`Coroutine`].
///
/// ```rust,ignore
/// let blink = Coroutine::builder()
///     .then_run(|| light.toggle())
///     .then_wait_seconds(0.5)
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct CoroutineBuilder {
    steps: Vec<Step>,
}

impl CoroutineBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Appends an action that runs once when reached.
    pub fn then_run<R: Runnable + 'static>(mut self, action: R) -> Self {
        self.steps.push(Step::Run(Box::new(action)));
        self
    }

    /// Appends a wait that completes when the executor is continued at `point`.
    pub fn then_wait_for_point(mut self, point: SuspendPoint) -> Self {
        self.steps.push(Step::WaitForSuspensionPoint(point));
        self
    }

    /// Appends a wait for `seconds` of time accumulated at the accumulation point.
    ///
    /// # Panics
    ///
    /// Panics if `seconds` is negative or not finite.
    pub fn then_wait_seconds(mut self, seconds: f32) -> Self {
        assert!(
            seconds.is_finite() && seconds >= 0.0,
            "coroutine wait duration must be finite and non-negative, got {seconds}"
        );
        self.steps.push(Step::WaitForDuration(seconds));
        self
    }

    /// Appends a wait for `frames` frames accumulated at the accumulation point.
    pub fn then_wait_frames(mut self, frames: u32) -> Self {
        self.steps.push(Step::WaitForFrameCount(frames));
        self
    }

    /// Appends a wait that completes once `predicate` returns `true`.
    pub fn then_wait_until<P: Predicate + 'static>(self, predicate: P) -> Self {
        self.then_wait_predicate(predicate, Polarity::Until)
    }

    /// Appends a wait that completes once `predicate` returns `false`.
    pub fn then_wait_while<P: Predicate + 'static>(self, predicate: P) -> Self {
        self.then_wait_predicate(predicate, Polarity::While)
    }

    /// Appends a predicate wait with an explicit polarity.
    pub fn then_wait_predicate<P: Predicate + 'static>(
        mut self,
        predicate: P,
        polarity: Polarity,
    ) -> Self {
        self.steps.push(Step::WaitUntil {
            predicate: Box::new(predicate),
            polarity,
        });
        self
    }

    /// Returns the number of steps appended so far.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if no step has been appended.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Freezes the steps into a shareable definition.
    pub fn build(self) -> Coroutine {
        Coroutine::from(self.steps)
    }
}
