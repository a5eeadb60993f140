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

//! # Cadence Coroutines
//!
//! A cooperative, single-threaded coroutine executor driven by a host loop.
//!
//! A [`Coroutine`] is an immutable list of [`Step`]s: run-once actions and
//! waits on a loop phase, an elapsed duration, an elapsed frame count or a
//! predicate. A [`CoroutineExecutor`] runs any number of executions of those
//! definitions, advancing them each time the host calls
//! [`continue_at`](CoroutineExecutor::continue_at) for one of its phases. No
//! threads, stack switching or language-level generators are involved: every
//! execution is an explicit step cursor plus an elapsed-time/frame accumulator.
//!
//! ```rust,ignore
//! let mut executor = CoroutineExecutor::new();
//! let fade = Coroutine::builder()
//!     .then_run(|| log::info!("fade out"))
//!     .then_wait_seconds(1.5)
//!     .then_run(|| log::info!("fade in"))
//!     .build();
//!
//! let handle = executor.execute_once(&fade, SuspendPoint::Update);
//! loop {
//!     executor.continue_at(SuspendPoint::Update, 1, frame_time);
//!     if handle.has_finished(&executor) { break; }
//! }
//! ```

#![warn(missing_docs)]

pub mod builder;
pub mod config;
pub mod driver;
pub mod error;
mod execution;
pub mod executor;
pub mod handle;
pub mod stats;
pub mod step;

pub use builder::{Coroutine, CoroutineBuilder};
pub use config::{DriverConfig, ExecutorConfig};
pub use driver::PhaseDriver;
pub use error::CoroutineError;
pub use executor::CoroutineExecutor;
pub use handle::CoroutineHandle;
pub use stats::ExecutorStats;
pub use step::{Polarity, Predicate, Runnable, Step};

pub use cadence_core::{Delta, ExecutionId, SuspendPoint};
