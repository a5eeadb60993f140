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

use cadence_coroutines::{Coroutine, CoroutineExecutor, SuspendPoint};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

// --- HELPERS ---

/// A shared counter and a closure that increments it.
fn counter() -> (Rc<Cell<u32>>, impl Fn() + 'static) {
    let count = Rc::new(Cell::new(0));
    let c = count.clone();
    (count, move || c.set(c.get() + 1))
}

/// Returns an action that records `label` into `samples`.
fn record(samples: &Rc<RefCell<Vec<&'static str>>>, label: &'static str) -> impl Fn() + 'static {
    let samples = samples.clone();
    move || samples.borrow_mut().push(label)
}

#[test]
fn test_leading_run_executes_before_start_returns() {
    let mut executor = CoroutineExecutor::new();
    let (count, bump) = counter();
    let coroutine = Coroutine::builder()
        .then_run(bump)
        .then_wait_frames(100)
        .build();

    let handle = executor.execute_once(&coroutine, SuspendPoint::Update);

    assert_eq!(count.get(), 1, "Leading Run should execute synchronously");
    assert!(!executor.has_finished(&handle));
}

#[test]
fn test_duration_accumulates_with_carry_over() {
    // --- 1. ARRANGE ---
    let mut executor = CoroutineExecutor::new();
    let (after_first, bump_first) = counter();
    let (after_second, bump_second) = counter();
    let coroutine = Coroutine::builder()
        .then_wait_seconds(1.0)
        .then_run(bump_first)
        .then_wait_seconds(0.25)
        .then_run(bump_second)
        .build();
    let handle = executor.execute_once(&coroutine, SuspendPoint::Update);

    // --- 2. ACT & ASSERT ---
    executor.continue_at(SuspendPoint::Update, 1, 0.4);
    assert_eq!(after_first.get(), 0, "0.4s accumulated, still waiting");

    executor.continue_at(SuspendPoint::Update, 1, 0.4);
    assert_eq!(after_first.get(), 0, "0.8s accumulated, still waiting");

    executor.continue_at(SuspendPoint::Update, 1, 0.4);
    assert_eq!(after_first.get(), 1, "1.2s accumulated, wait complete");

    // The 0.2s residue carries into the next wait: 0.2 + 0.06 >= 0.25,
    // while 0.06 on its own would not be enough.
    assert_eq!(after_second.get(), 0);
    assert!(!executor.has_finished(&handle));
    executor.continue_at(SuspendPoint::Update, 1, 0.06);
    assert_eq!(after_second.get(), 1, "Residual time should carry over");
    assert!(executor.has_finished(&handle));
}

#[test]
fn test_carry_over_can_complete_next_wait_in_same_call() {
    let mut executor = CoroutineExecutor::new();
    let reached = Rc::new(Cell::new(false));
    let r = reached.clone();
    let coroutine = Coroutine::builder()
        .then_wait_seconds(1.0)
        .then_wait_seconds(0.15)
        .then_run(move || r.set(true))
        .build();
    let handle = executor.execute_once(&coroutine, SuspendPoint::Update);

    executor.continue_at(SuspendPoint::Update, 1, 0.4);
    executor.continue_at(SuspendPoint::Update, 1, 0.4);
    assert!(!reached.get());

    // 1.2s accumulated: the first wait leaves ~0.2s, enough for the second.
    executor.continue_at(SuspendPoint::Update, 1, 0.4);
    assert!(reached.get());
    assert!(executor.has_finished(&handle));
}

#[test]
fn test_frame_wait_completes_on_exact_frame() {
    let mut executor = CoroutineExecutor::new();
    let (count, bump) = counter();
    let coroutine = Coroutine::builder()
        .then_wait_frames(2)
        .then_run(bump)
        .build();
    executor.execute_once(&coroutine, SuspendPoint::FixedUpdate);

    executor.continue_at(SuspendPoint::FixedUpdate, 1, 0.02);
    assert_eq!(count.get(), 0, "One frame is not enough");

    executor.continue_at(SuspendPoint::FixedUpdate, 1, 0.02);
    assert_eq!(count.get(), 1, "Second frame completes the wait");
}

#[test]
fn test_repeats_run_exactly_n_times() {
    let mut executor = CoroutineExecutor::new();
    let (count, bump) = counter();
    let coroutine = Coroutine::builder().then_run(bump).build();

    let handle = executor
        .execute_repeats(&coroutine, SuspendPoint::Update, 3)
        .expect("Three repeats should be accepted");

    assert_eq!(count.get(), 3);
    assert!(
        !executor.has_finished(&handle),
        "Exhausted executions are removed on the next continue"
    );

    executor.continue_at(SuspendPoint::Update, 1, 0.016);
    assert!(executor.has_finished(&handle));
    assert_eq!(count.get(), 3, "No extra invocation after exhaustion");
}

#[test]
fn test_repeats_restart_waits_from_the_first_step() {
    let mut executor = CoroutineExecutor::new();
    let (count, bump) = counter();
    let coroutine = Coroutine::builder()
        .then_wait_frames(1)
        .then_run(bump)
        .build();
    let handle = executor
        .execute_repeats(&coroutine, SuspendPoint::Update, 2)
        .unwrap();

    executor.continue_at(SuspendPoint::Update, 1, 0.0);
    assert_eq!(count.get(), 1);
    assert!(!executor.has_finished(&handle));

    executor.continue_at(SuspendPoint::Update, 1, 0.0);
    assert_eq!(count.get(), 2);
    assert!(executor.has_finished(&handle));
}

#[test]
fn test_phase_wait_ignores_other_phases() {
    let mut executor = CoroutineExecutor::new();
    let (count, bump) = counter();
    let coroutine = Coroutine::builder()
        .then_wait_for_point(SuspendPoint::FixedUpdate)
        .then_run(bump)
        .build();
    let handle = executor.execute_once(&coroutine, SuspendPoint::Update);

    for _ in 0..50 {
        executor.continue_at(SuspendPoint::Update, 1, 0.016);
        executor.continue_at(SuspendPoint::LateUpdate, 1, 0.016);
    }
    assert_eq!(count.get(), 0);
    assert!(!executor.has_finished(&handle));

    executor.continue_at(SuspendPoint::FixedUpdate, 1, 0.02);
    assert_eq!(count.get(), 1);
}

#[test]
fn test_duration_only_accrues_at_accumulation_point() {
    let mut executor = CoroutineExecutor::new();
    let (count, bump) = counter();
    let coroutine = Coroutine::builder()
        .then_wait_seconds(0.1)
        .then_run(bump)
        .build();
    executor.execute_once(&coroutine, SuspendPoint::FixedUpdate);

    for _ in 0..10 {
        executor.continue_at(SuspendPoint::Update, 1, 1.0);
        executor.continue_at(SuspendPoint::LateFixedUpdate, 1, 1.0);
    }
    assert_eq!(count.get(), 0);

    executor.continue_at(SuspendPoint::FixedUpdate, 1, 0.1);
    assert_eq!(count.get(), 1);
}

#[test]
fn test_cancel_is_idempotent_and_isolated() {
    let mut executor = CoroutineExecutor::new();
    let (count, bump) = counter();
    let waiting = Coroutine::builder().then_wait_frames(2).then_run(bump).build();

    let mut victim = executor.execute_once(&waiting, SuspendPoint::Update);
    let bystander = executor.execute_once(&waiting, SuspendPoint::Update);

    assert!(executor.cancel(&mut victim));
    assert!(!executor.cancel(&mut victim), "Second cancel must be a no-op");

    // A handle for an id that was never issued by this executor.
    let mut other_executor = CoroutineExecutor::new();
    let mut unknown = other_executor.execute_once(&waiting, SuspendPoint::Update);
    other_executor.continue_at(SuspendPoint::Update, 2, 0.0);
    other_executor.continue_at(SuspendPoint::Update, 1, 0.0);
    assert!(other_executor.has_finished(&unknown));
    assert!(!other_executor.cancel(&mut unknown));
    assert!(!other_executor.cancel(&mut unknown));

    assert_eq!(executor.len(), 1);
    assert!(!executor.has_finished(&bystander));

    executor.continue_at(SuspendPoint::Update, 1, 0.0);
    executor.continue_at(SuspendPoint::Update, 1, 0.0);
    assert!(executor.has_finished(&bystander));
    assert_eq!(count.get(), 2, "Bystander plus the other executor's run");
}

#[test]
fn test_pause_freezes_accumulator() {
    // --- 1. ARRANGE ---
    let mut executor = CoroutineExecutor::new();
    let (paused_done, bump_paused) = counter();
    let (other_done, bump_other) = counter();
    let paused = Coroutine::builder()
        .then_wait_seconds(1.0)
        .then_run(bump_paused)
        .build();
    let other = Coroutine::builder()
        .then_wait_seconds(1.0)
        .then_run(bump_other)
        .build();

    let handle = executor.execute_once(&paused, SuspendPoint::Update);
    executor.execute_once(&other, SuspendPoint::Update);

    executor.continue_at(SuspendPoint::Update, 1, 0.6);

    // --- 2. ACT ---
    assert!(executor.pause(&handle));
    for _ in 0..5 {
        executor.continue_at(SuspendPoint::Update, 1, 0.5);
    }
    assert_eq!(other_done.get(), 1, "Other executions keep running");
    assert_eq!(paused_done.get(), 0);
    assert!(executor.resume(&handle));

    // --- 3. ASSERT ---
    // Only 0.6s was accumulated before the pause: 0.3 more is not enough.
    executor.continue_at(SuspendPoint::Update, 1, 0.3);
    assert_eq!(paused_done.get(), 0, "No retroactive accumulation while paused");

    executor.continue_at(SuspendPoint::Update, 1, 0.2);
    assert_eq!(paused_done.get(), 1);
}

#[test]
fn test_adjacent_completions_do_not_skip_neighbours() {
    let mut executor = CoroutineExecutor::new();
    let order = Rc::new(RefCell::new(Vec::new()));

    let finishing = |label| {
        Coroutine::builder()
            .then_wait_frames(1)
            .then_run(record(&order, label))
            .build()
    };
    let lingering = |label| {
        Coroutine::builder()
            .then_wait_frames(1)
            .then_run(record(&order, label))
            .then_wait_frames(1)
            .build()
    };

    let a = executor.execute_once(&finishing("a"), SuspendPoint::Update);
    let b = executor.execute_once(&finishing("b"), SuspendPoint::Update);
    let c = executor.execute_once(&lingering("c"), SuspendPoint::Update);
    let d = executor.execute_once(&finishing("d"), SuspendPoint::Update);

    executor.continue_at(SuspendPoint::Update, 1, 0.0);

    assert_eq!(*order.borrow(), vec!["a", "b", "c", "d"], "Each visited once");
    assert!(executor.has_finished(&a));
    assert!(executor.has_finished(&b));
    assert!(!executor.has_finished(&c));
    assert!(executor.has_finished(&d));
    assert_eq!(executor.len(), 1);
}

#[test]
fn test_predicate_waits_poll_every_phase() {
    let mut executor = CoroutineExecutor::new();
    let ready = Rc::new(Cell::new(false));
    let busy = Rc::new(Cell::new(true));
    let (count, bump) = counter();
    let (r, b) = (ready.clone(), busy.clone());
    let coroutine = Coroutine::builder()
        .then_wait_until(move || r.get())
        .then_wait_while(move || b.get())
        .then_run(bump)
        .build();
    executor.execute_once(&coroutine, SuspendPoint::Update);

    executor.continue_at(SuspendPoint::LateFixedUpdate, 0, 0.0);
    assert_eq!(count.get(), 0);

    ready.set(true);
    executor.continue_at(SuspendPoint::LateFixedUpdate, 0, 0.0);
    assert_eq!(count.get(), 0, "Still blocked on the wait-while");

    busy.set(false);
    executor.continue_at(SuspendPoint::LateUpdate, 0, 0.0);
    assert_eq!(count.get(), 1);
}

#[test]
fn test_looped_coroutine_runs_until_canceled() {
    let mut executor = CoroutineExecutor::new();
    let (count, bump) = counter();
    let coroutine = Coroutine::builder()
        .then_wait_seconds(0.5)
        .then_run(bump)
        .build();
    let mut handle = executor.execute_looped(&coroutine, SuspendPoint::Update);

    for _ in 0..10 {
        executor.continue_at(SuspendPoint::Update, 1, 0.25);
    }
    assert_eq!(count.get(), 5);
    assert!(!handle.has_finished(&executor));

    assert!(handle.cancel(&mut executor));
    executor.continue_at(SuspendPoint::Update, 1, 10.0);
    assert_eq!(count.get(), 5);
}

#[test]
fn test_looped_timed_wait_drains_carried_time_in_one_call() {
    let mut executor = CoroutineExecutor::new();
    let (count, bump) = counter();
    let coroutine = Coroutine::builder()
        .then_run(bump)
        .then_wait_seconds(0.1)
        .build();
    let handle = executor.execute_looped(&coroutine, SuspendPoint::Update);
    assert_eq!(count.get(), 1);

    // 1.05s covers ten 0.1s waits; each one reruns the leading action.
    executor.continue_at(SuspendPoint::Update, 1, 1.05);
    assert_eq!(count.get(), 11);

    // The 0.05s remainder is carried, so 0.06s more completes the next wait.
    executor.continue_at(SuspendPoint::Update, 1, 0.06);
    assert_eq!(count.get(), 12);
    assert!(!executor.has_finished(&handle));
}

#[test]
fn test_looped_frame_wait_drains_carried_frames_in_one_call() {
    let mut executor = CoroutineExecutor::new();
    let (count, bump) = counter();
    let coroutine = Coroutine::builder()
        .then_wait_frames(1)
        .then_run(bump)
        .build();
    executor.execute_looped(&coroutine, SuspendPoint::Update);

    executor.continue_at(SuspendPoint::Update, 5, 0.0);
    assert_eq!(count.get(), 5);

    executor.continue_at(SuspendPoint::Update, 1, 0.0);
    assert_eq!(count.get(), 6);
}

#[test]
fn test_looped_coroutine_without_timed_waits_runs_once_per_call() {
    let mut executor = CoroutineExecutor::new();
    let (count, bump) = counter();
    let coroutine = Coroutine::builder()
        .then_wait_for_point(SuspendPoint::LateUpdate)
        .then_run(bump)
        .build();
    executor.execute_looped(&coroutine, SuspendPoint::Update);

    for expected in 1..=3 {
        executor.continue_at(SuspendPoint::LateUpdate, 1, 1.0);
        assert_eq!(count.get(), expected);
    }
}

#[test]
fn test_shared_definition_runs_independently() {
    let mut executor = CoroutineExecutor::new();
    let (count, bump) = counter();
    let coroutine = Coroutine::builder()
        .then_wait_frames(3)
        .then_run(bump)
        .build();

    executor.execute_once(&coroutine, SuspendPoint::Update);
    executor.continue_at(SuspendPoint::Update, 1, 0.0);
    executor.execute_once(&coroutine, SuspendPoint::Update);

    executor.continue_at(SuspendPoint::Update, 1, 0.0);
    executor.continue_at(SuspendPoint::Update, 1, 0.0);
    assert_eq!(count.get(), 1, "First execution is one frame ahead");

    executor.continue_at(SuspendPoint::Update, 1, 0.0);
    assert_eq!(count.get(), 2);
}

#[test]
#[should_panic(expected = "at least one step")]
fn test_starting_empty_coroutine_is_fatal() {
    let mut executor = CoroutineExecutor::new();
    let empty = Coroutine::builder().build();
    executor.execute_once(&empty, SuspendPoint::Update);
}
