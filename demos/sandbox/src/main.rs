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

// Cadence Sandbox
// Headless host loop driving a few coroutines through every loop phase.

mod config;

use anyhow::Result;
use cadence_coroutines::{Coroutine, CoroutineExecutor, PhaseDriver, SuspendPoint};
use clap::Parser;
use config::SandboxConfig;
use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(version, about = "Runs the coroutine sandbox scene")]
struct Args {
    /// Path to a JSON sandbox configuration.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides the maximum number of simulated frames.
    #[arg(long)]
    max_frames: Option<u32>,

    /// Sleep between frames to run at the configured frame rate.
    #[arg(long)]
    realtime: bool,

    /// Phase whose time paces the blinking light (e.g. `update`, `late_update`).
    #[arg(long, value_parser = parse_point, default_value = "update")]
    blink_point: SuspendPoint,
}

fn parse_point(name: &str) -> Result<SuspendPoint, String> {
    SuspendPoint::from_name(name).ok_or_else(|| {
        let known: Vec<_> = SuspendPoint::ALL.iter().map(|point| point.name()).collect();
        format!("unknown phase '{name}', expected one of: {}", known.join(", "))
    })
}

/// Game state shared by the scene's coroutines.
#[derive(Debug, Default)]
struct Scene {
    light_on: Cell<bool>,
    enemies: Cell<u32>,
    door_open: Cell<bool>,
}

fn blink(scene: &Rc<Scene>) -> Coroutine {
    let scene = scene.clone();
    Coroutine::builder()
        .then_run(move || {
            scene.light_on.set(!scene.light_on.get());
            log::debug!("Light is now {}", if scene.light_on.get() { "on" } else { "off" });
        })
        .then_wait_seconds(0.5)
        .build()
}

fn spawn_wave(scene: &Rc<Scene>) -> Coroutine {
    let scene = scene.clone();
    Coroutine::builder()
        .then_wait_frames(25)
        .then_run(move || {
            scene.enemies.set(scene.enemies.get() + 1);
            log::info!("Spawned enemy #{}", scene.enemies.get());
        })
        .build()
}

fn cutscene(scene: &Rc<Scene>) -> Coroutine {
    let (waiting, opening, done) = (scene.clone(), scene.clone(), scene.clone());
    Coroutine::builder()
        .then_run(|| log::info!("Cutscene: waiting for the wave"))
        .then_wait_until(move || waiting.enemies.get() >= 3)
        .then_wait_for_point(SuspendPoint::LateUpdate)
        .then_run(move || {
            opening.door_open.set(true);
            log::info!("Cutscene: door opens");
        })
        .then_wait_seconds(1.0)
        .then_run(move || {
            log::info!(
                "Cutscene: finished with {} enemies, door open: {}",
                done.enemies.get(),
                done.door_open.get()
            );
        })
        .build()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = SandboxConfig::load(args.config.as_deref())?;
    if let Some(max_frames) = args.max_frames {
        config.max_frames = max_frames;
    }
    config.realtime |= args.realtime;

    log::info!("Sandbox: starting with {config:?}");

    let scene = Rc::new(Scene::default());
    let mut executor = CoroutineExecutor::with_config(config.executor.clone());
    let mut driver = PhaseDriver::new(config.driver.clone())?;

    let mut blinker = executor.execute_looped(&blink(&scene), args.blink_point);
    let wave = executor.execute_repeats(&spawn_wave(&scene), SuspendPoint::FixedUpdate, 3)?;
    let story = executor.execute_once(&cutscene(&scene), SuspendPoint::Update);

    for frame in 0..config.max_frames {
        driver.tick(&mut executor, config.frame_time);

        if scene.door_open.get() && blinker.pause(&mut executor) {
            log::info!("Sandbox: light frozen while the door is open (frame {frame})");
        }

        if story.has_finished(&executor) {
            blinker.cancel(&mut executor);
            log::info!("Sandbox: scene complete after {} frames", frame + 1);
            break;
        }

        if config.realtime {
            std::thread::sleep(Duration::from_secs_f32(config.frame_time));
        }
    }

    if !wave.has_finished(&executor) {
        log::warn!("Sandbox: enemy wave did not finish within {} frames", config.max_frames);
    }

    let stats = executor.stats();
    log::info!("--- Coroutine Summary ---");
    log::info!("  Live: {} ({} paused)", stats.live, stats.paused);
    log::info!(
        "  Started: {}, Completed: {}, Canceled: {}, Rejected: {}",
        stats.started,
        stats.completed,
        stats.canceled,
        stats.rejected
    );
    log::info!("-------------------------");

    Ok(())
}
