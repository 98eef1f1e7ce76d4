//! Timer-driven spawning and the async fetch plumbing.
//!
//! Each tick the scheduler issues a job; fetch + parse run on the IO task
//! pool and the resulting outlines come back over a channel, so the world
//! is only ever touched from the main schedule. A result that arrives
//! after teardown carries a stale world generation and is discarded.

use crate::{AppState, RunState, SimContext};
use async_channel::{Receiver, Sender};
use bevy::prelude::*;
use bevy::tasks::IoTaskPool;
use letterfall2d::loader;
use letterfall2d::scheduler::SpawnJob;
use letterfall2d::Error;
use svg_to_collider::Outline;

pub struct LoadResult {
    pub url: String,
    pub job: SpawnJob,
    pub outcome: Result<Vec<Outline>, Error>,
}

#[derive(Resource)]
pub struct FetchChannel {
    pub snd: Sender<LoadResult>,
    pub rcv: Receiver<LoadResult>,
}

/// The spawn interval timer. `None` once cancelled; cancellation happens
/// exactly once, whether triggered by natural completion or by teardown.
#[derive(Resource)]
pub struct SpawnTimer {
    timer: Option<Timer>,
}

impl SpawnTimer {
    pub fn new(period: f32) -> Self {
        Self {
            timer: Some(Timer::from_seconds(period, TimerMode::Repeating)),
        }
    }

    pub fn cancel(&mut self) {
        if self.timer.take().is_some() {
            info!("spawn timer cancelled");
        }
    }

    pub fn is_active(&self) -> bool {
        self.timer.is_some()
    }
}

pub fn tick_spawner(
    time: Res<Time>,
    app_state: Res<AppState>,
    mut spawn_timer: ResMut<SpawnTimer>,
    mut sim: ResMut<SimContext>,
    channel: Res<FetchChannel>,
) {
    if app_state.run_state == RunState::Paused {
        return;
    }
    let Some(timer) = spawn_timer.timer.as_mut() else {
        return;
    };
    if !timer.tick(time.delta()).just_finished() {
        return;
    }

    let sim = &mut *sim;
    let mut rng = rand::thread_rng();
    let Some(job) = sim.scheduler.tick(
        &mut rng,
        sim.config.assets.len(),
        sim.viewport.width,
        sim.config.drop_height,
        sim.world.generation(),
    ) else {
        // A tick can also come back empty while the window is minimized;
        // only a stopped scheduler retires the timer.
        if sim.scheduler.is_stopped() {
            spawn_timer.cancel();
        }
        return;
    };

    let url = sim.config.assets[job.asset].clone();
    let sample_length = sim.config.sample_length;
    let snd = channel.snd.clone();
    IoTaskPool::get()
        .spawn(async move {
            let outcome = loader::fetch_svg(&url)
                .and_then(|svg| loader::parse_outlines(&svg, sample_length));
            let _ = snd.send(LoadResult { url, job, outcome }).await;
        })
        .detach();

    if sim.scheduler.is_stopped() {
        spawn_timer.cancel();
    }
}

/// Drains finished loads into the world. Failures are logged and skipped:
/// a failed spawn simply adds nothing and the scheduler carries on.
pub fn apply_loaded(mut sim: ResMut<SimContext>, channel: Res<FetchChannel>) {
    while let Ok(result) = channel.rcv.try_recv() {
        let sim = &mut *sim;
        if result.job.generation != sim.world.generation() {
            info!("{}: discarding load for a torn-down world", result.url);
            continue;
        }
        match result.outcome {
            Ok(outlines) => {
                if outlines.is_empty() {
                    warn!("{}: document has no outlines; nothing spawned", result.url);
                    continue;
                }
                let added = loader::spawn_outlines(
                    &mut sim.world,
                    &mut sim.palette,
                    &outlines,
                    result.job.x,
                    result.job.y,
                    &sim.config,
                );
                debug!("{}: spawned {added} bodies", result.url);
            }
            Err(e) => warn!("glyph load failed: {e}"),
        }
    }
}
