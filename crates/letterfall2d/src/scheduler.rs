//! Interval-driven spawning, modeled as an explicit state machine.

use rand::Rng;

/// One pending spawn: which asset to drop and where.
///
/// Consumed exactly once by the loader; never retained.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnJob {
    /// Index into the configured asset list.
    pub asset: usize,
    /// Horizontal spawn coordinate, uniform in `[0, viewport_width)`.
    pub x: f32,
    /// Vertical spawn coordinate, fixed above the visible area.
    pub y: f32,
    /// World generation captured at spawn time. A load result whose
    /// generation no longer matches the world is discarded on arrival.
    pub generation: u64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    Running,
    Stopped,
}

/// Issues up to `max_drops` spawn jobs, one per tick, then stops.
///
/// `Stopped` is terminal: no tick transitions out of it, and `cancel` is
/// idempotent, so teardown racing natural completion is harmless.
#[derive(Clone, Debug)]
pub struct SpawnScheduler {
    max_drops: u32,
    completed: u32,
    state: SchedulerState,
}

impl SpawnScheduler {
    pub fn new(max_drops: u32) -> Self {
        Self {
            max_drops,
            completed: 0,
            state: if max_drops == 0 {
                SchedulerState::Stopped
            } else {
                SchedulerState::Running
            },
        }
    }

    /// The single transition function. In `Running`, picks a random asset
    /// and horizontal position, counts the spawn, and moves to `Stopped`
    /// once the final job has been issued. In `Stopped`, does nothing.
    ///
    /// A tick with no assets or a degenerate viewport (a minimized window
    /// reports 0×0) issues nothing and stays `Running`.
    pub fn tick<R: Rng>(
        &mut self,
        rng: &mut R,
        num_assets: usize,
        viewport_width: f32,
        drop_height: f32,
        generation: u64,
    ) -> Option<SpawnJob> {
        if self.state == SchedulerState::Stopped || num_assets == 0 || viewport_width <= 0.0 {
            return None;
        }

        let job = SpawnJob {
            asset: rng.gen_range(0..num_assets),
            x: rng.gen_range(0.0..viewport_width),
            y: drop_height,
            generation,
        };

        self.completed += 1;
        if self.completed >= self.max_drops {
            self.state = SchedulerState::Stopped;
        }
        Some(job)
    }

    /// Forces `Stopped`. Safe to call any number of times, before or after
    /// natural completion.
    pub fn cancel(&mut self) {
        self.state = SchedulerState::Stopped;
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_stopped(&self) -> bool {
        self.state == SchedulerState::Stopped
    }

    /// Number of jobs issued so far.
    pub fn completed(&self) -> u32 {
        self.completed
    }

    pub fn max_drops(&self) -> u32 {
        self.max_drops
    }
}
