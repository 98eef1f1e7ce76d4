use crate::drag::PointerState;
use crate::{AppState, RunState, SimContext};
use bevy::prelude::*;

/// Advances the physics world by one fixed step (60 Hz), applying the
/// pointer spring first so a held body is pulled exactly once per step.
pub fn step_simulation(
    mut sim: ResMut<SimContext>,
    pointer: Res<PointerState>,
    mut app_state: ResMut<AppState>,
) {
    let sim = &mut *sim;
    sim.world.set_gravity_factor(app_state.gravity_factor);

    if let Some(target) = pointer.target {
        sim.drag.apply(&mut sim.world, target);
    }
    sim.world.step();

    if app_state.run_state == RunState::Step {
        app_state.run_state = RunState::Paused;
    }
}
