//! The letter rain scene: SVG letters fetched from the local asset server,
//! dropped into the viewport at a fixed interval.

use bevy::prelude::*;
use letterfall2d::{
    DragController, Palette, PhysicsWorld, RainConfig, SpawnScheduler, Viewport,
};
use letterfall_testbed2d::{AppState, SimContext};

pub fn letter_rain_demo(viewport: Viewport, app_state: &mut AppState) -> SimContext {
    let (config, warnings) = RainConfig::load_or_default("assets/config/letterfall.ron");
    for warning in &warnings {
        warn!("config: {warning}");
    }

    if !app_state.restarting {
        app_state.gravity_factor = config.gravity_factor;
    }

    SimContext {
        world: PhysicsWorld::new(viewport, app_state.gravity_factor),
        palette: Palette::new(config.palette.clone()),
        scheduler: SpawnScheduler::new(config.max_drops),
        drag: DragController::new(config.drag_stiffness, config.drag_damping),
        config,
        viewport,
    }
}
