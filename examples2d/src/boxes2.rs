//! An offline scene: no HTTP and no spawn timer. A rain of squares is
//! inserted up front, so stepping, rendering and dragging can be exercised
//! without the asset server running.

use letterfall2d::{
    loader, DragController, Palette, PhysicsWorld, RainConfig, SpawnScheduler, Viewport,
};
use letterfall_testbed2d::{AppState, SimContext};
use nalgebra::Point2;
use svg_to_collider::Outline;

fn square(size: f32) -> Outline {
    Outline {
        points: vec![
            Point2::new(0.0, 0.0),
            Point2::new(size, 0.0),
            Point2::new(size, size),
            Point2::new(0.0, size),
        ],
    }
}

pub fn boxes_demo(viewport: Viewport, app_state: &mut AppState) -> SimContext {
    let config = RainConfig {
        assets: vec![],
        max_drops: 0,
        scale: 1.0,
        ..Default::default()
    };

    if !app_state.restarting {
        app_state.gravity_factor = config.gravity_factor;
    }

    let mut world = PhysicsWorld::new(viewport, app_state.gravity_factor);
    let mut palette = Palette::new(config.palette.clone());

    let outlines = [square(60.0)];
    let columns = 8;
    for i in 0..columns {
        let x = viewport.width * (i as f32 + 0.5) / columns as f32;
        let y = config.drop_height - 80.0 * i as f32;
        loader::spawn_outlines(&mut world, &mut palette, &outlines, x, y, &config);
    }

    SimContext {
        world,
        palette,
        scheduler: SpawnScheduler::new(config.max_drops),
        drag: DragController::new(config.drag_stiffness, config.drag_damping),
        config,
        viewport,
    }
}
