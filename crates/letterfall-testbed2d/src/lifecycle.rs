//! Resize and teardown reactions.
//!
//! Resize keeps the camera's visible rect equal to the window in page
//! coordinates; existing bodies and boundary sizes are deliberately left
//! alone (the boundaries keep their bootstrap size, matching the page
//! this reproduces). Teardown is idempotent and safe to race against the
//! scheduler's natural completion.

use crate::graphics::RenderContext;
use crate::spawn::SpawnTimer;
use crate::SimContext;
use bevy::prelude::*;
use bevy::window::{WindowCloseRequested, WindowResized};
use letterfall2d::Viewport;

/// Camera translation that makes the visible rect [(0,0), (w,h)] in page
/// coordinates after the y flip.
pub fn camera_center(width: f32, height: f32) -> Vec2 {
    Vec2::new(width / 2.0, -height / 2.0)
}

pub fn handle_resize(
    mut events: EventReader<WindowResized>,
    mut sim: ResMut<SimContext>,
    mut cameras: Query<&mut Transform, With<Camera2d>>,
) {
    let Some(event) = events.read().last() else {
        return;
    };
    sim.viewport = Viewport::new(event.width, event.height);
    if let Ok(mut transform) = cameras.get_single_mut() {
        let center = camera_center(event.width, event.height);
        transform.translation.x = center.x;
        transform.translation.y = center.y;
    }
}

pub fn handle_exit(
    mut exit_events: EventReader<AppExit>,
    mut close_events: EventReader<WindowCloseRequested>,
    mut commands: Commands,
    mut sim: ResMut<SimContext>,
    mut spawn_timer: ResMut<SpawnTimer>,
    mut render: ResMut<RenderContext>,
) {
    if exit_events.is_empty() && close_events.is_empty() {
        return;
    }
    exit_events.clear();
    close_events.clear();
    teardown(&mut commands, &mut sim, &mut spawn_timer, &mut render);
}

/// Stops everything and clears the world. Every step tolerates having
/// already run: the timer cancels once, the scheduler stays stopped, the
/// world clear on an empty world is a no-op.
pub fn teardown(
    commands: &mut Commands,
    sim: &mut SimContext,
    spawn_timer: &mut SpawnTimer,
    render: &mut RenderContext,
) {
    spawn_timer.cancel();
    sim.scheduler.cancel();
    sim.drag.release();
    sim.world.clear();
    for (_, entity) in render.entities.drain() {
        commands.entity(entity).despawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use letterfall2d::world::GlyphStyle;
    use letterfall2d::{Color, DragController, Palette, PhysicsWorld, RainConfig, SpawnScheduler};
    use rapier2d::prelude::{nalgebra, point};

    #[test]
    fn camera_center_tracks_the_window() {
        assert_eq!(camera_center(800.0, 600.0), Vec2::new(400.0, -300.0));
        assert_eq!(camera_center(1200.0, 800.0), Vec2::new(600.0, -400.0));
    }

    fn sim_context(viewport: Viewport) -> SimContext {
        let config = RainConfig::default();
        SimContext {
            world: PhysicsWorld::new(viewport, config.gravity_factor),
            palette: Palette::default(),
            scheduler: SpawnScheduler::new(config.max_drops),
            drag: DragController::new(config.drag_stiffness, config.drag_damping),
            config,
            viewport,
        }
    }

    #[test]
    fn resize_recenters_the_camera_and_nothing_else() {
        let mut app = App::new();
        app.add_event::<WindowResized>();
        app.add_systems(Update, handle_resize);

        let mut sim = sim_context(Viewport::new(800.0, 600.0));
        let square = [
            point![0.0, 0.0],
            point![40.0, 0.0],
            point![40.0, 40.0],
            point![0.0, 40.0],
        ];
        let color = Color::rgb(0x85, 0x73, 0xfb);
        let style = GlyphStyle {
            fill: color,
            stroke: color,
            line_width: 1.0,
        };
        let handle = sim
            .world
            .insert_glyph(&square, 400.0, 300.0, 1.0, style)
            .unwrap();
        let extents = sim.world.boundary_extents();
        let position = *sim.world.bodies[handle].translation();
        app.insert_resource(sim);

        let camera = app
            .world_mut()
            .spawn((Camera2d, Transform::default()))
            .id();
        let window = app.world_mut().spawn_empty().id();
        app.world_mut().send_event(WindowResized {
            window,
            width: 1200.0,
            height: 800.0,
        });
        app.update();

        let transform = app.world().get::<Transform>(camera).unwrap();
        assert_eq!(transform.translation.x, 600.0);
        assert_eq!(transform.translation.y, -400.0);

        // Bodies and boundaries keep their bootstrap geometry.
        let sim = app.world().resource::<SimContext>();
        assert_eq!(sim.viewport, Viewport::new(1200.0, 800.0));
        assert_eq!(sim.world.boundary_extents(), extents);
        assert_eq!(*sim.world.bodies[handle].translation(), position);
    }
}
