//! Mouse drag: cursor → world projection and grab/release handling. The
//! spring itself is applied by the fixed-step system so a held body is
//! pulled once per physics step.

use crate::SimContext;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use rapier2d::math::Real;
use rapier2d::prelude::*;

/// Pointer target in physics (pixel, y-down) coordinates while the left
/// button is held and over the window.
#[derive(Resource, Default)]
pub struct PointerState {
    pub target: Option<Point<Real>>,
}

pub fn track_pointer(
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut pointer: ResMut<PointerState>,
    mut sim: ResMut<SimContext>,
) {
    if buttons.just_released(MouseButton::Left) {
        sim.drag.release();
        pointer.target = None;
    }

    let target = windows
        .get_single()
        .ok()
        .and_then(|window| window.cursor_position())
        .and_then(|cursor| {
            let (camera, camera_transform) = cameras.get_single().ok()?;
            camera.viewport_to_world_2d(camera_transform, cursor).ok()
        })
        // Render space is y-up; physics space is y-down.
        .map(|world_pos| point![world_pos.x, -world_pos.y]);

    let sim = &mut *sim;
    if let Some(target) = target {
        if buttons.just_pressed(MouseButton::Left) {
            sim.drag.grab(&sim.world, target);
        }
        pointer.target = buttons.pressed(MouseButton::Left).then_some(target);
    } else if !buttons.pressed(MouseButton::Left) {
        pointer.target = None;
    }
}
