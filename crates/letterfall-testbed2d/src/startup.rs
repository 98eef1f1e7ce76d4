use crate::graphics::{GlyphGraphics, RenderContext};
use crate::lifecycle;
use crate::spawn::{FetchChannel, LoadResult};
use crate::{AppState, RunState};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Installs the app-wide resources and the 2D camera. Runs once; scene
/// setup happens through [`SceneInits::init_scene`](crate::SceneInits).
pub fn setup_app(mut commands: Commands, windows: Query<&Window, With<PrimaryWindow>>) {
    commands.insert_resource(AppState {
        run_state: RunState::Running,
        gravity_factor: 1.0,
        restarting: false,
        selected_scene: 0,
    });

    let (snd, rcv) = async_channel::unbounded::<LoadResult>();
    commands.insert_resource(FetchChannel { snd, rcv });

    // Physics uses page coordinates (origin top-left, y down); the camera
    // is centered so the visible rect is [(0,0), (w,h)] after the y flip.
    let (width, height) = windows
        .get_single()
        .map(|window| (window.width(), window.height()))
        .unwrap_or((1280.0, 720.0));
    let center = lifecycle::camera_center(width, height);
    commands.spawn((Camera2d, Transform::from_xyz(center.x, center.y, 0.0)));
}

/// Resets the run state when a scene is (re)initialized.
pub fn setup_app_state(mut app_state: ResMut<AppState>) {
    app_state.run_state = RunState::Running;
}

/// Clears all glyph graphics; the sync system rebuilds them from whatever
/// bodies the freshly initialized world contains.
pub fn setup_graphics(
    mut commands: Commands,
    mut render: ResMut<RenderContext>,
    to_clear: Query<Entity, With<GlyphGraphics>>,
) {
    for entity in to_clear.iter() {
        commands.entity(entity).despawn();
    }
    render.entities.clear();
}
