#![allow(clippy::too_many_arguments)]

//! Bevy application shell for the letter rain scenes: startup, fixed-step
//! simulation clock, graphics sync, spawn plumbing, drag, ui, lifecycle.

use bevy::ecs::system::SystemId;
use bevy::prelude::*;
use letterfall2d::{
    DragController, Palette, PhysicsWorld, RainConfig, SpawnScheduler, Viewport,
};

pub mod drag;
pub mod graphics;
pub mod lifecycle;
pub mod spawn;
pub mod startup;
pub mod step;
pub mod ui;

pub fn init_testbed(app: &mut App) {
    app.add_plugins(DefaultPlugins)
        .add_plugins(bevy_egui::EguiPlugin)
        .insert_resource(Time::<Fixed>::from_hz(60.0))
        .init_resource::<SceneInits>()
        .init_resource::<graphics::RenderContext>()
        .init_resource::<drag::PointerState>()
        .add_systems(Startup, startup::setup_app)
        .add_systems(
            Update,
            (
                ui::update_ui,
                spawn::tick_spawner,
                spawn::apply_loaded,
                drag::track_pointer,
                graphics::update_glyph_graphics,
                lifecycle::handle_resize,
                lifecycle::handle_exit,
            )
                .chain(),
        )
        .add_systems(
            FixedUpdate,
            step::step_simulation
                .run_if(|state: Res<AppState>| state.run_state != RunState::Paused),
        );
}

#[derive(Resource)]
pub struct AppState {
    pub run_state: RunState,
    pub gravity_factor: f32,
    pub restarting: bool,
    pub selected_scene: usize,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RunState {
    Running,
    Paused,
    Step,
}

/// Everything one scene owns: the physics world, the color cycler, the
/// spawn scheduler, the shared drag binding, and the configuration it was
/// built from. This is the "world handle" torn down on exit.
#[derive(Resource)]
pub struct SimContext {
    pub world: PhysicsWorld,
    pub palette: Palette,
    pub scheduler: SpawnScheduler,
    pub drag: DragController,
    pub config: RainConfig,
    pub viewport: Viewport,
}

#[derive(Resource)]
pub struct SceneInits {
    pub scenes: Vec<(String, SceneInitFn)>,
    reset_graphics: SystemId,
    reset_app_state: SystemId,
}

pub type SceneInitFn = Box<dyn FnMut(Viewport, &mut AppState) -> SimContext + Send + Sync>;

impl SceneInits {
    pub fn init_scene(&self, commands: &mut Commands, scene_id: usize) {
        commands.run_system(self.reset_app_state);
        commands.run_system_cached_with(run_scene_init, scene_id);
        commands.run_system(self.reset_graphics);
    }
}

pub fn run_scene_init(
    scene_id: In<usize>,
    mut commands: Commands,
    mut scenes: ResMut<SceneInits>,
    windows: Query<&Window>,
    mut app_state: ResMut<AppState>,
) {
    let viewport = windows
        .get_single()
        .map(|window| Viewport::new(window.width(), window.height()))
        .unwrap_or(Viewport::new(1280.0, 720.0));
    let context = scenes.scenes[scene_id.0].1(viewport, &mut app_state);

    let background = context.config.background;
    commands.insert_resource(ClearColor(Color::srgb_u8(
        background.r,
        background.g,
        background.b,
    )));
    commands.insert_resource(spawn::SpawnTimer::new(context.config.spawn_period));
    commands.insert_resource(context);
}

impl FromWorld for SceneInits {
    fn from_world(world: &mut World) -> Self {
        Self {
            scenes: vec![],
            reset_graphics: world.register_system(startup::setup_graphics),
            reset_app_state: world.register_system(startup::setup_app_state),
        }
    }
}
