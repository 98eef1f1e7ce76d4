use bevy::prelude::*;
use letterfall_testbed2d::{init_testbed, SceneInitFn, SceneInits};

mod boxes2;
mod letters2;

pub fn main() {
    let mut app = App::new();
    init_testbed(&mut app);
    app.add_systems(
        Startup,
        (register_scenes, start_default_scene)
            .chain()
            .after(letterfall_testbed2d::startup::setup_app),
    );
    app.run();
}

fn register_scenes(world: &mut World) {
    let scenes: Vec<(String, SceneInitFn)> = vec![
        (
            "letter_rain".to_string(),
            Box::new(letters2::letter_rain_demo),
        ),
        ("boxes".to_string(), Box::new(boxes2::boxes_demo)),
    ];
    let mut inits = world.resource_mut::<SceneInits>();
    inits.scenes = scenes;
}

fn start_default_scene(mut commands: Commands, scenes: Res<SceneInits>) {
    scenes.init_scene(&mut commands, 0);
}
