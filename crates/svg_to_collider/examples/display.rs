// SPDX-License-Identifier: MIT OR Apache-2.0

use bevy::prelude::*;
use svg_to_collider::{outlines, Outline};

const LETTER: &str = include_str!("../../../assets/letters/S.svg");

fn main() {
    let outlines = outlines(LETTER, 10.0).expect("embedded letter parses");

    App::new()
        .add_plugins(DefaultPlugins)
        .insert_resource(OutlineStorage(outlines))
        .add_systems(Startup, setup)
        .add_systems(Update, show_outlines)
        .run();
}

#[derive(Resource)]
pub struct OutlineStorage(pub Vec<Outline>);

pub fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);
}

pub fn show_outlines(mut g: Gizmos, outlines: Res<OutlineStorage>) {
    for (i, outline) in outlines.0.iter().enumerate() {
        let color = Color::hsl(i as f32 * 67.0 % 360.0, 0.8, 0.5);
        // SVG y grows downward; invert for bevy.
        let mut points: Vec<Vec2> = outline
            .points
            .iter()
            .map(|p| Vec2::new((p.x - 50.0) * 2.0, (70.0 - p.y) * 2.0))
            .collect();
        if let Some(first) = points.first().copied() {
            points.push(first);
        }
        g.linestrip_2d(points, color);
    }
}
