//! Keeps one bevy entity in sync with every glyph body: a filled mesh
//! built from the collider's convex decomposition plus a gizmo stroke.
//! Boundary bodies carry no style and are never rendered.

use crate::SimContext;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;
use rapier2d::parry::shape::{Shape, TypedShape};
use rapier2d::math::Real;
use rapier2d::prelude::*;
use std::collections::HashMap;

#[derive(Component)]
pub struct GlyphGraphics {
    pub handle: RigidBodyHandle,
}

#[derive(Resource, Default)]
pub struct RenderContext {
    pub entities: HashMap<RigidBodyHandle, Entity>,
}

pub fn update_glyph_graphics(
    mut commands: Commands,
    mut render: ResMut<RenderContext>,
    sim: Res<SimContext>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut transforms: Query<&mut Transform, With<GlyphGraphics>>,
    mut gizmos: Gizmos,
) {
    // New bodies get an entity.
    for handle in sim.world.glyph_handles() {
        if render.entities.contains_key(&handle) {
            continue;
        }
        let Some(style) = sim.world.style(handle) else {
            continue;
        };
        let Some(body) = sim.world.bodies.get(handle) else {
            continue;
        };
        let Some(collider) = body
            .colliders()
            .first()
            .and_then(|c| sim.world.colliders.get(*c))
        else {
            continue;
        };

        let fill = style.fill.to_f32_array();
        let translation = body.translation();
        let entity = commands
            .spawn((
                Mesh2d(meshes.add(glyph_mesh(collider.shape()))),
                MeshMaterial2d(materials.add(Color::srgb(fill[0], fill[1], fill[2]))),
                Transform::from_xyz(translation.x, -translation.y, 1.0),
                GlyphGraphics { handle },
            ))
            .id();
        render.entities.insert(handle, entity);
    }

    // Bodies removed by teardown/restart lose their entity.
    let world = &sim.world;
    render.entities.retain(|handle, entity| {
        if world.bodies.get(*handle).is_some() && world.style(*handle).is_some() {
            true
        } else {
            commands.entity(*entity).despawn();
            false
        }
    });

    // Transform sync + strokes. Physics y grows downward; invert for bevy.
    for (handle, entity) in render.entities.iter() {
        let Some(body) = sim.world.bodies.get(*handle) else {
            continue;
        };
        if let Ok(mut transform) = transforms.get_mut(*entity) {
            let translation = body.translation();
            transform.translation.x = translation.x;
            transform.translation.y = -translation.y;
            transform.rotation = Quat::from_rotation_z(-body.rotation().angle());
        }
        if let Some(style) = sim.world.style(*handle) {
            stroke_body(&mut gizmos, &sim.world, body, style.stroke.to_f32_array());
        }
    }
}

/// Triangle-fan mesh over the convex parts of a glyph collider, in
/// body-local coordinates with y already mirrored into bevy space.
fn glyph_mesh(shape: &dyn Shape) -> Mesh {
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    match shape.as_typed_shape() {
        TypedShape::ConvexPolygon(polygon) => {
            push_fan(&mut positions, &mut indices, polygon.points(), None);
        }
        TypedShape::Compound(compound) => {
            for (iso, part) in compound.shapes() {
                if let Some(polygon) = part.as_convex_polygon() {
                    push_fan(&mut positions, &mut indices, polygon.points(), Some(iso));
                }
            }
        }
        _ => {}
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

fn push_fan(
    positions: &mut Vec<[f32; 3]>,
    indices: &mut Vec<u32>,
    points: &[Point<Real>],
    iso: Option<&Isometry<Real>>,
) {
    if points.len() < 3 {
        return;
    }
    let base = positions.len() as u32;
    for p in points {
        let q = iso.map(|m| m * p).unwrap_or(*p);
        positions.push([q.x, -q.y, 0.0]);
    }
    // The y mirror flips winding; emit fans reversed to stay CCW.
    for i in 1..points.len() as u32 - 1 {
        indices.extend_from_slice(&[base, base + i + 1, base + i]);
    }
}

/// Line-width-1 outline around each convex part, drawn in world space.
fn stroke_body(gizmos: &mut Gizmos, world: &letterfall2d::PhysicsWorld, body: &RigidBody, stroke: [f32; 3]) {
    let color = Color::srgb(stroke[0], stroke[1], stroke[2]);
    for collider_handle in body.colliders() {
        let Some(collider) = world.colliders.get(*collider_handle) else {
            continue;
        };
        let position = collider.position();
        match collider.shape().as_typed_shape() {
            TypedShape::ConvexPolygon(polygon) => {
                stroke_polygon(gizmos, position, None, polygon.points(), color);
            }
            TypedShape::Compound(compound) => {
                for (iso, part) in compound.shapes() {
                    if let Some(polygon) = part.as_convex_polygon() {
                        stroke_polygon(gizmos, position, Some(iso), polygon.points(), color);
                    }
                }
            }
            _ => {}
        }
    }
}

fn stroke_polygon(
    gizmos: &mut Gizmos,
    position: &Isometry<Real>,
    iso: Option<&Isometry<Real>>,
    points: &[Point<Real>],
    color: Color,
) {
    let mut strip: Vec<Vec2> = points
        .iter()
        .map(|p| {
            let local = iso.map(|m| m * p).unwrap_or(*p);
            let world = position * local;
            Vec2::new(world.x, -world.y)
        })
        .collect();
    if let Some(first) = strip.first().copied() {
        strip.push(first);
    }
    gizmos.linestrip_2d(strip, color);
}
