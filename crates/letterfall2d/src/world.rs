//! Rapier world wrapper: boundaries, glyph bodies, stepping, teardown.

use crate::palette::Color;
use rapier2d::prelude::*;
use std::collections::HashMap;

/// Current window size in pixels. The physics world uses the same pixel
/// coordinates as the page it reproduces: origin at the top-left corner,
/// y growing downward.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Visual style attached to a glyph body. Boundary bodies carry no style
/// and are never rendered.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GlyphStyle {
    pub fill: Color,
    pub stroke: Color,
    pub line_width: f32,
}

/// Downward acceleration corresponding to a gravity factor of 1, in px/s².
pub const BASE_GRAVITY: f32 = 981.0;

/// The shared mutable simulation state: the full rapier context, the static
/// boundaries, the per-body styles, and a generation counter bumped on every
/// teardown so in-flight loads can detect that their world is gone.
pub struct PhysicsWorld {
    pub bodies: RigidBodySet,
    pub colliders: ColliderSet,
    pub gravity: Vector<Real>,
    pub integration_parameters: IntegrationParameters,
    pub physics_pipeline: PhysicsPipeline,
    pub islands: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub impulse_joints: ImpulseJointSet,
    pub multibody_joints: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
    styles: HashMap<RigidBodyHandle, GlyphStyle>,
    boundaries: Vec<RigidBodyHandle>,
    generation: u64,
}

impl PhysicsWorld {
    /// Creates the simulation space with downward gravity and three static,
    /// invisible boundary bodies sized to the viewport: a ground strip
    /// spanning the full width at the bottom and two walls just outside the
    /// left and right edges.
    pub fn new(viewport: Viewport, gravity_factor: f32) -> Self {
        let mut world = Self {
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            gravity: vector![0.0, BASE_GRAVITY * gravity_factor],
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            styles: HashMap::new(),
            boundaries: Vec::new(),
            generation: 0,
        };
        world.add_boundaries(viewport);
        world
    }

    fn add_boundary(&mut self, center: Vector<Real>, half_width: f32, half_height: f32) {
        let rb = RigidBodyBuilder::fixed().translation(center);
        let handle = self.bodies.insert(rb);
        let co = ColliderBuilder::cuboid(half_width, half_height);
        self.colliders
            .insert_with_parent(co, handle, &mut self.bodies);
        self.boundaries.push(handle);
    }

    fn add_boundaries(&mut self, viewport: Viewport) {
        let (w, h) = (viewport.width, viewport.height);
        // Ground: w×10 centered on the bottom edge. Walls: 20×h just
        // outside the left/right edges, same as the reference page.
        self.add_boundary(vector![w / 2.0, h], w / 2.0, 5.0);
        self.add_boundary(vector![-1.0, h / 2.0], 10.0, h / 2.0);
        self.add_boundary(vector![w + 1.0, h / 2.0], 10.0, h / 2.0);
    }

    /// Builds one dynamic body from a closed outline and inserts it at
    /// `(x, y)`. The outline is recentered on its centroid and scaled by
    /// `scale` first; concave outlines become a convex decomposition.
    /// Returns `None` for degenerate outlines (fewer than three points).
    pub fn insert_glyph(
        &mut self,
        outline: &[Point<Real>],
        x: f32,
        y: f32,
        scale: f32,
        style: GlyphStyle,
    ) -> Option<RigidBodyHandle> {
        if outline.len() < 3 {
            return None;
        }

        let centroid = outline
            .iter()
            .fold(vector![0.0, 0.0], |acc, p| acc + p.coords)
            / outline.len() as f32;
        let vertices: Vec<Point<Real>> = outline
            .iter()
            .map(|p| ((p.coords - centroid) * scale).into())
            .collect();
        let indices: Vec<[u32; 2]> = (0..vertices.len() as u32)
            .map(|i| [i, (i + 1) % vertices.len() as u32])
            .collect();

        // CCD keeps fast-falling glyphs from tunneling through the thin
        // ground strip.
        let rb = RigidBodyBuilder::dynamic()
            .translation(vector![x, y])
            .ccd_enabled(true);
        let handle = self.bodies.insert(rb);
        let co = ColliderBuilder::convex_decomposition(&vertices, &indices);
        self.colliders
            .insert_with_parent(co, handle, &mut self.bodies);
        self.styles.insert(handle, style);
        Some(handle)
    }

    /// Advances the simulation by one fixed step.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
    }

    pub fn set_gravity_factor(&mut self, factor: f32) {
        self.gravity = vector![0.0, BASE_GRAVITY * factor];
    }

    pub fn style(&self, handle: RigidBodyHandle) -> Option<&GlyphStyle> {
        self.styles.get(&handle)
    }

    /// Handles of glyph bodies, i.e. everything except the boundaries.
    pub fn glyph_handles(&self) -> impl Iterator<Item = RigidBodyHandle> + '_ {
        self.styles.keys().copied()
    }

    pub fn num_glyphs(&self) -> usize {
        self.styles.len()
    }

    pub fn num_boundaries(&self) -> usize {
        self.boundaries.len()
    }

    /// Half-extents of the boundary cuboids, in creation order. Used to
    /// check that a resize leaves them untouched.
    pub fn boundary_extents(&self) -> Vec<Vector<Real>> {
        self.boundaries
            .iter()
            .filter_map(|handle| {
                let body = self.bodies.get(*handle)?;
                let collider = self.colliders.get(*body.colliders().first()?)?;
                Some(collider.shape().as_cuboid()?.half_extents)
            })
            .collect()
    }

    /// Generation advanced by every [`clear`](Self::clear); loads issued
    /// against an older generation must be discarded.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Full teardown clear: removes every body, including the static
    /// boundaries, resets all internal engine state, and bumps the world
    /// generation. Idempotent.
    pub fn clear(&mut self) {
        self.bodies = RigidBodySet::new();
        self.colliders = ColliderSet::new();
        self.islands = IslandManager::new();
        self.broad_phase = DefaultBroadPhase::new();
        self.narrow_phase = NarrowPhase::new();
        self.impulse_joints = ImpulseJointSet::new();
        self.multibody_joints = MultibodyJointSet::new();
        self.ccd_solver = CCDSolver::new();
        self.styles.clear();
        self.boundaries.clear();
        self.generation += 1;
    }
}
