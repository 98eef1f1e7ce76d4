//! Pointer spring constraint for dragging spawned bodies.
//!
//! Equivalent of the reference mouse constraint (stiffness 0.2, damping 2,
//! never rendered): grabbing stores the body-local anchor under the
//! pointer, and every step applies a spring impulse pulling that anchor
//! toward the pointer position.

use crate::world::PhysicsWorld;
use rapier2d::parry::query::PointQuery;
use rapier2d::prelude::*;

struct Grab {
    body: RigidBodyHandle,
    local_anchor: Point<Real>,
}

/// One shared drag binding for the whole viewport; any dynamic body can be
/// grabbed.
pub struct DragController {
    stiffness: f32,
    damping: f32,
    grabbed: Option<Grab>,
}

impl DragController {
    pub fn new(stiffness: f32, damping: f32) -> Self {
        Self {
            stiffness,
            damping,
            grabbed: None,
        }
    }

    /// Grabs the first dynamic body whose collider contains `target`
    /// (world/pixel coordinates). Returns whether anything was grabbed.
    pub fn grab(&mut self, world: &PhysicsWorld, target: Point<Real>) -> bool {
        for (_, collider) in world.colliders.iter() {
            let Some(body_handle) = collider.parent() else {
                continue;
            };
            let Some(body) = world.bodies.get(body_handle) else {
                continue;
            };
            if !body.is_dynamic() {
                continue;
            }
            if collider
                .shape()
                .contains_point(collider.position(), &target)
            {
                self.grabbed = Some(Grab {
                    body: body_handle,
                    local_anchor: body.position().inverse_transform_point(&target),
                });
                return true;
            }
        }
        false
    }

    /// Pulls the grabbed anchor toward `target` with a damped spring
    /// impulse. A stale grab (body removed by teardown) is silently
    /// dropped.
    pub fn apply(&mut self, world: &mut PhysicsWorld, target: Point<Real>) {
        let Some(grab) = &self.grabbed else {
            return;
        };
        let dt = world.integration_parameters.dt;
        let Some(body) = world.bodies.get_mut(grab.body) else {
            self.grabbed = None;
            return;
        };

        let anchor = body.position().transform_point(&grab.local_anchor);
        let delta = target - anchor;
        let anchor_vel = body.velocity_at_point(&anchor);
        let impulse = (delta * self.stiffness - anchor_vel * self.damping * dt) * body.mass();
        body.apply_impulse_at_point(impulse, anchor, true);
    }

    /// Drops the current grab, if any. Idempotent.
    pub fn release(&mut self) {
        self.grabbed = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.grabbed.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::DEFAULT_COLORS;
    use crate::world::{GlyphStyle, Viewport};

    fn world_with_square(x: f32, y: f32) -> PhysicsWorld {
        let mut world = PhysicsWorld::new(Viewport::new(800.0, 600.0), 1.0);
        let square = [
            point![0.0, 0.0],
            point![40.0, 0.0],
            point![40.0, 40.0],
            point![0.0, 40.0],
        ];
        let style = GlyphStyle {
            fill: DEFAULT_COLORS[0],
            stroke: DEFAULT_COLORS[0],
            line_width: 1.0,
        };
        world.insert_glyph(&square, x, y, 1.0, style).unwrap();
        world
    }

    #[test]
    fn grabs_only_dynamic_bodies() {
        let world = world_with_square(400.0, 300.0);
        let mut drag = DragController::new(0.2, 2.0);

        // Inside the ground strip: static, not grabbable.
        assert!(!drag.grab(&world, point![400.0, 600.0]));
        // Empty space.
        assert!(!drag.grab(&world, point![100.0, 100.0]));
        // On the square.
        assert!(drag.grab(&world, point![400.0, 300.0]));
        assert!(drag.is_dragging());
    }

    #[test]
    fn spring_pulls_body_toward_target() {
        let mut world = world_with_square(400.0, 100.0);
        // No gravity so the pull is the only influence.
        world.set_gravity_factor(0.0);
        let mut drag = DragController::new(0.2, 2.0);
        assert!(drag.grab(&world, point![400.0, 100.0]));

        let target = point![200.0, 100.0];
        let handle = world.glyph_handles().next().unwrap();
        let before = (world.bodies[handle].translation() - target.coords).norm();
        for _ in 0..120 {
            drag.apply(&mut world, target);
            world.step();
        }
        let after = (world.bodies[handle].translation() - target.coords).norm();
        assert!(after < before / 2.0, "drag did not converge: {before} -> {after}");
    }

    #[test]
    fn stale_grab_is_dropped_after_clear() {
        let mut world = world_with_square(400.0, 300.0);
        let mut drag = DragController::new(0.2, 2.0);
        assert!(drag.grab(&world, point![400.0, 300.0]));

        world.clear();
        drag.apply(&mut world, point![100.0, 100.0]);
        assert!(!drag.is_dragging());

        drag.release();
        assert!(!drag.is_dragging());
    }
}
