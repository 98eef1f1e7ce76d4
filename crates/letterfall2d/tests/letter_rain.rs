//! End-to-end letter rain scenario, headless: the scheduler drives loads
//! against the bundled letter assets (read from disk instead of HTTP) and
//! the world accumulates exactly the configured number of bodies.

use letterfall2d::loader::{parse_outlines, spawn_outlines};
use letterfall2d::{Palette, PhysicsWorld, RainConfig, SpawnScheduler, Viewport};
use rand::rngs::StdRng;
use rand::SeedableRng;

const LETTERS: [&str; 5] = [
    include_str!("../../../assets/letters/S.svg"),
    include_str!("../../../assets/letters/U.svg"),
    include_str!("../../../assets/letters/J.svg"),
    include_str!("../../../assets/letters/I.svg"),
    include_str!("../../../assets/letters/N.svg"),
];

#[test]
fn twenty_ticks_spawn_twenty_bodies_and_stop() {
    let config = RainConfig::default();
    let viewport = Viewport::new(800.0, 600.0);
    let mut world = PhysicsWorld::new(viewport, config.gravity_factor);
    let mut palette = Palette::new(config.palette.clone());
    let mut scheduler = SpawnScheduler::new(config.max_drops);
    let mut rng = StdRng::seed_from_u64(2024);

    // Drive well past the maximum; every tick past the 20th is a no-op.
    for _ in 0..40 {
        let Some(job) = scheduler.tick(
            &mut rng,
            LETTERS.len(),
            viewport.width,
            config.drop_height,
            world.generation(),
        ) else {
            continue;
        };
        assert!(job.x >= 0.0 && job.x < viewport.width);
        assert_eq!(job.y, -100.0);

        let outlines = parse_outlines(LETTERS[job.asset], config.sample_length).unwrap();
        assert_eq!(outlines.len(), 1, "each letter asset is a single outline");
        let added = spawn_outlines(&mut world, &mut palette, &outlines, job.x, job.y, &config);
        assert_eq!(added, 1);
    }

    assert!(scheduler.is_stopped());
    assert_eq!(scheduler.completed(), 20);
    assert_eq!(world.num_glyphs(), 20);
    // Boundaries are still there on top of the glyphs.
    assert_eq!(world.bodies.len(), 23);
}

#[test]
fn spawned_letters_fall_into_view() {
    let config = RainConfig::default();
    let viewport = Viewport::new(800.0, 600.0);
    let mut world = PhysicsWorld::new(viewport, config.gravity_factor);
    let mut palette = Palette::default();

    let outlines = parse_outlines(LETTERS[0], config.sample_length).unwrap();
    spawn_outlines(&mut world, &mut palette, &outlines, 400.0, config.drop_height, &config);
    let handle = world.glyph_handles().next().unwrap();

    // Two simulated seconds at the fixed step.
    for _ in 0..120 {
        world.step();
    }
    let y = world.bodies[handle].translation().y;
    assert!(y > 0.0, "letter should have fallen into view, y = {y}");
    assert!(y < viewport.height, "letter should rest above the ground, y = {y}");
}

#[test]
fn teardown_races_are_harmless() {
    let config = RainConfig::default();
    let viewport = Viewport::new(800.0, 600.0);
    let mut world = PhysicsWorld::new(viewport, config.gravity_factor);
    let mut palette = Palette::default();
    let mut scheduler = SpawnScheduler::new(config.max_drops);
    let mut rng = StdRng::seed_from_u64(7);

    // A load is issued against generation 0...
    let job = scheduler
        .tick(&mut rng, LETTERS.len(), viewport.width, config.drop_height, world.generation())
        .unwrap();
    let outlines = parse_outlines(LETTERS[job.asset], config.sample_length).unwrap();

    // ...then the world is torn down before the result lands.
    scheduler.cancel();
    world.clear();

    // The stale result must be discarded by the generation check.
    if job.generation == world.generation() {
        spawn_outlines(&mut world, &mut palette, &outlines, job.x, job.y, &config);
    }
    assert_eq!(world.num_glyphs(), 0);

    // Teardown again: still fine.
    scheduler.cancel();
    world.clear();
    assert!(scheduler.is_stopped());
    assert_eq!(world.bodies.len(), 0);
}
