//! Glyph loading: fetch an SVG asset, parse it into outlines, and spawn
//! one colored body per outline into the world.
//!
//! The three stages are split so the fetch+parse half can run on a worker
//! task while the world insertion stays on the thread owning the
//! [`PhysicsWorld`]. [`load`] composes all three for synchronous callers.

use crate::config::RainConfig;
use crate::error::Error;
use crate::palette::Palette;
use crate::world::{GlyphStyle, PhysicsWorld};
use rapier2d::prelude::*;
use svg_to_collider::Outline;

/// Fetches the raw SVG text for an asset over HTTP.
pub fn fetch_svg(url: &str) -> Result<String, Error> {
    let fetch_err = |source| Error::Fetch {
        url: url.to_string(),
        source,
    };
    reqwest::blocking::get(url)
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.text())
        .map_err(fetch_err)
}

/// Parses SVG text into collider-ready outlines sampled at
/// `sample_length`. A well-formed document with no outlines yields an
/// empty vec, not an error.
pub fn parse_outlines(svg: &str, sample_length: f32) -> Result<Vec<Outline>, Error> {
    Ok(svg_to_collider::outlines(svg, sample_length)?)
}

/// Spawns one body per outline at `(x, y)`, each taking the next palette
/// color as fill and stroke. Returns the number of bodies added; zero
/// outlines is a no-op.
pub fn spawn_outlines(
    world: &mut PhysicsWorld,
    palette: &mut Palette,
    outlines: &[Outline],
    x: f32,
    y: f32,
    config: &RainConfig,
) -> usize {
    let mut added = 0;
    for outline in outlines {
        let color = palette.next();
        let style = GlyphStyle {
            fill: color,
            stroke: color,
            line_width: config.line_width,
        };
        if world
            .insert_glyph(&outline.points, x, y, config.scale, style)
            .is_some()
        {
            added += 1;
        } else {
            log::debug!("skipping degenerate outline ({} points)", outline.points.len());
        }
    }
    added
}

/// Fetch + parse + spawn. Errors are returned to the caller; the spawn
/// boundary is expected to log and skip rather than abort the session.
pub fn load(
    url: &str,
    x: f32,
    y: f32,
    world: &mut PhysicsWorld,
    palette: &mut Palette,
    config: &RainConfig,
) -> Result<usize, Error> {
    let svg = fetch_svg(url)?;
    let outlines = parse_outlines(&svg, config.sample_length)?;
    if outlines.is_empty() {
        log::warn!("{url}: document has no outlines; nothing spawned");
    }
    Ok(spawn_outlines(world, palette, &outlines, x, y, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Viewport;

    const TRIANGLE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
        <path d="M 10 10 L 90 10 L 50 90 Z"/>
    </svg>"##;

    const EMPTY: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"/>"#;

    fn scene() -> (PhysicsWorld, Palette, RainConfig) {
        (
            PhysicsWorld::new(Viewport::new(800.0, 600.0), 1.0),
            Palette::default(),
            RainConfig::default(),
        )
    }

    #[test]
    fn triangle_spawns_one_body() {
        let (mut world, mut palette, config) = scene();
        let outlines = parse_outlines(TRIANGLE, config.sample_length).unwrap();
        let added = spawn_outlines(&mut world, &mut palette, &outlines, 400.0, -100.0, &config);
        assert_eq!(added, 1);
        assert_eq!(world.num_glyphs(), 1);

        let handle = world.glyph_handles().next().unwrap();
        let style = world.style(handle).unwrap();
        assert_eq!(style.fill, crate::palette::DEFAULT_COLORS[0]);
        assert_eq!(style.stroke, style.fill);
        assert_eq!(style.line_width, 1.0);
        let pos = world.bodies[handle].translation();
        assert_eq!((pos.x, pos.y), (400.0, -100.0));
    }

    #[test]
    fn empty_document_is_a_silent_no_op() {
        let (mut world, mut palette, config) = scene();
        let outlines = parse_outlines(EMPTY, config.sample_length).unwrap();
        let added = spawn_outlines(&mut world, &mut palette, &outlines, 100.0, -100.0, &config);
        assert_eq!(added, 0);
        assert_eq!(world.num_glyphs(), 0);
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let (_, _, config) = scene();
        let result = parse_outlines("not svg at all", config.sample_length);
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn colors_cycle_across_outlines() {
        let (mut world, mut palette, config) = scene();
        let outlines = parse_outlines(TRIANGLE, config.sample_length).unwrap();
        for _ in 0..7 {
            spawn_outlines(&mut world, &mut palette, &outlines, 400.0, -100.0, &config);
        }
        assert_eq!(world.num_glyphs(), 7);
        // 7 spawns over a 5-color palette: next color is palette[7 % 5].
        assert_eq!(palette.next(), crate::palette::DEFAULT_COLORS[2]);
    }
}
