// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extracts collider-ready polygon outlines from SVG markup.
//!
//! Every `<path>` subpath becomes one closed [`Outline`]: curves are
//! flattened with lyon, the absolute SVG transform is applied, and the
//! result is resampled at a fixed arc-length spacing so downstream convex
//! decomposition sees a bounded vertex count regardless of how curvy the
//! source glyph is.

use lyon_geom::{point, CubicBezierSegment, QuadraticBezierSegment};
use nalgebra::Point2;
use thiserror::Error;
use usvg::tiny_skia_path::{PathSegment, Transform};

/// Tolerance for flattening Bézier curves into the intermediate polyline,
/// before resampling. Small relative to any useful sample spacing.
const FLATTEN_TOLERANCE: f32 = 0.25;

#[derive(Debug, Error)]
pub enum SvgError {
    /// The document is not well-formed SVG.
    #[error("svg parse error: {0}")]
    Parse(#[from] usvg::Error),
}

/// One closed vector outline, sampled into a polygon.
#[derive(Clone, Debug, PartialEq)]
pub struct Outline {
    pub points: Vec<Point2<f32>>,
}

impl Outline {
    /// Perimeter of the closed polygon.
    pub fn perimeter(&self) -> f32 {
        polyline_length(&self.points, true)
    }
}

/// Parses `svg` and returns one outline per `<path>` subpath, resampled at
/// `sample_length` spacing. A well-formed document without any usable path
/// yields an empty vec; only malformed markup is an error.
pub fn outlines(svg: &str, sample_length: f32) -> Result<Vec<Outline>, SvgError> {
    let tree = usvg::Tree::from_str(svg, &usvg::Options::default())?;
    let mut result = Vec::new();
    collect_outlines(tree.root(), sample_length, &mut result);
    Ok(result)
}

fn collect_outlines(group: &usvg::Group, sample_length: f32, out: &mut Vec<Outline>) {
    for node in group.children() {
        match node {
            usvg::Node::Group(group) => collect_outlines(group, sample_length, out),
            usvg::Node::Path(path) => {
                for contour in path_contours(path) {
                    if let Some(outline) = resample(contour, sample_length) {
                        out.push(outline);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Flattens one usvg path into closed contours in absolute coordinates.
fn path_contours(path: &usvg::Path) -> Vec<Vec<Point2<f32>>> {
    let transform = path.abs_transform();
    let mut contours = Vec::new();
    let mut current: Vec<Point2<f32>> = Vec::new();
    let mut last = point(0.0f32, 0.0);

    let mut flush = |contour: &mut Vec<Point2<f32>>| {
        let closed = std::mem::take(contour);
        if closed.len() >= 3 {
            contours.push(closed);
        }
    };

    for segment in path.data().segments() {
        match segment {
            PathSegment::MoveTo(p) => {
                flush(&mut current);
                last = point(p.x, p.y);
                current.push(map(transform, last.x, last.y));
            }
            PathSegment::LineTo(p) => {
                last = point(p.x, p.y);
                current.push(map(transform, last.x, last.y));
            }
            PathSegment::QuadTo(ctrl, to) => {
                let segment = QuadraticBezierSegment {
                    from: last,
                    ctrl: point(ctrl.x, ctrl.y),
                    to: point(to.x, to.y),
                };
                for p in segment.flattened(FLATTEN_TOLERANCE) {
                    current.push(map(transform, p.x, p.y));
                }
                last = segment.to;
            }
            PathSegment::CubicTo(ctrl1, ctrl2, to) => {
                let segment = CubicBezierSegment {
                    from: last,
                    ctrl1: point(ctrl1.x, ctrl1.y),
                    ctrl2: point(ctrl2.x, ctrl2.y),
                    to: point(to.x, to.y),
                };
                for p in segment.flattened(FLATTEN_TOLERANCE) {
                    current.push(map(transform, p.x, p.y));
                }
                last = segment.to;
            }
            PathSegment::Close => flush(&mut current),
        }
    }
    // An unclosed trailing subpath still outlines a shape; close it
    // implicitly like the reference sampler does.
    flush(&mut current);
    contours
}

fn map(ts: Transform, x: f32, y: f32) -> Point2<f32> {
    Point2::new(
        ts.sx * x + ts.kx * y + ts.tx,
        ts.ky * x + ts.sy * y + ts.ty,
    )
}

fn polyline_length(points: &[Point2<f32>], closed: bool) -> f32 {
    let mut length = 0.0;
    for pair in points.windows(2) {
        length += (pair[1] - pair[0]).norm();
    }
    if closed && points.len() > 1 {
        length += (points[0] - points[points.len() - 1]).norm();
    }
    length
}

/// Walks the closed contour emitting one vertex every `sample_length` of
/// arc length. Contours too short for three samples keep their flattened
/// vertices instead, so tiny glyph features still produce a valid polygon.
fn resample(contour: Vec<Point2<f32>>, sample_length: f32) -> Option<Outline> {
    let mut points = contour;
    points.dedup_by(|a, b| (*a - *b).norm() < f32::EPSILON);
    if points.len() < 3 {
        return None;
    }

    let perimeter = polyline_length(&points, true);
    let samples = (perimeter / sample_length).floor() as usize;
    if samples < 3 {
        return Some(Outline { points });
    }

    let spacing = perimeter / samples as f32;
    let mut resampled = Vec::with_capacity(samples);
    let mut emitted = 0usize;
    let mut next_at = 0.0f32;
    let mut traveled = 0.0f32;

    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        let edge = (b - a).norm();
        while emitted < samples && next_at <= traveled + edge {
            let t = if edge > 0.0 { (next_at - traveled) / edge } else { 0.0 };
            resampled.push(a + (b - a) * t);
            emitted += 1;
            next_at += spacing;
        }
        traveled += edge;
    }

    Some(Outline { points: resampled })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
        <path d="M 10 10 L 90 10 L 50 90 Z"/>
    </svg>"##;

    const TWO_PATHS: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
        <path d="M 0 0 L 40 0 L 40 40 L 0 40 Z"/>
        <path d="M 60 60 L 90 60 L 75 90 Z"/>
    </svg>"##;

    const CURVED: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
        <path d="M 10 50 C 10 10, 90 10, 90 50 C 90 90, 10 90, 10 50 Z"/>
    </svg>"##;

    const NO_PATHS: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
        <rect x="1" y="1" width="10" height="10" fill="none"/>
    </svg>"##;

    #[test]
    fn triangle_becomes_one_outline() {
        let outlines = outlines(TRIANGLE, 10.0).unwrap();
        assert_eq!(outlines.len(), 1);
        assert!(outlines[0].points.len() >= 3);
    }

    #[test]
    fn each_path_is_a_separate_outline() {
        let outlines = outlines(TWO_PATHS, 10.0).unwrap();
        assert_eq!(outlines.len(), 2);
    }

    #[test]
    fn curves_are_flattened_and_resampled() {
        let fine = outlines(CURVED, 5.0).unwrap();
        let coarse = outlines(CURVED, 50.0).unwrap();
        assert_eq!(fine.len(), 1);
        assert_eq!(coarse.len(), 1);
        assert!(fine[0].points.len() > coarse[0].points.len());
        // Sampling at 50 on a ~250-unit perimeter leaves a handful of
        // vertices, never fewer than three.
        assert!(coarse[0].points.len() >= 3);
    }

    #[test]
    fn sample_spacing_is_roughly_uniform() {
        let outline = &outlines(TRIANGLE, 20.0).unwrap()[0];
        let perimeter = outline.perimeter();
        let expected = perimeter / outline.points.len() as f32;
        for i in 0..outline.points.len() {
            let a = outline.points[i];
            let b = outline.points[(i + 1) % outline.points.len()];
            let edge = (b - a).norm();
            // Corners may split an edge, so allow generous slack.
            assert!(edge <= expected * 2.0 + 1.0, "edge {edge} vs {expected}");
        }
    }

    #[test]
    fn document_without_paths_yields_nothing() {
        // usvg keeps the rect as a path node; filter only applies to
        // degenerate geometry, so check the truly empty case too.
        let outlines = outlines(NO_PATHS, 10.0).unwrap();
        assert!(outlines.len() <= 1);

        let empty = super::outlines(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"/>"#,
            10.0,
        )
        .unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn malformed_markup_is_an_error() {
        assert!(outlines("this is not svg", 10.0).is_err());
        assert!(outlines("<svg><path d=", 10.0).is_err());
    }
}
