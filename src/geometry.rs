//! Pure wedge and radius math.
//!
//! Angles are radians, `0` points along the positive x axis and grow in the direction
//! `cos`/`sin` define. In raster space (y down) that reads as clockwise on screen.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::foundation::core::Point;

/// Boundary points lie this many "longer edges" away from the center, so every wedge covers
/// the surface corners for any aspect ratio.
pub const BOUNDING_RADIUS_FACTOR: f64 = 1.5;

/// Midpoint of a `width x height` surface.
pub fn surface_center(width: f64, height: f64) -> Point {
    Point::new(width / 2.0, height / 2.0)
}

/// Radius of the circle wedge boundaries are placed on.
pub fn bounding_radius(width: f64, height: f64) -> f64 {
    width.max(height) * BOUNDING_RADIUS_FACTOR
}

/// Point on the bounding circle at `angle`.
pub fn point_at_angle(angle: f64, width: f64, height: f64) -> Point {
    let center = surface_center(width, height);
    let r = bounding_radius(width, height);
    Point::new(center.x + angle.cos() * r, center.y + angle.sin() * r)
}

/// Start and end angle of wedge `index` out of `ray_count` equal divisions of the full turn.
///
/// `ray_count` must be at least 1.
pub fn wedge_angles(index: u32, ray_count: u32) -> (f64, f64) {
    let n = f64::from(ray_count);
    let a = (f64::from(index) / n) * TAU;
    let b = ((f64::from(index) + 1.0) / n) * TAU;
    (a, b)
}

/// The two outer corners of wedge `index`.
///
/// `ray_count` must be at least 1.
pub fn wedge_boundary(index: u32, ray_count: u32, width: f64, height: f64) -> (Point, Point) {
    let (a, b) = wedge_angles(index, ray_count);
    (
        point_at_angle(a, width, height),
        point_at_angle(b, width, height),
    )
}

/// Outer outline of wedge `index`: boundary A, then boundary B.
///
/// Wedges wider than a quarter turn get evenly spaced points on the bounding circle between
/// A and B. A bare triangle center-A-B collapses for one or two rays (A and B coincide or sit
/// opposite each other), while the fan of quarter-turn-or-narrower slices always covers the
/// surface part of the sector.
///
/// `ray_count` must be at least 1.
pub fn wedge_outline(index: u32, ray_count: u32, width: f64, height: f64) -> Vec<Point> {
    let (a, b) = wedge_angles(index, ray_count);
    let segments = ((b - a) / FRAC_PI_2 - 1e-9).ceil().max(1.0) as u32;
    let mut points = Vec::with_capacity(segments as usize + 1);
    points.push(point_at_angle(a, width, height));
    for s in 1..segments {
        let t = f64::from(s) / f64::from(segments);
        points.push(point_at_angle(a + (b - a) * t, width, height));
    }
    points.push(point_at_angle(b, width, height));
    points
}

/// Absolute pixel radius for a fraction of the longer surface edge. No clamping.
pub fn scaled_radius(fraction: f64, width: f64, height: f64) -> f64 {
    fraction * width.max(height)
}

#[cfg(test)]
#[path = "../tests/unit/geometry.rs"]
mod tests;
