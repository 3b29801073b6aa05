use rayon::prelude::*;

use crate::foundation::color::Color;
use crate::foundation::core::{Point, SurfaceSize};

/// Two concentric circles with a color stop on each, evaluated the way an HTML canvas
/// `createRadialGradient(cx, cy, r0, cx, cy, r1)` with stops at 0 and 1 is.
///
/// For a point at distance `d` from the center, `t = (d - r0) / (r1 - r0)` clamped to `[0, 1]`
/// selects the color; stops are interpolated in straight (non-premultiplied) RGBA. With
/// `r1 < r0` the ramp simply runs inward. A gradient whose radii are equal, negative or
/// non-finite paints nothing.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGradient {
    /// Shared center of both circles.
    pub center: Point,
    /// Radius of the first circle (stop 0).
    pub r0: f64,
    /// Radius of the second circle (stop 1).
    pub r1: f64,
    /// Color at and inside `r0`.
    pub inner: Color,
    /// Color at and beyond `r1`.
    pub outer: Color,
}

impl RadialGradient {
    /// Whether the gradient produces any pixels at all.
    pub fn is_paintable(&self) -> bool {
        self.r0.is_finite()
            && self.r1.is_finite()
            && self.r0 >= 0.0
            && self.r1 >= 0.0
            && self.r0 != self.r1
            && self.center.x.is_finite()
            && self.center.y.is_finite()
    }

    /// Gradient parameter at `p`, clamped to `[0, 1]`.
    pub fn t_at(&self, p: Point) -> f64 {
        let d = self.center.distance(p);
        ((d - self.r0) / (self.r1 - self.r0)).clamp(0.0, 1.0)
    }

    /// Straight-alpha color at `p`, or `None` when the gradient paints nothing.
    pub fn color_at(&self, p: Point) -> Option<Color> {
        if !self.is_paintable() {
            return None;
        }
        Some(lerp_color(self.inner, self.outer, self.t_at(p)))
    }

    /// Rasterize into premultiplied RGBA8, sampling each pixel at its center.
    ///
    /// Returns an all-transparent buffer when the gradient is not paintable.
    pub fn rasterize_premul(&self, size: SurfaceSize) -> Vec<u8> {
        let row_len = (size.width as usize).saturating_mul(4);
        let mut bytes = vec![0u8; size.pixel_count().saturating_mul(4)];
        if !self.is_paintable() || row_len == 0 {
            return bytes;
        }

        bytes
            .par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| {
                let py = y as f64 + 0.5;
                for (x, px) in row.chunks_exact_mut(4).enumerate() {
                    let p = Point::new(x as f64 + 0.5, py);
                    let c = lerp_color(self.inner, self.outer, self.t_at(p));
                    px.copy_from_slice(&c.to_rgba8_premul().to_array());
                }
            });
        bytes
    }
}

fn lerp_color(a: Color, b: Color, t: f64) -> Color {
    let lerp = |x: u8, y: u8| -> u8 {
        let xf = f64::from(x);
        let yf = f64::from(y);
        (xf + (yf - xf) * t).round().clamp(0.0, 255.0) as u8
    };
    Color::rgba(lerp(a.r, b.r), lerp(a.g, b.g), lerp(a.b, b.b), lerp(a.a, b.a))
}

#[cfg(test)]
#[path = "../../tests/unit/render/gradient.rs"]
mod tests;
