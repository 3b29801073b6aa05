//! Rayburst rendering: the painter, the drawing-context seam it paints through, and the CPU
//! raster backend.

use crate::foundation::color::Color;
use crate::foundation::core::{BezPath, Rect, SurfaceSize};

/// CPU raster surface powered by `vello_cpu`.
pub mod cpu;
/// Canvas-compatible radial gradient evaluation.
pub mod gradient;
/// The rayburst painter.
pub mod painter;

pub use gradient::RadialGradient;

/// A rendered surface as RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)` as `[r, g, b, a]`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// The current fill style of a [`DrawContext`].
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    /// A flat color.
    Solid(Color),
    /// A radial gradient in surface coordinates.
    Radial(RadialGradient),
}

impl From<Color> for Paint {
    fn from(c: Color) -> Self {
        Self::Solid(c)
    }
}

impl From<RadialGradient> for Paint {
    fn from(g: RadialGradient) -> Self {
        Self::Radial(g)
    }
}

/// The 2D raster primitives the painter needs.
///
/// Shapes are composited source-over in call order using the paint set last. Any backend that
/// can fill rectangles and closed paths with solid colors and radial gradients can host the
/// painter.
pub trait DrawContext {
    /// Surface dimensions in pixels.
    fn size(&self) -> SurfaceSize;

    /// Start a new picture, discarding fills issued since the previous `begin`.
    fn begin(&mut self) {}

    /// Set the paint used by subsequent fills.
    fn set_paint(&mut self, paint: Paint);

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: &Rect);

    /// Fill a closed path (non-zero winding).
    fn fill_path(&mut self, path: &BezPath);

    /// Make all fills issued so far visible in the surface's pixels.
    fn flush(&mut self) {}
}
