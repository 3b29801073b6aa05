use std::sync::Arc;

use crate::foundation::color::Color;
use crate::foundation::core::{BezPath, Rect, SurfaceSize};
use crate::foundation::error::{RayburstError, RayburstResult};
use crate::params::RenderParams;
use crate::render::{DrawContext, FrameRGBA, Paint, RadialGradient};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct GradientKey {
    center_bits: [u64; 2],
    r0_bits: u64,
    r1_bits: u64,
    inner: [u8; 4],
    outer: [u8; 4],
}

impl GradientKey {
    fn of(g: &RadialGradient) -> Self {
        Self {
            center_bits: [g.center.x.to_bits(), g.center.y.to_bits()],
            r0_bits: g.r0.to_bits(),
            r1_bits: g.r1.to_bits(),
            inner: g.inner.to_array(),
            outer: g.outer.to_array(),
        }
    }
}

/// A raster surface backed by a `vello_cpu` pixmap.
///
/// Fills are recorded into a `vello_cpu::RenderContext` and rasterized into the pixmap on
/// [`DrawContext::flush`]. Radial gradients are rasterized per pixel into an image paint the
/// size of the surface; the last one is cached, so re-renders that only change wedge colors
/// skip that work.
pub struct CpuSurface {
    size: SurfaceSize,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    // Set while the current paint is a gradient that paints nothing.
    suppress_fills: bool,
    gradient_cache: Option<(GradientKey, vello_cpu::Image)>,
}

impl CpuSurface {
    /// Create a transparent surface.
    pub fn new(size: SurfaceSize) -> RayburstResult<Self> {
        let (w, h) = edge_u16(size)?;
        Ok(Self {
            size,
            ctx: vello_cpu::RenderContext::new(w, h),
            pixmap: vello_cpu::Pixmap::new(w, h),
            suppress_fills: false,
            gradient_cache: None,
        })
    }

    /// Resize the surface. Pixel content is discarded when the size changes.
    ///
    /// Returns `true` when the size actually changed.
    pub fn resize(&mut self, size: SurfaceSize) -> RayburstResult<bool> {
        if size == self.size {
            return Ok(false);
        }
        let (w, h) = edge_u16(size)?;
        self.size = size;
        self.ctx = vello_cpu::RenderContext::new(w, h);
        self.pixmap = vello_cpu::Pixmap::new(w, h);
        self.gradient_cache = None;
        Ok(true)
    }

    /// Paint `params` onto this surface.
    pub fn render(&mut self, params: &RenderParams) {
        crate::render::painter::paint(params, self);
    }

    /// Copy the current pixels out as premultiplied RGBA8.
    pub fn readback(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.size.width,
            height: self.size.height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    fn gradient_paint(&mut self, g: &RadialGradient) -> RayburstResult<vello_cpu::Image> {
        let key = GradientKey::of(g);
        if let Some((cached, img)) = &self.gradient_cache
            && *cached == key
        {
            return Ok(img.clone());
        }

        let bytes = g.rasterize_premul(self.size);
        let img = rgba_premul_to_image(&bytes, self.size)?;
        self.gradient_cache = Some((key, img.clone()));
        Ok(img)
    }
}

impl DrawContext for CpuSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn begin(&mut self) {
        self.ctx.reset();
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_blend_mode(vello_cpu::peniko::BlendMode::default());
        self.suppress_fills = false;
    }

    fn set_paint(&mut self, paint: Paint) {
        match paint {
            Paint::Solid(c) => {
                self.suppress_fills = false;
                self.ctx.set_paint(color_to_cpu(c));
            }
            Paint::Radial(g) => {
                if !g.is_paintable() {
                    tracing::debug!(r0 = g.r0, r1 = g.r1, "radial gradient paints nothing");
                    self.suppress_fills = true;
                    return;
                }
                match self.gradient_paint(&g) {
                    Ok(img) => {
                        self.suppress_fills = false;
                        self.ctx.set_paint(img);
                    }
                    Err(e) => {
                        tracing::warn!("radial gradient skipped: {e}");
                        self.suppress_fills = true;
                    }
                }
            }
        }
    }

    fn fill_rect(&mut self, rect: &Rect) {
        if self.suppress_fills {
            return;
        }
        self.ctx.fill_rect(&rect_to_cpu(*rect));
    }

    fn fill_path(&mut self, path: &BezPath) {
        if self.suppress_fills {
            return;
        }
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    fn flush(&mut self) {
        self.ctx.flush();
        clear_pixmap_to_transparent(&mut self.pixmap);
        self.ctx.render_to_pixmap(&mut self.pixmap);
    }
}

fn edge_u16(size: SurfaceSize) -> RayburstResult<(u16, u16)> {
    let size = size.validate()?;
    let w: u16 = size
        .width
        .try_into()
        .map_err(|_| RayburstError::validation("surface width exceeds u16"))?;
    let h: u16 = size
        .height
        .try_into()
        .map_err(|_| RayburstError::validation("surface height exceeds u16"))?;
    Ok((w, h))
}

fn color_to_cpu(c: Color) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn clear_pixmap_to_transparent(pixmap: &mut vello_cpu::Pixmap) {
    pixmap.data_as_u8_slice_mut().fill(0);
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(bytes: &[u8], size: SurfaceSize) -> RayburstResult<vello_cpu::Pixmap> {
    let (w, h) = edge_u16(size)?;
    if bytes.len() != size.pixel_count().saturating_mul(4) {
        return Err(RayburstError::validation("pixmap byte len mismatch"));
    }
    // Pixmap stores PremulRgba8; our bytes are already premultiplied.
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(size.pixel_count());
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true))
}

fn rgba_premul_to_image(bytes_premul: &[u8], size: SurfaceSize) -> RayburstResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes_premul, size)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
