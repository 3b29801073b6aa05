use crate::foundation::color::Color;
use crate::foundation::core::BezPath;
use crate::geometry::{scaled_radius, surface_center, wedge_outline};
use crate::params::RenderParams;
use crate::render::{DrawContext, Paint, RadialGradient};

/// Paint a full rayburst onto `target`, replacing everything it showed before.
///
/// Layers, composited in order:
/// 1. the whole surface in `ray_color_even`,
/// 2. every even-indexed wedge in `ray_color_odd` (odd-indexed wedges stay base colored),
/// 3. a radial gradient from opaque `center_color` at the core radius to transparent at the
///    shade radius, over the whole surface.
///
/// A `ray_count` of zero paints no wedges.
#[tracing::instrument(skip(params, target), fields(ray_count = params.ray_count, size = %target.size()))]
pub fn paint(params: &RenderParams, target: &mut impl DrawContext) {
    let size = target.size();
    let (w, h) = (size.width_f64(), size.height_f64());
    let bounds = size.bounds();

    target.begin();
    target.set_paint(Paint::Solid(params.ray_color_even));
    target.fill_rect(&bounds);

    if params.ray_count == 0 {
        tracing::warn!("ray_count is 0, skipping wedges");
    } else {
        target.set_paint(Paint::Solid(params.ray_color_odd));
        for i in (0..params.ray_count).step_by(2) {
            target.fill_path(&wedge_path(i, params.ray_count, w, h));
        }
    }

    target.set_paint(Paint::Radial(center_gradient(params, w, h)));
    target.fill_rect(&bounds);

    target.flush();
    tracing::debug!("painted rayburst");
}

/// Closed fan center -> boundary A -> ... -> boundary B for wedge `index`.
///
/// For wedges up to a quarter turn this is the triangle center, A, B.
pub fn wedge_path(index: u32, ray_count: u32, width: f64, height: f64) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(surface_center(width, height));
    for p in wedge_outline(index, ray_count, width, height) {
        path.line_to(p);
    }
    path.close_path();
    path
}

/// The center overlay for a `width x height` surface.
pub fn center_gradient(params: &RenderParams, width: f64, height: f64) -> RadialGradient {
    RadialGradient {
        center: surface_center(width, height),
        r0: scaled_radius(params.center_core_radius, width, height),
        r1: scaled_radius(params.center_shade_radius, width, height),
        inner: params.center_color,
        outer: Color::TRANSPARENT,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/painter.rs"]
mod tests;
