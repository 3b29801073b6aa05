use serde::{Deserialize, Serialize};

use crate::foundation::color::Color;
use crate::foundation::error::{RayburstError, RayburstResult};

/// Everything the painter needs to draw one rayburst.
///
/// Radii are fractions of the longer surface edge, so the same params look the same on the
/// preview and production surfaces.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderParams {
    /// Number of equal angular divisions. Must be at least 1.
    pub ray_count: u32,
    /// Base fill, visible in odd-indexed wedges.
    pub ray_color_even: Color,
    /// Fill of the even-indexed wedges.
    pub ray_color_odd: Color,
    /// Radius, as a fraction of the longer edge, up to which the center color is opaque.
    pub center_core_radius: f64,
    /// Radius, as a fraction of the longer edge, at which the center color has faded out.
    pub center_shade_radius: f64,
    /// Color of the center glow.
    pub center_color: Color,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            ray_count: 10,
            ray_color_even: Color::BLACK,
            ray_color_odd: Color::GREY,
            center_core_radius: 0.02,
            center_shade_radius: 0.1,
            center_color: Color::WHITE,
        }
    }
}

impl RenderParams {
    /// Check the hard constraints.
    ///
    /// Radii outside `[0, 1]` or a shade radius below the core radius are allowed; they render
    /// as the gradient math defines.
    pub fn validate(&self) -> RayburstResult<()> {
        if self.ray_count == 0 {
            return Err(RayburstError::validation("rayCount must be >= 1"));
        }
        if !self.center_core_radius.is_finite() || !self.center_shade_radius.is_finite() {
            return Err(RayburstError::validation(
                "centerCoreRadius and centerShadeRadius must be finite",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/params.rs"]
mod tests;
