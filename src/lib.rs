//! Rayburst renders alternating angular wedges around the center of a raster surface with a
//! radial glow on top.
//!
//! - [`paint`] draws [`RenderParams`] onto any [`DrawContext`]
//! - [`CpuSurface`] is the `vello_cpu` raster backend
//! - [`EditorSession`] wires control edits, live preview, persistence and PNG export together
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Field dispatch for control edits.
pub mod controls;
/// PNG export.
pub mod export;
/// Wedge and radius geometry.
pub mod geometry;
/// Render parameters.
pub mod params;
pub mod render;
/// Editor session.
pub mod session;
/// Persisted settings.
pub mod settings;
pub mod store;

pub use crate::controls::Field;
pub use crate::export::{ExportedImage, encode_png, export_file_name};
pub use crate::foundation::color::Color;
pub use crate::foundation::core::{BezPath, Point, Rect, Rgba8Premul, SurfaceSize};
pub use crate::foundation::error::{RayburstError, RayburstResult};
pub use crate::params::RenderParams;
pub use crate::render::cpu::CpuSurface;
pub use crate::render::painter::paint;
pub use crate::render::{DrawContext, FrameRGBA, Paint, RadialGradient};
pub use crate::session::{EditorSession, SessionStats};
pub use crate::settings::{PersistedSettings, SETTINGS_KEY};
pub use crate::store::{FileStore, MemoryStore, SettingsStore};
