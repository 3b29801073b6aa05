use std::path::{Path, PathBuf};

use image::ImageEncoder as _;

use crate::foundation::core::unpremultiply_rgba8_in_place;
use crate::foundation::error::{RayburstError, RayburstResult};
use crate::render::FrameRGBA;

/// A finished export, ready to be offered as a download or written to disk.
#[derive(Clone, Debug)]
pub struct ExportedImage {
    /// `{fileName}.png`.
    pub file_name: String,
    /// Pixel width.
    pub width: u32,
    /// Pixel height.
    pub height: u32,
    /// Encoded PNG bytes.
    pub png: Vec<u8>,
}

impl ExportedImage {
    /// Write the PNG into `dir` (created if missing) and return the full path.
    pub fn write_to_dir(&self, dir: &Path) -> RayburstResult<PathBuf> {
        let stem = self.file_name.strip_suffix(".png").unwrap_or(&self.file_name);
        validate_file_name(stem)?;
        std::fs::create_dir_all(dir).map_err(|e| {
            RayburstError::encode(format!(
                "failed to create output dir '{}': {e}",
                dir.display()
            ))
        })?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.png).map_err(|e| {
            RayburstError::encode(format!("failed to write '{}': {e}", path.display()))
        })?;
        Ok(path)
    }
}

/// Download name for an export: `{file_name}.png`.
pub fn export_file_name(file_name: &str) -> String {
    format!("{file_name}.png")
}

/// Check that `file_name` names a single file inside the export directory.
///
/// Rejects empty or blank names, path separators, `.`/`..`, and NUL.
pub fn validate_file_name(file_name: &str) -> RayburstResult<()> {
    if file_name.trim().is_empty() {
        return Err(RayburstError::validation("fileName must not be empty"));
    }
    if file_name == "." || file_name == ".." {
        return Err(RayburstError::validation(format!(
            "fileName \"{file_name}\" is not a file name"
        )));
    }
    if file_name.contains(['/', '\\', '\0']) {
        return Err(RayburstError::validation(format!(
            "fileName \"{file_name}\" must not contain path separators"
        )));
    }
    Ok(())
}

/// Encode a frame as an RGBA8 PNG, converting premultiplied frames to straight alpha.
#[tracing::instrument(skip(frame), fields(width = frame.width, height = frame.height))]
pub fn encode_png(frame: &FrameRGBA) -> RayburstResult<Vec<u8>> {
    let expected = (frame.width as usize)
        .saturating_mul(frame.height as usize)
        .saturating_mul(4);
    if frame.data.len() != expected {
        return Err(RayburstError::encode(format!(
            "frame byte len {} does not match {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }

    let mut straight;
    let pixels: &[u8] = if frame.premultiplied {
        straight = frame.data.clone();
        unpremultiply_rgba8_in_place(&mut straight);
        &straight
    } else {
        &frame.data
    };

    let mut out = Vec::new();
    image::codecs::png::PngEncoder::new(&mut out)
        .write_image(
            pixels,
            frame.width,
            frame.height,
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| RayburstError::encode(e.to_string()))?;
    tracing::debug!(bytes = out.len(), "encoded png");
    Ok(out)
}

#[cfg(test)]
#[path = "../tests/unit/export.rs"]
mod tests;
