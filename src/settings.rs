use serde::{Deserialize, Serialize};

use crate::foundation::core::SurfaceSize;
use crate::foundation::error::{RayburstError, RayburstResult};
use crate::params::RenderParams;

/// Key the settings blob is stored under.
pub const SETTINGS_KEY: &str = "rayburst-settings";

/// The unit of durable state: render params plus export options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSettings {
    /// Schema version for future migrations.
    pub version: u32,
    /// What gets painted.
    #[serde(flatten)]
    pub params: RenderParams,
    /// Export file name without extension.
    pub file_name: String,
    /// Export width in pixels.
    pub image_width: u32,
    /// Export height in pixels.
    pub image_height: u32,
}

impl PersistedSettings {
    /// Only this version is accepted on load.
    pub const CURRENT_VERSION: u32 = 1;

    /// Settings with the given params and default export options.
    pub fn new(params: RenderParams) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            params,
            file_name: "rayburst".to_owned(),
            image_width: 1920,
            image_height: 1080,
        }
    }

    /// Export surface dimensions.
    pub fn image_size(&self) -> SurfaceSize {
        SurfaceSize::new(self.image_width, self.image_height)
    }

    /// Serialize to the JSON blob kept in the store.
    pub fn to_json(&self) -> RayburstResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| RayburstError::serde(e.to_string()))
    }

    /// Parse a stored JSON blob, rejecting unknown versions.
    pub fn from_json(blob: &str) -> RayburstResult<Self> {
        let s: Self =
            serde_json::from_str(blob).map_err(|e| RayburstError::serde(e.to_string()))?;
        if s.version != Self::CURRENT_VERSION {
            return Err(RayburstError::serde(format!(
                "unsupported settings version {} (current: {})",
                s.version,
                Self::CURRENT_VERSION
            )));
        }
        Ok(s)
    }
}

impl Default for PersistedSettings {
    fn default() -> Self {
        Self::new(RenderParams::default())
    }
}

#[cfg(test)]
#[path = "../tests/unit/settings.rs"]
mod tests;
