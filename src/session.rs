use crate::controls::{Field, apply};
use crate::export::{ExportedImage, encode_png, export_file_name, validate_file_name};
use crate::foundation::core::SurfaceSize;
use crate::foundation::error::RayburstResult;
use crate::params::RenderParams;
use crate::render::FrameRGBA;
use crate::render::cpu::CpuSurface;
use crate::settings::PersistedSettings;
use crate::store::{SettingsStore, load_settings, save_settings};

/// Counters describing what a session has done so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Renders of the preview surface.
    pub preview_renders: u64,
    /// Renders of the production surface.
    pub production_renders: u64,
    /// Successful writes to the settings store.
    pub saves: u64,
}

/// The interactive editor: owns the settings, both surfaces and the store.
///
/// Every accepted edit is followed by exactly one preview render and one save, so the preview
/// always shows the current settings. The production surface is only drawn on [`export`].
///
/// [`export`]: EditorSession::export
pub struct EditorSession<S: SettingsStore> {
    settings: PersistedSettings,
    store: S,
    preview: CpuSurface,
    production: Option<CpuSurface>,
    stats: SessionStats,
}

impl<S: SettingsStore> EditorSession<S> {
    /// Load settings from `store` (defaults if absent or unreadable), create the preview surface
    /// at `viewport` and render it once.
    #[tracing::instrument(skip(store))]
    pub fn open(store: S, viewport: SurfaceSize) -> RayburstResult<Self> {
        let settings = load_settings(&store);
        let preview = CpuSurface::new(viewport)?;
        let mut session = Self {
            settings,
            store,
            preview,
            production: None,
            stats: SessionStats::default(),
        };
        session.render_preview();
        Ok(session)
    }

    /// Current settings.
    pub fn settings(&self) -> &PersistedSettings {
        &self.settings
    }

    /// Current render params.
    pub fn params(&self) -> &RenderParams {
        &self.settings.params
    }

    /// Counters.
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Preview surface size.
    pub fn viewport(&self) -> SurfaceSize {
        use crate::render::DrawContext as _;
        self.preview.size()
    }

    /// Store backing this session.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Apply one control edit, re-render the preview and persist.
    ///
    /// Rejected input changes nothing and triggers neither a render nor a save.
    #[tracing::instrument(skip(self))]
    pub fn edit(&mut self, field: Field, raw: &str) -> RayburstResult<()> {
        let next = apply(&self.settings, field, raw).inspect_err(|e| {
            tracing::warn!("rejected edit: {e}");
        })?;
        self.settings = next;
        self.render_preview();
        self.persist()
    }

    /// Resize the preview surface to the viewport and re-render it once.
    #[tracing::instrument(skip(self))]
    pub fn resize_viewport(&mut self, viewport: SurfaceSize) -> RayburstResult<()> {
        self.preview.resize(viewport)?;
        self.render_preview();
        Ok(())
    }

    /// Render the preview surface from the current settings.
    pub fn render_preview(&mut self) {
        self.preview.render(&self.settings.params);
        self.stats.preview_renders += 1;
        tracing::debug!(renders = self.stats.preview_renders, "preview rendered");
    }

    /// Pixels currently shown on the preview surface.
    pub fn preview_frame(&self) -> FrameRGBA {
        self.preview.readback()
    }

    /// Preview encoded as PNG.
    pub fn preview_png(&self) -> RayburstResult<Vec<u8>> {
        encode_png(&self.preview.readback())
    }

    /// Render the production surface at the export size and encode it as `{fileName}.png`.
    #[tracing::instrument(skip(self), fields(file_name = %self.settings.file_name))]
    pub fn export(&mut self) -> RayburstResult<ExportedImage> {
        validate_file_name(&self.settings.file_name)?;
        let size = self.settings.image_size();
        // A failed resize keeps the existing surface.
        let surface = match &mut self.production {
            Some(s) => {
                s.resize(size)?;
                s
            }
            slot @ None => slot.insert(CpuSurface::new(size)?),
        };
        surface.render(&self.settings.params);
        self.stats.production_renders += 1;

        let png = encode_png(&surface.readback())?;
        tracing::info!(
            width = size.width,
            height = size.height,
            bytes = png.len(),
            "exported"
        );
        Ok(ExportedImage {
            file_name: export_file_name(&self.settings.file_name),
            width: size.width,
            height: size.height,
            png,
        })
    }

    /// Give the store back, ending the session.
    pub fn into_store(self) -> S {
        self.store
    }

    fn persist(&mut self) -> RayburstResult<()> {
        save_settings(&mut self.store, &self.settings)?;
        self.stats.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
