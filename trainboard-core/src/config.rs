use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::assets::atlas::{AssetSources, AtlasTints, GlyphAtlas};
use crate::compose::Compositor;
use crate::encode::gif::EncodeOpts;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{TrainboardError, TrainboardResult};

/// JSON-facing display settings.
///
/// Every field is optional; missing fields take the values of [`DisplayConfig::default`]
/// (a 64×16 panel, white text on black, glyph sheets under `assets/`).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Canvas fill color.
    pub background: Rgba8,
    /// Label text color. Overrides `tints.font`.
    pub foreground: Rgba8,
    /// Directory holding the glyph sheets. Relative paths resolve against the config file.
    pub assets_dir: PathBuf,
    /// Per-sheet tints.
    pub tints: AtlasTints,
    /// Display time of each GIF frame.
    pub frame_delay_ms: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 16,
            background: Rgba8::rgb(0, 0, 0),
            foreground: Rgba8::rgb(0xff, 0xff, 0xff),
            assets_dir: PathBuf::from("assets"),
            tints: AtlasTints::default(),
            frame_delay_ms: 1000,
        }
    }
}

impl DisplayConfig {
    /// Parse settings from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> TrainboardResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| TrainboardError::config(format!("parse display config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse settings from a JSON string.
    pub fn from_json_str(s: &str) -> TrainboardResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse settings from a JSON file. A relative `assets_dir` is resolved against the
    /// file's directory.
    pub fn from_path(path: impl AsRef<Path>) -> TrainboardResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            TrainboardError::config(format!("open display config '{}': {e}", path.display()))
        })?;
        let mut cfg = Self::from_reader(BufReader::new(f))?;
        if cfg.assets_dir.is_relative()
            && let Some(parent) = path.parent()
        {
            cfg.assets_dir = parent.join(&cfg.assets_dir);
        }
        Ok(cfg)
    }

    /// Reject settings no panel can display.
    pub fn validate(&self) -> TrainboardResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TrainboardError::config(format!(
                "display size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Tints with the font tint taken from `foreground`.
    pub fn atlas_tints(&self) -> AtlasTints {
        AtlasTints {
            font: self.foreground,
            ..self.tints
        }
    }

    /// Conventional sheet paths under `assets_dir`.
    pub fn asset_sources(&self) -> AssetSources {
        AssetSources::from_dir(&self.assets_dir)
    }

    /// Decode and tint every glyph sheet.
    pub fn load_atlas(&self) -> TrainboardResult<GlyphAtlas> {
        GlyphAtlas::load(&self.asset_sources(), &self.atlas_tints())
    }

    /// Compositor for this panel.
    pub fn compositor(&self) -> TrainboardResult<Compositor> {
        Compositor::new(self.width, self.height, self.background)
    }

    /// GIF options for this panel.
    pub fn encode_opts(&self) -> EncodeOpts {
        EncodeOpts {
            frame_delay_ms: self.frame_delay_ms,
            ..EncodeOpts::default()
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
