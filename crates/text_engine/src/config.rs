//! Bake settings and their on-disk representation
//!
//! [`BakeConfig`] can be built inline or read from a `.toml`/`.ron`
//! file through the [`Config`] trait. The file format is picked by the
//! path extension; anything else is rejected up front, before touching
//! the filesystem.

use std::path::Path;

use serde::de::DeserializeOwned;
pub use serde::{Deserialize, Serialize};

/// On-disk formats a config file may use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Ron,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Serializable settings value with file load/save helpers
pub trait Config: Serialize + DeserializeOwned + Default {
    /// Read a value from a `.toml` or `.ron` file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        let contents = std::fs::read_to_string(path)?;
        match format {
            Format::Toml => Ok(toml::from_str(&contents)?),
            Format::Ron => Ok(ron::from_str(&contents)?),
        }
    }

    /// Write this value to a `.toml` or `.ron` file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match Format::from_path(path)? {
            Format::Toml => toml::to_string_pretty(self)?,
            Format::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?,
        };
        std::fs::write(path, contents)?;
        Ok(())
    }
}

/// Errors from reading or writing a config file
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Reading or writing the file failed
    #[error("config io: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for this value
    #[error("config is not valid TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// The value could not be rendered as TOML
    #[error("config could not be written as TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// The file is not valid RON for this value
    #[error("config is not valid RON: {0}")]
    RonParse(#[from] ron::error::SpannedError),

    /// The value could not be rendered as RON
    #[error("config could not be written as RON: {0}")]
    RonSerialize(#[from] ron::Error),

    /// The path extension names no supported format
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// Settings for baking a font into an atlas and glyph table.
///
/// The code point range is inclusive on both ends and defaults to the
/// full Basic Multilingual Plane.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BakeConfig {
    /// Pixel height glyphs are rasterized at
    pub bake_pixel_height: f32,

    /// Supersampling factor applied on top of the bake height
    pub oversample: u32,

    /// First code point to bake
    pub codepoint_start: u32,

    /// Last code point to bake (inclusive)
    pub codepoint_end: u32,

    /// Whether pairwise kerning is applied during layout
    pub kerning: bool,

    /// Whether glyph placement is rounded to integer pixels
    pub integer_align: bool,

    /// Hard ceiling for either atlas dimension; packing failures at this
    /// size leave the affected glyphs without an atlas image instead of
    /// failing the font load
    pub max_atlas_dim: u32,
}

impl Default for BakeConfig {
    fn default() -> Self {
        Self {
            bake_pixel_height: 32.0,
            oversample: 1,
            codepoint_start: 0,
            codepoint_end: 0xFFFF,
            kerning: true,
            integer_align: true,
            max_atlas_dim: 8192,
        }
    }
}

impl Config for BakeConfig {}

impl BakeConfig {
    /// Number of code points in the configured range
    pub fn codepoint_count(&self) -> u32 {
        self.codepoint_end.saturating_sub(self.codepoint_start) + 1
    }

    /// Effective raster pixel height including oversampling
    pub fn raster_pixel_height(&self) -> f32 {
        self.bake_pixel_height * self.oversample.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_the_bmp() {
        let config = BakeConfig::default();
        assert_eq!(config.codepoint_start, 0);
        assert_eq!(config.codepoint_end, 0xFFFF);
        assert_eq!(config.codepoint_count(), 65536);
        assert!(config.kerning);
    }

    #[test]
    fn oversample_scales_raster_height() {
        let config = BakeConfig { oversample: 2, ..Default::default() };
        assert_eq!(config.raster_pixel_height(), 64.0);
        // A zero oversample is treated as 1
        let config = BakeConfig { oversample: 0, ..Default::default() };
        assert_eq!(config.raster_pixel_height(), 32.0);
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("text_engine_{}_{name}", std::process::id()))
    }

    #[test]
    fn toml_file_round_trip() {
        let path = temp_path("bake.toml");
        let config =
            BakeConfig { bake_pixel_height: 48.0, codepoint_end: 0x24F, ..Default::default() };
        config.save_to_file(&path).unwrap();
        let back = BakeConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(back.bake_pixel_height, 48.0);
        assert_eq!(back.codepoint_end, 0x24F);
        assert_eq!(back.max_atlas_dim, 8192);
    }

    #[test]
    fn ron_file_round_trip() {
        let path = temp_path("bake.ron");
        let config = BakeConfig { oversample: 2, kerning: false, ..Default::default() };
        config.save_to_file(&path).unwrap();
        let back = BakeConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(back.oversample, 2);
        assert!(!back.kerning);
    }

    #[test]
    fn unknown_extension_is_rejected_before_io() {
        let config = BakeConfig::default();
        assert!(matches!(
            config.save_to_file("bake.json"),
            Err(ConfigError::UnsupportedFormat(_))
        ));
        // Load rejects the extension without ever opening the file
        assert!(matches!(
            BakeConfig::load_from_file("no_such_file.json"),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            BakeConfig::load_from_file("no_such_file.toml"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let back: BakeConfig = toml::from_str("bake_pixel_height = 24.0").unwrap();
        assert_eq!(back.bake_pixel_height, 24.0);
        assert_eq!(back.codepoint_end, 0xFFFF);
    }
}
