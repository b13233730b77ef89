//! Map session settings
//!
//! Read from a JSON file by the host (or the CLI). Missing fields fall back to
//! the defaults below.

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{MapError, Result};

/// Where a map session gets its grid from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MapSource {
    /// Load `<map_dir>/<file_name>.txt`
    #[default]
    File,
    /// Generate from `seed`, `width` and `height`
    Seed,
}

/// Settings for one map build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    pub source: MapSource,

    // === File source ===
    /// Directory holding map text files
    pub map_dir: PathBuf,
    /// Map file name without the `.txt` extension
    pub file_name: String,

    // === Seed source ===
    pub seed: u64,
    pub width: usize,
    pub height: usize,

    // === Placement ===
    /// Isometric tile footprint in world units
    pub tile_width: f32,
    pub tile_height: f32,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            source: MapSource::File,

            map_dir: PathBuf::from(DEFAULT_MAP_DIR),
            file_name: DEFAULT_MAP_FILE.to_string(),

            seed: DEFAULT_SEED,
            width: DEFAULT_MAP_SIZE,
            height: DEFAULT_MAP_SIZE,

            tile_width: DEFAULT_TILE_WIDTH,
            tile_height: DEFAULT_TILE_HEIGHT,
        }
    }
}

impl MapSettings {
    /// Settings for a generated map with default tile sizes
    pub fn from_seed(seed: u64, width: usize, height: usize) -> Self {
        Self {
            source: MapSource::Seed,
            seed,
            width,
            height,
            ..Self::default()
        }
    }

    /// Settings for loading a map file with default tile sizes
    pub fn from_file(map_dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            source: MapSource::File,
            map_dir: map_dir.into(),
            file_name: file_name.into(),
            ..Self::default()
        }
    }

    /// Full path of the map file for the file source
    pub fn map_path(&self) -> PathBuf {
        self.map_dir.join(format!("{}.txt", self.file_name))
    }

    #[inline]
    pub fn tile_size(&self) -> Vec2 {
        Vec2::new(self.tile_width, self.tile_height)
    }

    /// Reject settings a build cannot use
    pub fn validate(&self) -> Result<()> {
        if !(self.tile_width > 0.0 && self.tile_height > 0.0) {
            return Err(MapError::InvalidSettings(format!(
                "tile size must be positive, got {}x{}",
                self.tile_width, self.tile_height
            )));
        }
        match self.source {
            MapSource::Seed if self.width < MIN_MAP_SIZE || self.height < MIN_MAP_SIZE => {
                Err(MapError::InvalidSettings(format!(
                    "generated map must be at least {MIN_MAP_SIZE}x{MIN_MAP_SIZE}, got {}x{}",
                    self.width, self.height
                )))
            }
            MapSource::File if self.file_name.is_empty() => Err(MapError::InvalidSettings(
                "map file name is empty".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self =
            serde_json::from_str(&json).map_err(|source| MapError::SettingsParse {
                path: path.to_path_buf(),
                source,
            })?;
        log::info!("Loaded map settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|source| MapError::SettingsParse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Map settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = MapSettings::default();
        assert_eq!(settings.source, MapSource::File);
        assert_eq!(settings.map_path(), Path::new("assets").join("rtsmap.txt"));
        assert_eq!(settings.seed, 12345);
        assert_eq!((settings.width, settings.height), (20, 20));
        assert_eq!(settings.tile_size(), Vec2::new(1.0, 0.5));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_source_names() {
        assert_eq!(serde_json::to_string(&MapSource::Seed).unwrap(), "\"seed\"");
        assert_eq!(
            serde_json::from_str::<MapSource>("\"file\"").unwrap(),
            MapSource::File
        );
        assert!(serde_json::from_str::<MapSource>("\"noise\"").is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: MapSettings =
            serde_json::from_str(r#"{ "source": "seed", "seed": 99, "width": 8 }"#).unwrap();
        assert_eq!(settings.source, MapSource::Seed);
        assert_eq!(settings.seed, 99);
        assert_eq!(settings.width, 8);
        assert_eq!(settings.height, DEFAULT_MAP_SIZE);
        assert_eq!(settings.tile_width, DEFAULT_TILE_WIDTH);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(matches!(
            MapSettings::from_seed(1, 1, 10).validate(),
            Err(MapError::InvalidSettings(_))
        ));

        let mut settings = MapSettings::from_seed(1, 10, 10);
        settings.tile_height = 0.0;
        assert!(settings.validate().is_err());

        // Dimensions only matter when generating
        let mut settings = MapSettings::from_file("maps", "arena");
        settings.width = 0;
        assert!(settings.validate().is_ok());
        settings.file_name.clear();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_save_load_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "elemental_map_settings_{}.json",
            std::process::id()
        ));
        let settings = MapSettings::from_seed(42, 12, 9);
        settings.save(&path).unwrap();
        let loaded = MapSettings::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let path = std::env::temp_dir().join(format!(
            "elemental_map_bad_settings_{}.json",
            std::process::id()
        ));
        fs::write(&path, "{ not json").unwrap();
        let result = MapSettings::load(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(MapError::SettingsParse { .. })));
    }
}
