//! Terrain tile kinds and their fixed properties

use std::fmt;

use serde::{Deserialize, Serialize};

/// Terrain type of a single map cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TerrainKind {
    Volcano,
    River,
    Desert,
    Mountain,
    #[default]
    Plains,
    /// Buildable land
    Cleared,
}

impl TerrainKind {
    pub const ALL: [TerrainKind; 6] = [
        TerrainKind::Volcano,
        TerrainKind::River,
        TerrainKind::Desert,
        TerrainKind::Mountain,
        TerrainKind::Plains,
        TerrainKind::Cleared,
    ];

    /// Three-letter code used in map text files
    pub fn code(&self) -> &'static str {
        match self {
            TerrainKind::Volcano => "VOL",
            TerrainKind::River => "RIV",
            TerrainKind::Desert => "DES",
            TerrainKind::Mountain => "MTN",
            TerrainKind::Plains => "PLA",
            TerrainKind::Cleared => "CLR",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "VOL" => Some(TerrainKind::Volcano),
            "RIV" => Some(TerrainKind::River),
            "DES" => Some(TerrainKind::Desert),
            "MTN" => Some(TerrainKind::Mountain),
            "PLA" => Some(TerrainKind::Plains),
            "CLR" => Some(TerrainKind::Cleared),
            _ => None,
        }
    }

    /// Height-field value applied under this tile
    pub fn height(&self) -> f32 {
        match self {
            TerrainKind::Volcano => 10.0,
            TerrainKind::Mountain => 7.0,
            TerrainKind::Plains => 1.0,
            TerrainKind::Desert => 0.5,
            TerrainKind::River => 0.2,
            TerrainKind::Cleared => 0.0,
        }
    }

    /// Whether structures may be placed on this tile
    #[inline]
    pub fn is_buildable(&self) -> bool {
        *self == TerrainKind::Cleared
    }
}

impl fmt::Display for TerrainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
