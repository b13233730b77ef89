//! Terrain map loading and generation
//!
//! Produces a validated grid of terrain tiles and the instructions a host
//! needs to place them:
//! - parse a text map or generate one from a seed
//! - enforce the River/Volcano adjacency rule
//! - pin two buildable zones near opposite corners
//! - emit isometric tile placements, height values and a completion signal

pub mod adjacency;
pub mod build;
pub mod generate;
pub mod grid;
pub mod tile;
pub mod zones;

pub use adjacency::{AdjacencyReport, InvalidAdjacency, RepairMode};
pub use build::{MapBuild, MapEvent, build_from_grid, build_map, load_grid};
pub use generate::{TERRAIN_THRESHOLDS, generate_grid, roll_terrain};
pub use grid::TerrainGrid;
pub use tile::TerrainKind;
pub use zones::{ZoneAnchor, corner_zone_anchors};
