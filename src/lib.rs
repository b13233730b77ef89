//! Elemental Map - terrain and path math for an elemental RTS
//!
//! Core modules:
//! - `curve`: Cubic Bezier evaluation, splitting and bounds for unit paths
//! - `terrain`: Text/seeded terrain grids, adjacency repair, buildable zones
//! - `settings`: Map session configuration
//! - `error`: Error types
//!
//! Everything here is engine-independent: the host owns rendering, height
//! fields and navigation, and consumes the instructions a build emits.

pub mod curve;
pub mod error;
pub mod settings;
pub mod terrain;

pub use curve::{Aabb, CubicBezier};
pub use error::{CurveError, MapError, Result};
pub use settings::{MapSettings, MapSource};
pub use terrain::{MapBuild, MapEvent, TerrainGrid, TerrainKind, build_map};

use glam::{Vec2, Vec3};

/// Map configuration constants
pub mod consts {
    /// Default isometric tile footprint (classic 2:1 diamond)
    pub const DEFAULT_TILE_WIDTH: f32 = 1.0;
    pub const DEFAULT_TILE_HEIGHT: f32 = 0.5;

    /// Default generation parameters
    pub const DEFAULT_SEED: u64 = 12345;
    pub const DEFAULT_MAP_SIZE: usize = 20;

    /// Default map file location (`<dir>/<name>.txt`)
    pub const DEFAULT_MAP_DIR: &str = "assets";
    pub const DEFAULT_MAP_FILE: &str = "rtsmap";

    /// Smallest map side a build accepts
    pub const MIN_MAP_SIZE: usize = 2;

    /// Side length of a buildable zone, in cells
    pub const CLEAR_ZONE_SIZE: usize = 2;
}

/// Convert a grid coordinate to an isometric world position (z = 0)
#[inline]
pub fn grid_to_isometric(x: usize, y: usize, tile_size: Vec2) -> Vec3 {
    let (x, y) = (x as f32, y as f32);
    Vec3::new(
        (x - y) * tile_size.x / 2.0,
        (x + y) * tile_size.y / 2.0,
        0.0,
    )
}
