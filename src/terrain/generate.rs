//! Seeded procedural terrain
//!
//! Each cell is an independent weighted draw. Draws happen row by row, so the
//! same seed and dimensions always reproduce the same grid.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::grid::TerrainGrid;
use super::tile::TerrainKind;
use crate::error::Result;

/// Cumulative upper bounds for a uniform draw in [0, 1); anything past the
/// last bound is Cleared
///
/// Volcano 5%, Mountain 10%, Plains 35%, Desert 30%, River 15%, Cleared 5%.
pub const TERRAIN_THRESHOLDS: [(f32, TerrainKind); 5] = [
    (0.05, TerrainKind::Volcano),
    (0.15, TerrainKind::Mountain),
    (0.50, TerrainKind::Plains),
    (0.80, TerrainKind::Desert),
    (0.95, TerrainKind::River),
];

/// Map a uniform draw to a terrain kind
pub fn roll_terrain(r: f32) -> TerrainKind {
    TERRAIN_THRESHOLDS
        .iter()
        .find(|&&(bound, _)| r < bound)
        .map_or(TerrainKind::Cleared, |&(_, kind)| kind)
}

/// Fill a `width` x `height` grid from `seed`
///
/// The result is raw: adjacency repair and buildable zones are applied by the
/// build pipeline. Fails with `GridTooSmall` below the minimum map size.
pub fn generate_grid(seed: u64, width: usize, height: usize) -> Result<TerrainGrid> {
    let mut grid = TerrainGrid::filled(width, height, TerrainKind::Plains)?;
    let mut rng = Pcg32::seed_from_u64(seed);

    for y in 0..height {
        for x in 0..width {
            let r: f32 = rng.random();
            grid.set(x, y, roll_terrain(r));
        }
    }

    log::debug!("Generated {}x{} terrain from seed {}", width, height, seed);
    Ok(grid)
}
