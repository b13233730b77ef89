//! Buildable zones: square blocks of Cleared land
//!
//! Every map gets two 2x2 Cleared blocks pinned near opposite corners so both
//! sides have room to build.

use super::grid::TerrainGrid;
use super::tile::TerrainKind;
use crate::consts::CLEAR_ZONE_SIZE;

/// Anchor (top-left cell) of a buildable zone
pub type ZoneAnchor = (usize, usize);

/// Fixed anchors of the two guaranteed zones: one near the origin, one near
/// the far corner
///
/// On maps narrower than four cells the anchors are pulled inside the grid and
/// the two zones overlap.
pub fn corner_zone_anchors(width: usize, height: usize) -> [ZoneAnchor; 2] {
    let near = (
        1.min(width.saturating_sub(CLEAR_ZONE_SIZE)),
        1.min(height.saturating_sub(CLEAR_ZONE_SIZE)),
    );
    let far = (
        width.saturating_sub(CLEAR_ZONE_SIZE + 1),
        height.saturating_sub(CLEAR_ZONE_SIZE + 1),
    );
    [near, far]
}

impl TerrainGrid {
    /// Whether the `size` x `size` block anchored at (x, y) is all Cleared
    pub fn is_clear_block(&self, x: usize, y: usize, size: usize) -> bool {
        if x + size > self.width() || y + size > self.height() {
            return false;
        }
        (y..y + size).all(|cy| (x..x + size).all(|cx| self.get(cx, cy) == TerrainKind::Cleared))
    }

    /// Anchors of every all-Cleared `size` x `size` block, row-major
    ///
    /// Blocks may overlap; a 3x2 Cleared patch yields two 2x2 anchors.
    pub fn find_clear_zones(&self, size: usize) -> Vec<ZoneAnchor> {
        if size == 0 || size > self.width() || size > self.height() {
            return Vec::new();
        }
        let mut found = Vec::new();
        for y in 0..=self.height() - size {
            for x in 0..=self.width() - size {
                if self.is_clear_block(x, y, size) {
                    found.push((x, y));
                }
            }
        }
        found
    }

    /// Overwrite the zone anchored at (x, y) with Cleared land
    pub fn stamp_clear_zone(&mut self, x: usize, y: usize) {
        for cy in y..(y + CLEAR_ZONE_SIZE).min(self.height()) {
            for cx in x..(x + CLEAR_ZONE_SIZE).min(self.width()) {
                self.set(cx, cy, TerrainKind::Cleared);
            }
        }
    }

    /// Pin the two corner zones and return their anchors
    ///
    /// Existing zones are detected but never used for placement: both corner
    /// zones are stamped whether or not enough Cleared blocks already exist.
    pub fn guarantee_buildable_zones(&mut self) -> [ZoneAnchor; 2] {
        let existing = self.find_clear_zones(CLEAR_ZONE_SIZE);
        let anchors = corner_zone_anchors(self.width(), self.height());

        // Both branches stamp the same fixed corners; discovered zones never
        // influence placement.
        if existing.len() < 2 {
            log::debug!(
                "Only {} clear zones found, forcing corner zones at {:?}",
                existing.len(),
                anchors
            );
        } else {
            log::debug!(
                "{} clear zones found, still pinning corner zones at {:?}",
                existing.len(),
                anchors
            );
        }

        for (x, y) in anchors {
            self.stamp_clear_zone(x, y);
        }
        anchors
    }
}
