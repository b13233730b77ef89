//! River/Volcano adjacency rule
//!
//! A River cell may not share an edge with a Volcano cell. Generated maps
//! heal violations by turning the River into Plains. Loaded maps are authored
//! content and are never rewritten; each violation is reported instead and
//! the offending tile is left out of the emitted placements.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::grid::TerrainGrid;
use super::tile::TerrainKind;

/// How the repair pass treats a violating River cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepairMode {
    /// Reclassify the cell as Plains (procedurally generated maps)
    Heal,
    /// Leave the cell and report it (maps loaded from a file)
    Flag,
}

/// A River cell bordering a Volcano in a loaded map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvalidAdjacency {
    pub x: usize,
    pub y: usize,
}

impl fmt::Display for InvalidAdjacency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "river at ({}, {}) borders a volcano", self.x, self.y)
    }
}

/// Non-fatal findings from a repair pass, in row-major order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacencyReport {
    /// Violations still present in the grid; their tiles are not emitted
    pub findings: Vec<InvalidAdjacency>,
    /// Violations whose cell was later overwritten (by a buildable zone)
    #[serde(default)]
    pub overwritten: Vec<InvalidAdjacency>,
}

impl AdjacencyReport {
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.findings.contains(&InvalidAdjacency { x, y })
    }

    /// Move findings that no longer violate the rule in `grid` to `overwritten`
    pub fn reconcile(&mut self, grid: &TerrainGrid) {
        let (still, gone): (Vec<_>, Vec<_>) = self
            .findings
            .drain(..)
            .partition(|f| grid.violates_adjacency(f.x, f.y));
        for finding in &gone {
            log::debug!("Finding overwritten: {}", finding);
        }
        self.findings = still;
        self.overwritten.extend(gone);
    }
}

impl TerrainGrid {
    /// Whether the cell at (x, y) is a River with a Volcano neighbour
    pub fn violates_adjacency(&self, x: usize, y: usize) -> bool {
        self.get(x, y) == TerrainKind::River
            && self
                .neighbors(x, y)
                .any(|(nx, ny)| self.get(nx, ny) == TerrainKind::Volcano)
    }

    /// Enforce the adjacency rule over the whole grid
    ///
    /// Only River cells change under [`RepairMode::Heal`], so a single pass
    /// leaves no violations behind. Under [`RepairMode::Flag`] the grid is
    /// untouched and every violation is returned.
    pub fn repair_adjacency(&mut self, mode: RepairMode) -> AdjacencyReport {
        let mut report = AdjacencyReport::default();
        let mut healed = 0usize;

        for y in 0..self.height() {
            for x in 0..self.width() {
                if !self.violates_adjacency(x, y) {
                    continue;
                }
                match mode {
                    RepairMode::Heal => {
                        self.set(x, y, TerrainKind::Plains);
                        healed += 1;
                    }
                    RepairMode::Flag => {
                        let finding = InvalidAdjacency { x, y };
                        log::warn!("Invalid adjacency: {}", finding);
                        report.findings.push(finding);
                    }
                }
            }
        }

        if healed > 0 {
            log::debug!("Reclassified {} river cells next to volcanoes", healed);
        }
        report
    }
}
