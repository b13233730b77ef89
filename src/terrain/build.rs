//! Map build pipeline
//!
//! One build runs a fixed sequence over a single grid:
//! acquire (load or generate) -> repair adjacency -> pin buildable zones ->
//! emit placements and heights -> signal that navigation data may be rebuilt.
//!
//! The build never instantiates anything itself. The host replays
//! [`MapBuild::events`] against its renderer, height field and nav mesh.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::adjacency::{AdjacencyReport, RepairMode};
use super::generate::generate_grid;
use super::grid::TerrainGrid;
use super::tile::TerrainKind;
use super::zones::ZoneAnchor;
use crate::error::{MapError, Result};
use crate::grid_to_isometric;
use crate::settings::{MapSettings, MapSource};

/// Instruction emitted to the host, in order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MapEvent {
    /// Place the tile for `kind` at a world position
    TilePlaced { kind: TerrainKind, position: Vec3 },
    /// Apply a height-field value at grid cell (x, y)
    HeightSet { x: usize, y: usize, height: f32 },
    /// All tiles are placed; navigation data may be (re)computed
    NavMeshReady,
}

/// Result of a completed build
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapBuild {
    /// Final grid after repair and zone stamping
    pub grid: TerrainGrid,
    /// Ordered placement/height instructions, ending with `NavMeshReady`
    pub events: Vec<MapEvent>,
    /// World position of every emitted Cleared cell, in emission order
    pub buildable_plots: Vec<Vec3>,
    /// Adjacency findings (loaded maps only), reconciled with the final grid
    pub report: AdjacencyReport,
    /// Anchors of the two pinned buildable zones
    pub zones: [ZoneAnchor; 2],
}

impl MapBuild {
    /// Tile placements as (kind, world position)
    pub fn tiles(&self) -> impl Iterator<Item = (TerrainKind, Vec3)> + '_ {
        self.events.iter().filter_map(|event| match *event {
            MapEvent::TilePlaced { kind, position } => Some((kind, position)),
            _ => None,
        })
    }

    /// Height-field values as (x, y, height)
    pub fn heights(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        self.events.iter().filter_map(|event| match *event {
            MapEvent::HeightSet { x, y, height } => Some((x, y, height)),
            _ => None,
        })
    }

    /// Whether the completion signal was emitted
    pub fn is_finalized(&self) -> bool {
        matches!(self.events.last(), Some(MapEvent::NavMeshReady))
    }
}

/// Read and parse a map text file
pub fn load_grid(path: &Path) -> Result<TerrainGrid> {
    let text = fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => MapError::MapFileNotFound {
            path: path.to_path_buf(),
        },
        _ => MapError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let grid = TerrainGrid::parse(&text)?;
    log::info!(
        "Loaded {}x{} map from {}",
        grid.width(),
        grid.height(),
        path.display()
    );
    Ok(grid)
}

/// Run a full build as described by `settings`
///
/// Fatal errors (missing file, malformed grid, bad settings) abort before any
/// event is produced.
pub fn build_map(settings: &MapSettings) -> Result<MapBuild> {
    settings.validate()?;

    let (grid, mode) = match settings.source {
        MapSource::File => (load_grid(&settings.map_path())?, RepairMode::Flag),
        MapSource::Seed => (
            generate_grid(settings.seed, settings.width, settings.height)?,
            RepairMode::Heal,
        ),
    };

    Ok(build_from_grid(grid, mode, settings.tile_size()))
}

/// Run repair, zone stamping and emission over an acquired grid
///
/// Flagged cells that a buildable zone overwrites are moved to
/// [`AdjacencyReport::overwritten`] and emitted as Cleared; the rest are
/// skipped.
pub fn build_from_grid(mut grid: TerrainGrid, mode: RepairMode, tile_size: Vec2) -> MapBuild {
    let mut report = grid.repair_adjacency(mode);
    let zones = grid.guarantee_buildable_zones();

    report.reconcile(&grid);
    if !report.is_empty() || !report.overwritten.is_empty() {
        log::warn!(
            "Map has {} invalid river placements skipped, {} overwritten by buildable zones",
            report.len(),
            report.overwritten.len()
        );
    }

    let height = grid.height();
    let mut events = Vec::with_capacity(grid.width() * height * 2 + 1);
    let mut buildable_plots = Vec::new();

    for (x, y, kind) in grid.iter() {
        if mode == RepairMode::Flag && grid.violates_adjacency(x, y) {
            log::debug!("Skipping {} at ({}, {})", kind, x, y);
            continue;
        }

        // Row 0 of the grid is the far edge of the map
        let position = grid_to_isometric(x, height - y - 1, tile_size);
        events.push(MapEvent::TilePlaced { kind, position });
        if kind.is_buildable() {
            buildable_plots.push(position);
        }
        events.push(MapEvent::HeightSet {
            x,
            y,
            height: kind.height(),
        });
    }

    events.push(MapEvent::NavMeshReady);
    log::info!(
        "Map build complete: {}x{}, {} buildable plots",
        grid.width(),
        height,
        buildable_plots.len()
    );

    MapBuild {
        grid,
        events,
        buildable_plots,
        report,
        zones,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{CLEAR_ZONE_SIZE, DEFAULT_MAP_DIR, DEFAULT_MAP_FILE};
    use crate::terrain::adjacency::InvalidAdjacency;
    use proptest::prelude::*;
    use std::path::PathBuf;

    /// Unique temp directory per test so parallel tests don't collide
    fn temp_map_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "elemental_map_{}_{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    const RIVER_BY_VOLCANO_8X8: &str = "\
DES DES DES DES DES DES DES DES
DES DES DES DES DES DES DES DES
DES DES DES DES DES DES DES DES
DES DES DES DES RIV DES DES DES
DES DES DES DES VOL DES DES DES
DES DES DES DES DES DES DES DES
DES DES DES DES DES DES DES DES
DES DES DES DES DES DES DES DES
";

    #[test]
    fn test_loaded_map_flags_and_skips_invalid_river() {
        let dir = temp_map_dir("flagged");
        fs::write(dir.join("flagged.txt"), RIVER_BY_VOLCANO_8X8).unwrap();

        let build = build_map(&MapSettings::from_file(&dir, "flagged")).unwrap();
        let _ = fs::remove_dir_all(&dir);

        assert!(build.report.contains(4, 3));
        assert_eq!(build.report.len(), 1);
        assert!(build.report.overwritten.is_empty());
        assert_eq!(build.grid.get(4, 3), TerrainKind::River);
        assert_eq!(build.tiles().count(), 63);
        assert_eq!(build.heights().count(), 63);
        assert!(!build.heights().any(|(x, y, _)| (x, y) == (4, 3)));
        assert!(build.is_finalized());
    }

    #[test]
    fn test_zone_over_flagged_river_is_reported_as_overwritten() {
        let grid = TerrainGrid::parse(
            "\
PLA PLA PLA PLA PLA
PLA PLA RIV PLA PLA
PLA PLA VOL PLA PLA
PLA PLA PLA PLA PLA
PLA PLA PLA PLA PLA
",
        )
        .unwrap();

        let build = build_from_grid(grid, RepairMode::Flag, Vec2::new(1.0, 0.5));

        // The far zone at (2, 2) covers both the river and the volcano
        assert_eq!(build.zones, [(1, 1), (2, 2)]);
        assert!(build.report.is_empty());
        assert_eq!(build.report.overwritten, vec![InvalidAdjacency { x: 2, y: 1 }]);
        assert_eq!(build.grid.get(2, 1), TerrainKind::Cleared);
        assert!(build.heights().any(|(x, y, _)| (x, y) == (2, 1)));
        assert_eq!(build.tiles().count(), 25);
        for finding in &build.report.findings {
            assert!(!build.heights().any(|(x, y, _)| (x, y) == (finding.x, finding.y)));
        }
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = temp_map_dir("missing");
        let settings = MapSettings::from_file(&dir, "no_such_map");
        let result = build_map(&settings);
        let _ = fs::remove_dir_all(&dir);
        match result {
            Err(MapError::MapFileNotFound { path }) => {
                assert!(path.ends_with("no_such_map.txt"));
            }
            other => panic!("expected MapFileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_file_is_fatal() {
        let dir = temp_map_dir("malformed");
        fs::write(dir.join("ragged.txt"), "PLA PLA PLA\nPLA PLA\n").unwrap();
        let result = build_map(&MapSettings::from_file(&dir, "ragged"));
        let _ = fs::remove_dir_all(&dir);
        assert!(matches!(result, Err(MapError::MalformedGrid { row: 1, .. })));
    }

    #[test]
    fn test_generated_map_has_no_violations() {
        let build = build_map(&MapSettings::from_seed(2024, 30, 30)).unwrap();
        assert!(build.report.is_empty());
        for (x, y, _) in build.grid.iter() {
            assert!(!build.grid.violates_adjacency(x, y));
        }
        assert_eq!(build.tiles().count(), 900);
    }

    #[test]
    fn test_event_stream_shape() {
        let build = build_map(&MapSettings::from_seed(5, 4, 3)).unwrap();

        // Tile then height for each cell, then the completion signal
        assert_eq!(build.events.len(), 4 * 3 * 2 + 1);
        assert!(matches!(build.events[0], MapEvent::TilePlaced { .. }));
        assert!(matches!(
            build.events[1],
            MapEvent::HeightSet { x: 0, y: 0, .. }
        ));
        assert_eq!(build.events.last(), Some(&MapEvent::NavMeshReady));

        for ((kind, _), (x, y, height)) in build.tiles().zip(build.heights()) {
            assert_eq!(build.grid.get(x, y), kind);
            assert_eq!(height, kind.height());
        }
    }

    #[test]
    fn test_positions_flip_rows() {
        let grid = TerrainGrid::filled(3, 3, TerrainKind::Plains).unwrap();
        let build = build_from_grid(grid, RepairMode::Heal, Vec2::new(1.0, 0.5));
        let tiles: Vec<_> = build.tiles().collect();
        // Cell (0, 0) sits at iso (0, 2)
        assert_eq!(tiles[0].1, Vec3::new(-1.0, 0.5, 0.0));
        // Cell (2, 2) sits at iso (2, 0)
        assert_eq!(tiles[8].1, Vec3::new(1.0, 0.5, 0.0));
        // Cell (0, 2) is the iso origin
        assert_eq!(tiles[6].1, Vec3::ZERO);
    }

    #[test]
    fn test_buildable_plots_follow_cleared_cells() {
        let build = build_map(&MapSettings::from_seed(77, 12, 12)).unwrap();
        let cleared: Vec<Vec3> = build
            .tiles()
            .filter(|(kind, _)| kind.is_buildable())
            .map(|(_, position)| position)
            .collect();
        assert_eq!(build.buildable_plots, cleared);
        assert_eq!(
            build.buildable_plots.len(),
            build.grid.count(TerrainKind::Cleared)
        );
        assert!(build.buildable_plots.len() >= 2 * CLEAR_ZONE_SIZE * CLEAR_ZONE_SIZE);
    }

    #[test]
    fn test_round_trip_reproduces_buildable_plots() {
        let generated = build_map(&MapSettings::from_seed(31337, 16, 11)).unwrap();

        let dir = temp_map_dir("round_trip");
        fs::write(dir.join("emitted.txt"), generated.grid.to_text()).unwrap();
        let loaded = build_map(&MapSettings::from_file(&dir, "emitted")).unwrap();
        let _ = fs::remove_dir_all(&dir);

        assert!(loaded.report.is_empty());
        assert_eq!(loaded.grid, generated.grid);
        assert_eq!(loaded.buildable_plots, generated.buildable_plots);
    }

    #[test]
    fn test_bundled_map_loads() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_MAP_DIR);
        let build = build_map(&MapSettings::from_file(dir, DEFAULT_MAP_FILE)).unwrap();
        assert_eq!((build.grid.width(), build.grid.height()), (20, 20));
        assert!(build.report.is_empty());
        assert_eq!(build.zones, [(1, 1), (17, 17)]);
        assert!(build.is_finalized());
    }

    #[test]
    fn test_invalid_settings_abort() {
        let result = build_map(&MapSettings::from_seed(1, 1, 1));
        assert!(matches!(result, Err(MapError::InvalidSettings(_))));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_generated_zones_in_opposite_quadrants(seed in any::<u64>()) {
            let build = build_map(&MapSettings::from_seed(seed, 20, 20)).unwrap();
            let zones = build.grid.find_clear_zones(CLEAR_ZONE_SIZE);

            prop_assert!(zones.len() >= 2);
            prop_assert!(zones.iter().any(|&(x, y)| x + CLEAR_ZONE_SIZE <= 10 && y + CLEAR_ZONE_SIZE <= 10));
            prop_assert!(zones.iter().any(|&(x, y)| x >= 10 && y >= 10));
            prop_assert!(build.report.is_empty());
        }
    }
}
