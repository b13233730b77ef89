//! Terrain grid storage and the text map format
//!
//! Cells are addressed as (x, y) with x the column and y the row; row 0 is
//! the first line of a map file. The text format is one row per line, cells
//! separated by spaces, each cell a code from [`TerrainKind::code`]:
//!
//! ```text
//! PLA PLA RIV
//! CLR CLR DES
//! CLR CLR MTN
//! ```

use serde::{Deserialize, Serialize};

use super::tile::TerrainKind;
use crate::consts::MIN_MAP_SIZE;
use crate::error::{MapError, Result};

/// Orthogonal neighbour offsets: left, right, up, down
const NEIGHBOR_OFFSETS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Rectangular grid of terrain cells, stored row-major
///
/// Always at least `MIN_MAP_SIZE` on each side with exactly `width * height`
/// cells; deserialization goes through the same checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct TerrainGrid {
    width: usize,
    height: usize,
    cells: Vec<TerrainKind>,
}

/// Unchecked serialized form of a [`TerrainGrid`]
#[derive(Deserialize)]
struct RawGrid {
    width: usize,
    height: usize,
    cells: Vec<TerrainKind>,
}

impl TryFrom<RawGrid> for TerrainGrid {
    type Error = MapError;

    fn try_from(raw: RawGrid) -> Result<Self> {
        TerrainGrid::from_cells(raw.width, raw.height, raw.cells)
    }
}

impl TerrainGrid {
    /// Grid with every cell set to `kind`
    pub fn filled(width: usize, height: usize, kind: TerrainKind) -> Result<Self> {
        check_size(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![kind; width * height],
        })
    }

    /// Grid from row-major cells
    pub fn from_cells(width: usize, height: usize, cells: Vec<TerrainKind>) -> Result<Self> {
        check_size(width, height)?;
        if cells.len() != width * height {
            return Err(MapError::CellCountMismatch {
                expected: width * height,
                found: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> TerrainKind {
        self.cells[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, kind: TerrainKind) {
        let i = self.idx(x, y);
        self.cells[i] = kind;
    }

    /// In-bounds orthogonal neighbours of (x, y)
    pub fn neighbors(&self, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dx, dy)| {
            let nx = x.checked_add_signed(dx)?;
            let ny = y.checked_add_signed(dy)?;
            (nx < self.width && ny < self.height).then_some((nx, ny))
        })
    }

    /// All cells in row-major order as (x, y, kind)
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, TerrainKind)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &kind)| (i % self.width, i / self.width, kind))
    }

    /// Number of cells of the given kind
    pub fn count(&self, kind: TerrainKind) -> usize {
        self.cells.iter().filter(|&&k| k == kind).count()
    }

    /// Parse the whitespace-delimited text format
    ///
    /// Blank lines are ignored. The first row fixes the width; any other row
    /// with a different cell count is rejected.
    pub fn parse(text: &str) -> Result<Self> {
        let rows: Vec<Vec<&str>> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.split_whitespace().collect())
            .collect();

        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        check_size(width, height)?;

        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(MapError::MalformedGrid {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            for (x, code) in row.iter().enumerate() {
                let kind = TerrainKind::from_code(code).ok_or_else(|| {
                    MapError::UnknownTerrainCode {
                        code: code.to_string(),
                        x,
                        y,
                    }
                })?;
                cells.push(kind);
            }
        }

        Self::from_cells(width, height, cells)
    }

    /// Serialize to the text format, one newline-terminated line per row
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() * 4);
        for row in self.cells.chunks(self.width) {
            let codes: Vec<&str> = row.iter().map(TerrainKind::code).collect();
            out.push_str(&codes.join(" "));
            out.push('\n');
        }
        out
    }
}

fn check_size(width: usize, height: usize) -> Result<()> {
    if width < MIN_MAP_SIZE || height < MIN_MAP_SIZE {
        return Err(MapError::GridTooSmall { width, height });
    }
    Ok(())
}
