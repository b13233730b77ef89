//! Error types for map builds and curve queries
//!
//! Fatal map errors abort a build and carry the path or coordinate needed to
//! diagnose them. Adjacency findings on loaded maps are not errors; they are
//! collected in [`crate::terrain::AdjacencyReport`].

use std::path::PathBuf;

use thiserror::Error as ThisError;

pub type Result<T, E = MapError> = std::result::Result<T, E>;

/// Fatal failure while acquiring or configuring a terrain map
#[derive(Debug, ThisError)]
pub enum MapError {
    #[error("map file not found: {}", path.display())]
    MapFileNotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed grid: row {row} has {found} cells, expected {expected}")]
    MalformedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("grid too small: {width}x{height} (minimum 2x2)")]
    GridTooSmall { width: usize, height: usize },

    #[error("grid has {found} cells, expected {expected}")]
    CellCountMismatch { expected: usize, found: usize },

    #[error("unknown terrain code {code:?} at ({x}, {y})")]
    UnknownTerrainCode { code: String, x: usize, y: usize },

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("settings JSON error in {}: {source}", path.display())]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure of a geometric curve query
#[derive(Debug, Clone, Copy, PartialEq, ThisError)]
pub enum CurveError {
    /// Tangent and second derivative are parallel or zero at `t`
    #[error("curve normal is degenerate at t = {t}")]
    DegenerateNormal { t: f32 },

    #[error("a cubic curve needs 4 points, got {found}")]
    TooFewPoints { found: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let err = MapError::MapFileNotFound {
            path: PathBuf::from("assets/rtsmap.txt"),
        };
        assert!(err.to_string().contains("assets/rtsmap.txt"));

        let err = MapError::MalformedGrid {
            row: 3,
            expected: 5,
            found: 4,
        };
        assert_eq!(
            err.to_string(),
            "malformed grid: row 3 has 4 cells, expected 5"
        );

        let err = MapError::UnknownTerrainCode {
            code: "LAV".to_string(),
            x: 1,
            y: 2,
        };
        assert!(err.to_string().contains("\"LAV\" at (1, 2)"));
    }

    #[test]
    fn test_curve_error_message() {
        let err = CurveError::DegenerateNormal { t: 0.5 };
        assert_eq!(err.to_string(), "curve normal is degenerate at t = 0.5");
    }
}
