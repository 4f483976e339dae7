// error.rs - Input errors for maze generation and maze payload validation

use thiserror::Error;

use crate::grid::Coordinate;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("Invalid maze size {size}: must be between 1 and {max}")]
    InvalidSize { size: i64, max: usize },

    #[error("Maze grid is empty")]
    EmptyGrid,

    #[error("Maze grid is not rectangular: row {row} has {actual} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid cell value {0} (expected 0 = wall or 1 = path)")]
    InvalidCellValue(u8),

    #[error("{label} {coordinate} is outside the {height}x{width} grid")]
    OutOfBounds {
        label: &'static str,
        coordinate: Coordinate,
        height: usize,
        width: usize,
    },
}

pub type Result<T> = std::result::Result<T, MazeError>;
