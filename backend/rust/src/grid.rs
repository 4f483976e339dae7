// grid.rs - Cell encoding, coordinates and the immutable Maze value shared by
// the generator and the solver

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::{MazeError, Result};

/// Wire encoding: `0 = wall`, `1 = path`.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CellState {
    Wall = 0,
    Path = 1,
}

impl TryFrom<u8> for CellState {
    type Error = MazeError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(CellState::Wall),
            1 => Ok(CellState::Path),
            other => Err(MazeError::InvalidCellValue(other)),
        }
    }
}

impl From<CellState> for u8 {
    fn from(state: CellState) -> u8 {
        state as u8
    }
}

/// A `(row, col)` position. The same type is used for logical room
/// coordinates during generation and for full-grid cell coordinates
/// everywhere else; the two spaces must not be mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Neighbor one unit step away, or `None` if it would leave the
    /// non-negative quadrant.
    #[inline]
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (dr, dc) = direction.offset();
        Some(Self {
            row: self.row.checked_add_signed(dr)?,
            col: self.col.checked_add_signed(dc)?,
        })
    }

    /// True when `other` is exactly one axis-aligned unit step away.
    pub fn is_adjacent(self, other: Coordinate) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The four axis-aligned moves. Both algorithms explore in `ALL` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    #[inline]
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

#[inline]
pub fn is_in_bounds(row: isize, col: isize, height: usize, width: usize) -> bool {
    row >= 0 && col >= 0 && (row as usize) < height && (col as usize) < width
}

/// Rectangular, non-empty cell array stored row-major.
///
/// Serialized as a list of rows of `0`/`1`. Deserialization goes through
/// [`Grid::new`], so a ragged or empty payload never becomes a `Grid`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<Vec<CellState>>")]
pub struct Grid {
    cells: Vec<CellState>,
    height: usize,
    width: usize,
}

impl Grid {
    pub fn new(rows: Vec<Vec<CellState>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(MazeError::EmptyGrid);
        }

        let mut cells = Vec::with_capacity(height * width);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != width {
                return Err(MazeError::RaggedGrid {
                    row,
                    expected: width,
                    actual: values.len(),
                });
            }
            cells.extend(values);
        }

        Ok(Self { cells, height, width })
    }

    /// Build from the integer wire encoding.
    pub fn from_raw(rows: Vec<Vec<u8>>) -> Result<Self> {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(CellState::try_from).collect::<Result<Vec<_>>>())
            .collect::<Result<Vec<_>>>()?;
        Self::new(rows)
    }

    pub(crate) fn filled(height: usize, width: usize, state: CellState) -> Self {
        debug_assert!(height > 0 && width > 0);
        Self {
            cells: vec![state; height * width],
            height,
            width,
        }
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn in_bounds(&self, coord: Coordinate) -> bool {
        coord.row < self.height && coord.col < self.width
    }

    /// Flat row-major index. Caller guarantees `coord` is in bounds.
    #[inline]
    pub fn index(&self, coord: Coordinate) -> usize {
        coord.row * self.width + coord.col
    }

    pub fn get(&self, coord: Coordinate) -> Option<CellState> {
        self.in_bounds(coord).then(|| self.cells[self.index(coord)])
    }

    pub fn is_wall(&self, row: usize, col: usize) -> bool {
        self.get(Coordinate::new(row, col)) == Some(CellState::Wall)
    }

    pub fn is_path(&self, row: usize, col: usize) -> bool {
        self.get(Coordinate::new(row, col)) == Some(CellState::Path)
    }

    pub(crate) fn set(&mut self, coord: Coordinate, state: CellState) {
        let idx = self.index(coord);
        self.cells[idx] = state;
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellState]> + '_ {
        self.cells.chunks(self.width)
    }

    pub fn path_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == CellState::Path).count()
    }
}

impl TryFrom<Vec<Vec<CellState>>> for Grid {
    type Error = MazeError;

    fn try_from(rows: Vec<Vec<CellState>>) -> Result<Self> {
        Self::new(rows)
    }
}

impl Serialize for Grid {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.rows())
    }
}

/// Unit of exchange between the algorithms and the request boundary.
///
/// Immutable once built: `start`/`end` are checked against the grid on
/// construction and on deserialization, so the solver never sees an
/// out-of-bounds endpoint. `rows`/`cols` are the logical room counts and are
/// carried as given; the grid's own dimensions drive solving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Maze {
    rows: usize,
    cols: usize,
    grid: Grid,
    start: Coordinate,
    end: Coordinate,
    #[serde(skip_serializing_if = "Option::is_none")]
    solution: Option<Vec<Coordinate>>,
}

impl Maze {
    pub fn new(rows: usize, cols: usize, grid: Grid, start: Coordinate, end: Coordinate) -> Result<Self> {
        for (label, coordinate) in [("start", start), ("end", end)] {
            if !grid.in_bounds(coordinate) {
                return Err(MazeError::OutOfBounds {
                    label,
                    coordinate,
                    height: grid.height(),
                    width: grid.width(),
                });
            }
        }

        Ok(Self {
            rows,
            cols,
            grid,
            start,
            end,
            solution: None,
        })
    }

    /// Consume the maze and return it with `solution` attached.
    pub fn with_solution(self, solution: Vec<Coordinate>) -> Self {
        Self {
            solution: Some(solution),
            ..self
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Coordinate {
        self.start
    }

    pub fn end(&self) -> Coordinate {
        self.end
    }

    pub fn solution(&self) -> Option<&[Coordinate]> {
        self.solution.as_deref()
    }
}

// Wire shape accepted from clients. `rows`/`cols` may be omitted and are then
// derived from the grid dimensions.
#[derive(Deserialize)]
struct MazeData {
    rows: Option<usize>,
    cols: Option<usize>,
    grid: Grid,
    start: Coordinate,
    end: Coordinate,
    #[serde(default)]
    solution: Option<Vec<Coordinate>>,
}

impl MazeData {
    fn into_maze(self) -> Result<Maze> {
        let rows = self.rows.unwrap_or((self.grid.height() - 1) / 2);
        let cols = self.cols.unwrap_or((self.grid.width() - 1) / 2);
        let maze = Maze::new(rows, cols, self.grid, self.start, self.end)?;
        Ok(match self.solution {
            Some(solution) => maze.with_solution(solution),
            None => maze,
        })
    }
}

impl<'de> Deserialize<'de> for Maze {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        MazeData::deserialize(deserializer)?
            .into_maze()
            .map_err(serde::de::Error::custom)
    }
}
