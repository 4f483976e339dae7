// lib.rs - Perfect maze generation and breadth-first solving on a 0/1 grid

pub mod error;
pub mod generator;
pub mod grid;
pub mod render;
pub mod solver;

pub use error::{MazeError, Result};
pub use generator::{room_center, MazeGenerator, DEFAULT_MAX_SIZE, DEFAULT_SIZE, SIZE_LIMIT};
pub use grid::{is_in_bounds, CellState, Coordinate, Direction, Grid, Maze};
pub use render::render_ascii;
pub use solver::{solve, solve_with_steps, SolveResult};
