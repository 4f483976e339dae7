// generator.rs - Perfect maze generation by randomized iterative backtracking

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{MazeError, Result};
use crate::grid::{CellState, Coordinate, Direction, Grid, Maze};

/// Size used when a request does not name one.
pub const DEFAULT_SIZE: usize = 25;

/// Ceiling applied when no other limit is configured.
pub const DEFAULT_MAX_SIZE: usize = 100;

/// Hard upper bound on any configured ceiling. A `4096 x 4096` maze is a
/// grid of about 67 million cells; larger ceilings are clamped to this.
pub const SIZE_LIMIT: usize = 4096;

/// Room `(r, c)` sits at grid cell `(2r + 1, 2c + 1)`.
#[inline]
pub fn room_center(room: Coordinate) -> Coordinate {
    Coordinate::new(room.row * 2 + 1, room.col * 2 + 1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeGenerator {
    max_size: usize,
}

impl Default for MazeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SIZE)
    }
}

impl MazeGenerator {
    /// `max_size` is clamped to [`SIZE_LIMIT`].
    pub fn new(max_size: usize) -> Self {
        Self {
            max_size: max_size.min(SIZE_LIMIT),
        }
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Validate a size as received from a caller (which may be negative).
    pub fn check_size(&self, size: i64) -> Result<usize> {
        usize::try_from(size)
            .ok()
            .filter(|&s| (1..=self.max_size).contains(&s))
            .ok_or(MazeError::InvalidSize {
                size,
                max: self.max_size,
            })
    }

    /// Generate a `size x size` maze from a freshly OS-seeded source.
    pub fn generate(&self, size: usize) -> Result<Maze> {
        let mut rng = StdRng::from_os_rng();
        self.generate_with_rng(size, &mut rng)
    }

    /// Reproducible generation: equal seeds and sizes yield equal mazes.
    pub fn generate_seeded(&self, size: usize, seed: u64) -> Result<Maze> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate_with_rng(size, &mut rng)
    }

    pub fn generate_with_rng<R: Rng>(&self, size: usize, rng: &mut R) -> Result<Maze> {
        self.generate_rect_with_rng(size, size, rng)
    }

    pub fn generate_rect_with_rng<R: Rng>(
        &self,
        rows: usize,
        cols: usize,
        rng: &mut R,
    ) -> Result<Maze> {
        for dimension in [rows, cols] {
            self.check_size(i64::try_from(dimension).unwrap_or(i64::MAX))?;
        }

        let maze = carve(rows, cols, rng)?;
        log::debug!(
            "Generated {}x{} maze ({}x{} grid, {} open cells)",
            rows,
            cols,
            maze.grid().height(),
            maze.grid().width(),
            maze.grid().path_count()
        );
        Ok(maze)
    }
}

fn carve<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Result<Maze> {
    let grid_rows = rows * 2 + 1;
    let grid_cols = cols * 2 + 1;
    let mut grid = Grid::filled(grid_rows, grid_cols, CellState::Wall);

    let mut visited = vec![false; rows * cols];
    let mut stack = vec![Coordinate::new(0, 0)];
    visited[0] = true;

    let mut candidates: Vec<Coordinate> = Vec::with_capacity(Direction::ALL.len());

    while let Some(&current) = stack.last() {
        grid.set(room_center(current), CellState::Path);

        candidates.clear();
        candidates.extend(
            Direction::ALL
                .iter()
                .filter_map(|&dir| current.step(dir))
                .filter(|n| n.row < rows && n.col < cols && !visited[n.row * cols + n.col]),
        );

        if candidates.is_empty() {
            stack.pop();
            continue;
        }

        let next = candidates[rng.random_range(0..candidates.len())];
        visited[next.row * cols + next.col] = true;

        // Midpoint of (2r+1, 2c+1) and (2r'+1, 2c'+1).
        let wall = Coordinate::new(current.row + next.row + 1, current.col + next.col + 1);
        grid.set(wall, CellState::Path);

        stack.push(next);
    }

    // Entrance and exit markers on the border; outside the room graph.
    grid.set(Coordinate::new(0, 1), CellState::Path);
    grid.set(Coordinate::new(grid_rows - 1, grid_cols - 2), CellState::Path);

    let start = Coordinate::new(1, 1);
    let end = Coordinate::new(grid_rows - 2, grid_cols - 2);
    Maze::new(rows, cols, grid, start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::VecDeque;

    /// Open inter-room connectors and the number of rooms reachable from
    /// room (0, 0) through them.
    fn room_graph_stats(maze: &Maze) -> (usize, usize) {
        let (rows, cols) = (maze.rows(), maze.cols());
        let grid = maze.grid();
        let open = |a: Coordinate, b: Coordinate| {
            let (ca, cb) = (room_center(a), room_center(b));
            grid.is_path((ca.row + cb.row) / 2, (ca.col + cb.col) / 2)
        };

        let mut edges = 0;
        for r in 0..rows {
            for c in 0..cols {
                let here = Coordinate::new(r, c);
                if c + 1 < cols && open(here, Coordinate::new(r, c + 1)) {
                    edges += 1;
                }
                if r + 1 < rows && open(here, Coordinate::new(r + 1, c)) {
                    edges += 1;
                }
            }
        }

        let mut seen = vec![false; rows * cols];
        let mut queue = VecDeque::from([Coordinate::new(0, 0)]);
        seen[0] = true;
        let mut reached = 1;
        while let Some(room) = queue.pop_front() {
            for dir in Direction::ALL {
                let Some(next) = room.step(dir) else { continue };
                if next.row >= rows || next.col >= cols || seen[next.row * cols + next.col] {
                    continue;
                }
                if open(room, next) {
                    seen[next.row * cols + next.col] = true;
                    reached += 1;
                    queue.push_back(next);
                }
            }
        }

        (edges, reached)
    }

    #[test]
    fn test_single_room_maze() {
        let maze = MazeGenerator::default().generate(1).unwrap();
        assert_eq!(maze.grid().height(), 3);
        assert_eq!(maze.grid().width(), 3);
        assert_eq!(maze.start(), Coordinate::new(1, 1));
        assert_eq!(maze.end(), Coordinate::new(1, 1));
        assert!(maze.grid().is_path(1, 1));
        // Room center plus the entrance and exit markers.
        assert!(maze.grid().is_path(0, 1));
        assert!(maze.grid().is_path(2, 1));
        assert_eq!(maze.grid().path_count(), 3);
    }

    #[test]
    fn test_size_five_dimensions_and_endpoints() {
        let maze = MazeGenerator::default().generate_seeded(5, 42).unwrap();
        assert_eq!((maze.rows(), maze.cols()), (5, 5));
        assert_eq!(maze.grid().height(), 11);
        assert_eq!(maze.grid().width(), 11);
        assert_eq!(maze.start(), Coordinate::new(1, 1));
        assert_eq!(maze.end(), Coordinate::new(9, 9));
        assert!(maze.grid().is_path(0, 1));
        assert!(maze.grid().is_path(10, 9));
        assert_eq!(room_graph_stats(&maze), (24, 25));
    }

    #[test]
    fn test_rejects_invalid_sizes() {
        let generator = MazeGenerator::new(10);
        assert_eq!(generator.generate(0), Err(MazeError::InvalidSize { size: 0, max: 10 }));
        assert_eq!(generator.generate(11), Err(MazeError::InvalidSize { size: 11, max: 10 }));
        assert_eq!(generator.check_size(-4), Err(MazeError::InvalidSize { size: -4, max: 10 }));
        assert_eq!(generator.check_size(10), Ok(10));
        assert_eq!(generator.check_size(1), Ok(1));
    }

    #[test]
    fn test_ceiling_is_bounded() {
        let generator = MazeGenerator::new(usize::MAX);
        assert_eq!(generator.max_size(), SIZE_LIMIT);
        assert_eq!(generator.check_size(SIZE_LIMIT as i64), Ok(SIZE_LIMIT));
        assert_eq!(
            generator.check_size(i64::MAX),
            Err(MazeError::InvalidSize {
                size: i64::MAX,
                max: SIZE_LIMIT
            })
        );
        assert!(generator.generate(usize::MAX).is_err());
        assert!(generator.generate(SIZE_LIMIT + 1).is_err());
    }

    #[test]
    fn test_rectangular_generation() {
        let mut rng = <StdRng as ::rand::SeedableRng>::seed_from_u64(7);
        let maze = MazeGenerator::default()
            .generate_rect_with_rng(3, 8, &mut rng)
            .unwrap();
        assert_eq!(maze.grid().height(), 7);
        assert_eq!(maze.grid().width(), 17);
        assert_eq!(maze.end(), Coordinate::new(5, 15));
        assert_eq!(room_graph_stats(&maze), (23, 24));
    }

    #[test]
    fn test_border_is_closed_except_markers() {
        let maze = MazeGenerator::default().generate_seeded(6, 3).unwrap();
        let grid = maze.grid();
        let (h, w) = (grid.height(), grid.width());
        for c in 0..w {
            assert_eq!(grid.is_path(0, c), c == 1);
            assert_eq!(grid.is_path(h - 1, c), c == w - 2);
        }
        for r in 0..h {
            assert!(grid.is_wall(r, 0));
            assert!(grid.is_wall(r, w - 1));
        }
        // Lattice points between four rooms are never carved.
        for r in (0..h).step_by(2) {
            for c in (0..w).step_by(2) {
                assert!(grid.is_wall(r, c));
            }
        }
    }

    proptest! {
        #[test]
        fn generated_mazes_are_perfect(size in 1usize..=16, seed in any::<u64>()) {
            let maze = MazeGenerator::default().generate_seeded(size, seed).unwrap();
            let rooms = size * size;
            let (edges, reached) = room_graph_stats(&maze);
            prop_assert_eq!(edges, rooms - 1);
            prop_assert_eq!(reached, rooms);
            for r in 0..size {
                for c in 0..size {
                    let center = room_center(Coordinate::new(r, c));
                    prop_assert!(maze.grid().is_path(center.row, center.col));
                }
            }
        }

        #[test]
        fn same_seed_same_maze(size in 1usize..=16, seed in any::<u64>()) {
            let generator = MazeGenerator::default();
            let a = generator.generate_seeded(size, seed).unwrap();
            let b = generator.generate_seeded(size, seed).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
