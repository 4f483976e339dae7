// solver.rs - Breadth-first shortest path with discovery-order capture

use nohash_hasher::IntMap;
use serde::Serialize;
use std::collections::VecDeque;

use crate::grid::{CellState, Coordinate, Direction, Grid, Maze};

/// Outcome of one solve. `found == false` is an ordinary result, not an
/// error: `path` is then empty and `visited_order` holds the whole component
/// reachable from `start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveResult {
    #[serde(rename = "solution")]
    path: Vec<Coordinate>,
    visited_order: Vec<Coordinate>,
    path_length: usize,
    found: bool,
}

impl SolveResult {
    fn solved(path: Vec<Coordinate>, visited_order: Vec<Coordinate>) -> Self {
        Self {
            path_length: path.len(),
            path,
            visited_order,
            found: true,
        }
    }

    fn not_found(visited_order: Vec<Coordinate>) -> Self {
        Self {
            path: Vec::new(),
            visited_order,
            path_length: 0,
            found: false,
        }
    }

    pub fn path(&self) -> &[Coordinate] {
        &self.path
    }

    /// Cells in the order BFS discovered them, starting with `start`.
    pub fn visited_order(&self) -> &[Coordinate] {
        &self.visited_order
    }

    pub fn path_length(&self) -> usize {
        self.path_length
    }

    pub fn found(&self) -> bool {
        self.found
    }

    pub fn into_path(self) -> Vec<Coordinate> {
        self.path
    }
}

/// Shortest path from `maze.start()` to `maze.end()` plus the full BFS trace.
///
/// Only `Path` cells are entered; `start` itself is expanded whatever its
/// state. Neighbors are explored in [`Direction::ALL`] order.
pub fn solve_with_steps(maze: &Maze) -> SolveResult {
    let grid = maze.grid();
    let (start, end) = (maze.start(), maze.end());

    let mut visited = vec![false; grid.height() * grid.width()];
    let mut parent: IntMap<usize, Coordinate> = IntMap::default();
    let mut queue = VecDeque::from([start]);
    let mut visited_order = vec![start];
    visited[grid.index(start)] = true;

    while let Some(current) = queue.pop_front() {
        if current == end {
            // Every cell but `start` was enqueued with a parent.
            let Some(path) = reconstruct_path(grid, &parent, start, end) else {
                unreachable!("parent chain from {} does not lead back to {}", end, start);
            };
            log::debug!(
                "Solved {}x{} grid: path of {} cells, {} cells visited",
                grid.height(),
                grid.width(),
                path.len(),
                visited_order.len()
            );
            return SolveResult::solved(path, visited_order);
        }

        for dir in Direction::ALL {
            let Some(next) = current.step(dir) else { continue };
            if grid.get(next) != Some(CellState::Path) {
                continue;
            }

            let idx = grid.index(next);
            if visited[idx] {
                continue;
            }
            visited[idx] = true;
            parent.insert(idx, current);
            queue.push_back(next);
            visited_order.push(next);
        }
    }

    log::debug!(
        "No path from {} to {}; {} cells reachable",
        start,
        end,
        visited_order.len()
    );
    SolveResult::not_found(visited_order)
}

/// Path only; same search as [`solve_with_steps`].
pub fn solve(maze: &Maze) -> Vec<Coordinate> {
    solve_with_steps(maze).into_path()
}

/// Walks parent links back from `end`. `None` if the chain breaks before
/// reaching `start`; a partial path is never returned.
fn reconstruct_path(
    grid: &Grid,
    parent: &IntMap<usize, Coordinate>,
    start: Coordinate,
    end: Coordinate,
) -> Option<Vec<Coordinate>> {
    let mut path = vec![end];
    let mut current = end;
    while current != start {
        current = *parent.get(&grid.index(current))?;
        path.push(current);
    }
    path.reverse();
    Some(path)
}
