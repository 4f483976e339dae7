// render.rs - Plain-text maze rendering for terminals and logs

use std::collections::HashSet;

use crate::grid::{CellState, Coordinate, Maze};

const WALL: char = '#';
const OPEN: char = ' ';
const TRAIL: char = '.';
const START: char = 'S';
const END: char = 'E';

/// One line per grid row. `path` overrides the maze's own `solution` when
/// given; endpoints are drawn on top of everything else.
pub fn render_ascii(maze: &Maze, path: Option<&[Coordinate]>) -> String {
    let grid = maze.grid();
    let trail: HashSet<Coordinate> = path
        .or_else(|| maze.solution())
        .unwrap_or_default()
        .iter()
        .copied()
        .collect();

    let mut out = String::with_capacity(grid.height() * (grid.width() + 1));
    for (row, cells) in grid.rows().enumerate() {
        for (col, &cell) in cells.iter().enumerate() {
            let here = Coordinate::new(row, col);
            let ch = if here == maze.start() {
                START
            } else if here == maze.end() {
                END
            } else if trail.contains(&here) {
                TRAIL
            } else if cell == CellState::Wall {
                WALL
            } else {
                OPEN
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    #[test]
    fn test_render_corridor() {
        let grid = Grid::from_raw(vec![
            vec![0, 0, 0, 0, 0],
            vec![0, 1, 1, 1, 0],
            vec![0, 0, 0, 0, 0],
        ])
        .unwrap();
        let maze = Maze::new(1, 2, grid, Coordinate::new(1, 1), Coordinate::new(1, 3)).unwrap();

        assert_eq!(render_ascii(&maze, None), "#####\n#S E#\n#####\n");

        let path = [Coordinate::new(1, 1), Coordinate::new(1, 2), Coordinate::new(1, 3)];
        assert_eq!(render_ascii(&maze, Some(&path)), "#####\n#S.E#\n#####\n");

        let solved = maze.with_solution(path.to_vec());
        assert_eq!(render_ascii(&solved, None), "#####\n#S.E#\n#####\n");
    }
}
