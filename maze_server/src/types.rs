// types.rs - Request/response shapes for the maze HTTP API

use maze_engine::{Coordinate, Maze, SolveResult};
use serde::{Deserialize, Serialize};

/// `GET /api/maze/generate?size=N&seed=S`. `size` is signed so that
/// negative input is reported as an invalid size, not a malformed query.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateQuery {
    pub size: Option<i64>,
    pub seed: Option<u64>,
}

/// `POST /api/maze/solve`: the search trace is left out.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveResponse {
    pub solution: Vec<Coordinate>,
    pub path_length: usize,
    pub found: bool,
}

impl From<SolveResult> for SolveResponse {
    fn from(result: SolveResult) -> Self {
        Self {
            path_length: result.path_length(),
            found: result.found(),
            solution: result.into_path(),
        }
    }
}

/// Maze and its solve result flattened into one object, as written by the
/// one-shot CLI. The maze's `solution` is replaced by the fresh path, so the
/// output stays a loadable maze payload with a single `solution` key.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolvedMaze<'a> {
    #[serde(flatten)]
    pub maze: Maze,
    pub visited_order: &'a [Coordinate],
    pub path_length: usize,
    pub found: bool,
}

impl<'a> SolvedMaze<'a> {
    pub fn new(maze: &Maze, result: &'a SolveResult) -> Self {
        Self {
            maze: maze.clone().with_solution(result.path().to_vec()),
            visited_order: result.visited_order(),
            path_length: result.path_length(),
            found: result.found(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

impl HealthResponse {
    pub fn up() -> Self {
        Self {
            status: "UP",
            service: "maze-server",
            version: env!("CARGO_PKG_VERSION"),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_engine::{solve_with_steps, MazeGenerator};

    #[test]
    fn test_solve_response_drops_trace() {
        let maze = MazeGenerator::default().generate_seeded(4, 11).unwrap();
        let result = solve_with_steps(&maze);
        let expected_path = result.path().to_vec();

        let value = serde_json::to_value(SolveResponse::from(result)).unwrap();
        assert_eq!(value["found"], true);
        assert_eq!(value["pathLength"], expected_path.len());
        assert_eq!(value["solution"], serde_json::to_value(&expected_path).unwrap());
        assert!(value.get("visitedOrder").is_none());
    }

    #[test]
    fn test_solved_maze_is_flat() {
        let maze = MazeGenerator::default().generate_seeded(2, 5).unwrap();
        let result = solve_with_steps(&maze);
        let value = serde_json::to_value(SolvedMaze::new(&maze, &result)).unwrap();

        for key in ["rows", "cols", "grid", "start", "end", "solution", "visitedOrder", "pathLength", "found"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn test_resolving_a_solved_maze_keeps_one_solution() {
        let maze = MazeGenerator::default().generate_seeded(2, 5).unwrap();
        let result = solve_with_steps(&maze);
        let stale = vec![maze.start()];
        let solved = maze.with_solution(stale);

        let json = serde_json::to_string(&SolvedMaze::new(&solved, &result)).unwrap();
        assert_eq!(json.matches("\"solution\"").count(), 1);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["solution"], serde_json::to_value(result.path()).unwrap());

        let reloaded: Maze = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded.solution(), Some(result.path()));
        let again = solve_with_steps(&reloaded);
        let json = serde_json::to_string(&SolvedMaze::new(&reloaded, &again)).unwrap();
        assert_eq!(json.matches("\"solution\"").count(), 1);
    }
}
