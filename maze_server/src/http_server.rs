// http_server.rs - warp routes for maze generation, solving and health checks

use anyhow::Result;
use maze_engine::{solve_with_steps, Maze, MazeGenerator};
use warp::{Filter, Rejection, Reply};

use crate::config::ServerConfig;
use crate::error_handling::{handle_rejection, reject, ServiceError};
use crate::types::{GenerateQuery, HealthResponse, SolveResponse};

// ============= Shared State =============

/// Read-only per-process settings; requests share nothing mutable.
#[derive(Debug, Clone)]
pub struct ServerState {
    generator: MazeGenerator,
    default_size: usize,
}

impl ServerState {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            generator: config.generator(),
            default_size: config.default_maze_size,
        }
    }
}

// ============= CORS Configuration =============

fn with_cors() -> warp::cors::Builder {
    warp::cors()
        .allow_any_origin()
        .allow_headers(vec![
            "Accept",
            "Accept-Language",
            "Content-Type",
            "X-Requested-With",
        ])
        .allow_methods(vec!["GET", "POST", "OPTIONS"])
        .max_age(3600)
}

// ============= Middleware & Filters =============

fn with_state(state: ServerState) -> impl Filter<Extract = (ServerState,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || state.clone())
}

fn json_body(limit: u64) -> impl Filter<Extract = (Maze,), Error = Rejection> + Clone {
    warp::body::content_length_limit(limit).and(warp::body::json())
}

/// Run CPU-bound maze work off the async executor.
async fn run_blocking<T, F>(task: F) -> std::result::Result<T, Rejection>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task).await.map_err(|e| {
        log::error!("maze worker failed: {}", e);
        reject(ServiceError::internal())
    })
}

// ============= Request Handlers =============

async fn handle_health() -> std::result::Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&HealthResponse::up()))
}

async fn handle_generate(
    query: GenerateQuery,
    state: ServerState,
) -> std::result::Result<impl Reply, Rejection> {
    let generator = state.generator;
    let size = match query.size {
        Some(size) => generator.check_size(size).map_err(reject)?,
        None => state.default_size,
    };

    let maze = run_blocking(move || match query.seed {
        Some(seed) => generator.generate_seeded(size, seed),
        None => generator.generate(size),
    })
    .await?
    .map_err(reject)?;

    log::info!("Generated {}x{} maze", maze.rows(), maze.cols());
    Ok(warp::reply::json(&maze))
}

async fn handle_solve(maze: Maze) -> std::result::Result<impl Reply, Rejection> {
    let result = run_blocking(move || solve_with_steps(&maze)).await?;
    log::info!("Solve: found={} path_length={}", result.found(), result.path_length());
    Ok(warp::reply::json(&SolveResponse::from(result)))
}

async fn handle_solve_with_steps(maze: Maze) -> std::result::Result<impl Reply, Rejection> {
    let result = run_blocking(move || solve_with_steps(&maze)).await?;
    log::info!(
        "Solve with steps: found={} path_length={} visited={}",
        result.found(),
        result.path_length(),
        result.visited_order().len()
    );
    Ok(warp::reply::json(&result))
}

// ============= Routes =============

pub fn routes(config: &ServerConfig) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let state = ServerState::new(config);

    let health = warp::path!("api" / "maze" / "health")
        .and(warp::get())
        .and_then(handle_health);

    let generate = warp::path!("api" / "maze" / "generate")
        .and(warp::get())
        .and(warp::query::<GenerateQuery>())
        .and(with_state(state))
        .and_then(handle_generate);

    let solve = warp::path!("api" / "maze" / "solve")
        .and(warp::post())
        .and(json_body(config.max_body_bytes))
        .and_then(handle_solve);

    let solve_with_steps = warp::path!("api" / "maze" / "solve-with-steps")
        .and(warp::post())
        .and(json_body(config.max_body_bytes))
        .and_then(handle_solve_with_steps);

    health
        .or(generate)
        .or(solve)
        .or(solve_with_steps)
        .recover(handle_rejection)
        .with(with_cors())
        .with(warp::log("maze_server"))
}

// ============= Server Initialization =============

pub async fn start_server(config: ServerConfig) -> Result<()> {
    log::info!(
        "Starting maze HTTP server on port {} (max size {}, default size {})",
        config.port,
        config.max_maze_size,
        config.default_maze_size
    );

    let addr = ([0, 0, 0, 0], config.port);
    warp::serve(routes(&config)).run(addr).await;

    Ok(())
}
