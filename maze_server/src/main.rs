// main.rs - maze-server: HTTP service, or one-shot generate/solve from the command line

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use maze_engine::{render_ascii, solve_with_steps, Maze};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

use maze_server::types::SolvedMaze;
use maze_server::{start_server, ServerConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Start HTTP server mode
    #[arg(long)]
    pub server: bool,

    /// Listen port in server mode; overrides PORT
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Rooms per side for one-shot generation (defaults to DEFAULT_MAZE_SIZE)
    #[arg(short, long)]
    pub size: Option<i64>,

    /// Seed for reproducible generation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Solve this maze JSON file instead of generating one
    #[arg(short, long)]
    pub maze: Option<PathBuf>,

    /// Output format for one-shot mode
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Output path; use "-" for stdout
    #[arg(short, long, default_value = "-")]
    pub output: PathBuf,
}

/// Load maze JSON from disk; the payload is validated while parsing.
async fn load_maze_data(path: &Path) -> Result<Maze> {
    let s = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&s).with_context(|| format!("Failed to parse maze JSON from {}", path.display()))
}

fn obtain_size(args: &Args, config: &ServerConfig) -> Result<usize> {
    let generator = config.generator();
    match args.size {
        Some(size) => Ok(generator.check_size(size)?),
        None => Ok(config.default_maze_size),
    }
}

async fn write_output(path: &Path, contents: &str) -> Result<()> {
    if path == Path::new("-") {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(contents.as_bytes()).await?;
        stdout.flush().await?;
    } else {
        tokio::fs::write(path, contents)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote {}", path.display());
    }
    Ok(())
}

async fn run_once(args: &Args, config: &ServerConfig) -> Result<()> {
    let maze = match &args.maze {
        Some(path) => load_maze_data(path).await?,
        None => {
            let size = obtain_size(args, config)?;
            let generator = config.generator();
            match args.seed {
                Some(seed) => generator.generate_seeded(size, seed)?,
                None => generator.generate(size)?,
            }
        }
    };

    let result = solve_with_steps(&maze);
    info!(
        "Solved {}x{} grid: found={} path_length={} visited={}",
        maze.grid().height(),
        maze.grid().width(),
        result.found(),
        result.path_length(),
        result.visited_order().len()
    );

    let rendered = match args.format {
        OutputFormat::Text => format!(
            "{}found: {}, path length: {}, cells visited: {}\n",
            render_ascii(&maze, Some(result.path())),
            result.found(),
            result.path_length(),
            result.visited_order().len()
        ),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&SolvedMaze::new(&maze, &result))?;
            json.push('\n');
            json
        }
    };

    write_output(&args.output, &rendered).await
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    info!("Starting with {args:?}");

    let mut config = ServerConfig::from_env();
    if let Some(port) = args.port {
        config.port = port;
    }

    if args.server {
        return start_server(config).await;
    }

    run_once(&args, &config).await
}
