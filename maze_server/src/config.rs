// config.rs - Service configuration read from the environment

use std::fmt::Display;
use std::str::FromStr;

use maze_engine::{MazeGenerator, DEFAULT_MAX_SIZE, DEFAULT_SIZE, SIZE_LIMIT};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_BODY_BYTES: u64 = 4 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Largest accepted `size` (rooms per side) for generation.
    pub max_maze_size: usize,
    /// Size used when a generate request omits `size`.
    pub default_maze_size: usize,
    pub max_body_bytes: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            max_maze_size: DEFAULT_MAX_SIZE,
            default_maze_size: DEFAULT_SIZE,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    /// Reads `PORT`, `MAX_MAZE_SIZE`, `DEFAULT_MAZE_SIZE` and `MAX_BODY_BYTES`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: env_or("PORT", defaults.port),
            max_maze_size: env_or("MAX_MAZE_SIZE", defaults.max_maze_size),
            default_maze_size: env_or("DEFAULT_MAZE_SIZE", defaults.default_maze_size),
            max_body_bytes: env_or("MAX_BODY_BYTES", defaults.max_body_bytes),
        }
        .normalized()
    }

    fn normalized(mut self) -> Self {
        if self.max_maze_size == 0 {
            log::warn!("MAX_MAZE_SIZE must be positive, using {}", DEFAULT_MAX_SIZE);
            self.max_maze_size = DEFAULT_MAX_SIZE;
        }
        if self.max_maze_size > SIZE_LIMIT {
            log::warn!(
                "MAX_MAZE_SIZE {} exceeds the supported limit, using {}",
                self.max_maze_size,
                SIZE_LIMIT
            );
            self.max_maze_size = SIZE_LIMIT;
        }
        if self.default_maze_size == 0 || self.default_maze_size > self.max_maze_size {
            let clamped = self.default_maze_size.clamp(1, self.max_maze_size);
            log::warn!(
                "DEFAULT_MAZE_SIZE {} outside 1..={}, using {}",
                self.default_maze_size,
                self.max_maze_size,
                clamped
            );
            self.default_maze_size = clamped;
        }
        self
    }

    pub fn generator(&self) -> MazeGenerator {
        MazeGenerator::new(self.max_maze_size)
    }
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring invalid {}={:?}, using {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}
