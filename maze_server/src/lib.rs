// lib.rs - HTTP boundary for the maze engine: configuration, routes and wire types

pub mod config;
pub mod error_handling;
pub mod http_server;
pub mod types;

pub use config::ServerConfig;
pub use http_server::{routes, start_server};
