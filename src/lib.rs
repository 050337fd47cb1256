/// Cinetrack - film catalogue and social rating service
///
/// Tracks films, users, directed friendships, and likes, and derives a
/// deterministic popularity ranking from the like edges.
pub mod api;
pub mod config;
pub mod context;
pub mod db;
pub mod error;
pub mod models;
pub mod server;
pub mod service;
pub mod storage;
