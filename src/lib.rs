pub mod api;
pub mod browse;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
