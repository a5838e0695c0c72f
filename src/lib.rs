pub mod api;
pub mod config;
pub mod middleware;
pub mod models;
pub mod state;
pub mod store;
pub mod utils;
