pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod types;
pub mod upstream;

pub use app::{app, AppState};
