pub mod ai;
pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod tui;
