//! Terminal host for the import panel.
mod app;
mod config;
mod effects;
mod input;
mod logging;
mod picker;
mod ui;

pub use app::run_app;
pub use config::Cli;
