mod app;
mod config;
mod effects;
mod fonts;
mod frame;
mod logging;
mod ui;

pub use app::run_app;
