//! Console front end: command line, configuration, logging and the
//! dispatch loop that drives `clusterscope_core::update`.
mod app;
mod cli;
mod config;
mod effects;
mod logging;
mod ui;

pub use app::run_app;
