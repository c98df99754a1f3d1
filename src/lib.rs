//! Riemann Tutor - a guided Riemann-sum explorer for the terminal
//!
//! The library exposes the tutorial engine (step definitions, progression,
//! interaction observation, and region guarding) together with the explorer
//! host state, so the engine can be driven and tested without a terminal.

pub mod app;
pub mod config;
pub mod explorer;
pub mod lesson;
pub mod logging;
pub mod tutorial;
pub mod ui;
