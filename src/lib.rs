//! Lakeside - Idle Fishing on the Dock
//!
//! Game core for the terminal front-end: the dock state machine, weather
//! cycle, achievements, input aggregation, and the persistence stores.

pub mod achievements;
pub mod config;
pub mod core;
pub mod fishing;
pub mod input;
pub mod persistence;
pub mod ui;
pub mod weather;
