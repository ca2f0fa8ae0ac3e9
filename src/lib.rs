//! Hardware wrappers for the robot's sensors: the Limelight vision camera,
//! reached through the shared telemetry table, and the navX motion processor.

#![recursion_limit = "1024"]

#[macro_use]
extern crate error_chain;
extern crate serde;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate slog;
extern crate slog_async;
extern crate slog_json;
extern crate slog_term;
extern crate toml;
extern crate vecmath;

pub mod command;
pub mod config;
pub mod errors;
pub mod limelight;
pub mod logging;
pub mod navx;
pub mod sim;
pub mod telemetry;
pub mod util;
