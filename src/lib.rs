// src/lib.rs

#[macro_use]
pub mod macros;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod csv;
pub mod file;
pub mod logging;
pub mod player;
pub mod prompt;
pub mod roster;
pub mod runner;
pub mod sheet;
