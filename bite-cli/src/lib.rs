//! bite CLI library
//!
//! This library provides the command-line interface for splitting text
//! files into numbered chunk files and joining them back.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
