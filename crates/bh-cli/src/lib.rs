//! Business hours CLI library.
//!
//! This crate provides the CLI interface for the meal classifier.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Output};
pub use config::Config;
