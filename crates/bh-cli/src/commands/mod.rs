//! CLI command implementations.

pub mod classify;
pub mod selftest;
pub mod util;
