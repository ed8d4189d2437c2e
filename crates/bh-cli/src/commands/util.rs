//! Shared utilities for CLI commands.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use bh_core::RawEntry;

/// Decodes a schedule: a JSON array of `[label, "HH:MM"]` string pairs.
///
/// Anything else (objects, numbers, pairs of the wrong length) is rejected.
pub fn parse_schedule(s: &str) -> Result<Vec<RawEntry>> {
    serde_json::from_str(s).context(
        r#"invalid schedule, expected a JSON array of pairs such as [["mon_1_open", "09:00"]]"#,
    )
}

/// Reads the schedule from the literal argument, a file, or stdin.
pub fn read_schedule(literal: Option<&str>, file: Option<&Path>) -> Result<Vec<RawEntry>> {
    if let Some(literal) = literal {
        return parse_schedule(literal);
    }

    let content = match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read schedule from stdin")?;
            buf
        }
    };
    parse_schedule(&content)
}
