//! Events command for inspecting a decoded activity log.
//!
//! This module outputs events as JSONL for debugging.

use std::io::{BufRead, Write};

use anyhow::Result;

use super::util::read_events;

/// Runs the events command, writing one JSON object per event.
pub fn run<R: BufRead, W: Write>(reader: R, out: &mut W) -> Result<()> {
    for event in read_events(reader)? {
        let json = serde_json::to_string(&event)?;
        writeln!(out, "{json}")?;
    }
    Ok(())
}
