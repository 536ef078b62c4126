//! Shared utilities for CLI commands.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use dt_core::{Event, decode_log};

/// Opens the activity log at `path`, or stdin when `path` is `None` or `-`.
pub fn open_log(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        None => Ok(Box::new(io::stdin().lock())),
        Some(p) if p.as_os_str() == "-" => Ok(Box::new(io::stdin().lock())),
        Some(p) => {
            let file =
                File::open(p).with_context(|| format!("failed to open {}", p.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
    }
}

/// Decodes every event in `reader`, failing on the first bad line.
pub fn read_events<R: BufRead>(reader: R) -> Result<Vec<Event>> {
    let events = decode_log(reader)
        .collect::<Result<Vec<_>, _>>()
        .context("failed to decode activity log")?;
    tracing::debug!(count = events.len(), "decoded events");
    Ok(events)
}
