//! Activity log decoding.
//!
//! Each line of the log is one event:
//!
//! ```text
//! 2024-01-01 09:00:00.1234 Application activated com.apple.Terminal
//! 2024-01-01 09:05:00.0000 Idle
//! 2024-01-01 09:20:00.0000 Not idle @ 2024-01-01 09:04:00.0000
//! ```
//!
//! `Not idle` lines carry the moment idling actually began after the `@`, and
//! that embedded time is the event's timestamp rather than the leading one.

use std::io::BufRead;
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use thiserror::Error;

use crate::event::{Event, EventKind};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

static LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(\d+-\d+-\d+ \d+:\d+:\d+\.\d+) ",
        r"(Started|Screen sleep|Idle timer|Idle|Sleep|Screen wake up|Wake up",
        r"|Not idle @ (\d+-\d+-\d+ \d+:\d+:\d+\.\d+)",
        r"|Application activated ([a-zA-Z0-9.-]+))$",
    ))
    .unwrap()
});

/// Errors produced while decoding the activity log.
///
/// Every variant is fatal: a skipped line would corrupt the time accounting.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unrecognized log line: {line:?}")]
    Malformed { line: String },

    #[error("invalid timestamp {value:?}")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("line {number}: {error}")]
    AtLine {
        number: usize,
        error: Box<DecodeError>,
    },

    #[error("failed to read log")]
    Io(#[from] std::io::Error),
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime, DecodeError> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|source| {
        DecodeError::Timestamp {
            value: value.to_string(),
            source,
        }
    })
}

/// Decodes one log line.
///
/// Returns `Ok(None)` for `Idle timer` lines, which carry no activity signal.
pub fn decode_line(line: &str) -> Result<Option<Event>, DecodeError> {
    let Some(caps) = LINE_RE.captures(line) else {
        return Err(DecodeError::Malformed {
            line: line.to_string(),
        });
    };

    // The leading timestamp must be valid on every line, even when unused.
    let leading = parse_timestamp(&caps[1])?;

    if let Some(idle_since) = caps.get(3) {
        let timestamp = parse_timestamp(idle_since.as_str())?;
        return Ok(Some(Event::new(timestamp, EventKind::NotIdle)));
    }

    if let Some(app) = caps.get(4) {
        let kind = EventKind::AppActivated {
            app: app.as_str().to_string(),
        };
        return Ok(Some(Event::new(leading, kind)));
    }

    let kind = match &caps[2] {
        "Started" => EventKind::Started,
        "Idle timer" => return Ok(None),
        "Idle" => EventKind::Idle,
        "Sleep" => EventKind::Sleep,
        "Wake up" => EventKind::WakeUp,
        "Screen sleep" => EventKind::ScreenSleep,
        "Screen wake up" => EventKind::ScreenWakeUp,
        _ => {
            return Err(DecodeError::Malformed {
                line: line.to_string(),
            });
        }
    };

    Ok(Some(Event::new(leading, kind)))
}

/// Lazily decodes a whole log.
///
/// Every line, blank ones included, must decode. Iteration stops after the
/// first error, which is tagged with its 1-based line number.
pub fn decode_log<R: BufRead>(reader: R) -> impl Iterator<Item = Result<Event, DecodeError>> {
    let mut failed = false;
    reader
        .lines()
        .enumerate()
        .map_while(move |(idx, line)| {
            if failed {
                return None;
            }
            let decoded = line
                .map_err(DecodeError::from)
                .and_then(|line| decode_line(&line))
                .map_err(|error| DecodeError::AtLine {
                    number: idx + 1,
                    error: Box::new(error),
                });
            failed = decoded.is_err();
            Some(decoded)
        })
        .filter_map(Result::transpose)
}
