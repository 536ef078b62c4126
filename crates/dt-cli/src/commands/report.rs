//! Report command for per-day activity totals.
//!
//! This module implements `dt report`: it replays the log through the activity
//! tracker and renders each day's labels sorted by time spent, in
//! human-readable or JSON form.

use std::fmt::Write as _;
use std::io::{BufRead, Write};

use anyhow::Result;
use chrono::{Duration, NaiveDate};
use dt_core::{DailyTotals, Label, track};
use serde::Serialize;

use super::util::read_events;
use crate::Config;

/// Width of the right-aligned label column in human output.
const LABEL_WIDTH: usize = 40;

/// Options controlling a single report run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Emit JSON instead of text.
    pub json: bool,
    /// Entries must be strictly longer than this to be shown.
    pub threshold: Duration,
}

/// One visible label on one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub label: Label,
    pub duration: Duration,
}

/// Everything shown for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayReport {
    pub date: NaiveDate,
    /// Sum of all labels, including hidden ones.
    pub total: Duration,
    /// Visible entries, longest first.
    pub entries: Vec<ReportEntry>,
}

// ========== Report Generation ==========

/// Builds the per-day report from accumulated totals.
///
/// Days come out in ascending order. Within a day, entries are sorted by
/// duration descending with ties broken by label.
pub fn build_report(totals: &DailyTotals, threshold: Duration) -> Vec<DayReport> {
    totals
        .days()
        .map(|(date, labels)| {
            let mut entries: Vec<_> = labels
                .iter()
                .filter(|(_, duration)| **duration > threshold)
                .map(|(label, duration)| ReportEntry {
                    label: label.clone(),
                    duration: *duration,
                })
                .collect();
            entries.sort_by(|a, b| {
                b.duration
                    .cmp(&a.duration)
                    .then_with(|| a.label.cmp(&b.label))
            });

            DayReport {
                date,
                total: totals.day_total(date),
                entries,
            }
        })
        .collect()
}

// ========== Duration Formatting ==========

/// Formats a duration as "Xh Ym" from one hour up, "Xm Ys" below that, and
/// "Xs" under a minute. Negative durations keep their sign, e.g. "-5m 0s".
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.num_seconds();
    if secs < 0 {
        return format!("-{}", format_duration(-duration));
    }
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    if hours >= 1 {
        format!("{hours}h {minutes}m")
    } else if minutes >= 1 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

// ========== Human Output ==========

/// Formats the human-readable report output.
pub fn format_report(days: &[DayReport]) -> String {
    let mut output = String::new();

    if days.is_empty() {
        writeln!(output, "No activity recorded.").unwrap();
        return output;
    }

    for (idx, day) in days.iter().enumerate() {
        if idx > 0 {
            writeln!(output).unwrap();
        }
        writeln!(output, "{}:", day.date.format("%Y-%m-%d")).unwrap();
        for entry in &day.entries {
            let label = entry.label.to_string();
            writeln!(
                output,
                "{label:>LABEL_WIDTH$} {}",
                format_duration(entry.duration)
            )
            .unwrap();
        }
        writeln!(
            output,
            "{:>LABEL_WIDTH$} {}",
            "total",
            format_duration(day.total)
        )
        .unwrap();
    }

    output
}

// ========== JSON Output ==========

/// JSON report structure.
#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub threshold_ms: i64,
    pub days: Vec<JsonDay>,
}

#[derive(Debug, Serialize)]
pub struct JsonDay {
    pub date: String,
    pub total_ms: i64,
    pub entries: Vec<JsonEntry>,
}

#[derive(Debug, Serialize)]
pub struct JsonEntry {
    pub label: Label,
    pub duration_ms: i64,
}

/// Formats report data as JSON.
pub fn format_report_json(days: &[DayReport], threshold: Duration) -> Result<String> {
    let report = JsonReport {
        threshold_ms: threshold.num_milliseconds(),
        days: days
            .iter()
            .map(|day| JsonDay {
                date: day.date.format("%Y-%m-%d").to_string(),
                total_ms: day.total.num_milliseconds(),
                entries: day
                    .entries
                    .iter()
                    .map(|entry| JsonEntry {
                        label: entry.label.clone(),
                        duration_ms: entry.duration.num_milliseconds(),
                    })
                    .collect(),
            })
            .collect(),
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

// ========== Public Interface ==========

/// Runs the report command.
pub fn run<R: BufRead, W: Write>(
    reader: R,
    out: &mut W,
    config: &Config,
    options: ReportOptions,
) -> Result<()> {
    let events = read_events(reader)?;
    let totals = track(&events, config.accumulator_config());
    let days = build_report(&totals, options.threshold);

    if options.json {
        let output = format_report_json(&days, options.threshold)?;
        writeln!(out, "{output}")?;
    } else {
        write!(out, "{}", format_report(&days))?;
    }

    Ok(())
}
