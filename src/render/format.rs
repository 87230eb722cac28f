use std::time::SystemTime;

use chrono::{DateTime, Local};

use crate::fs::node::Node;

use super::Annotate;

const UNIT: u64 = 1024;
const UNIT_LETTERS: &[u8] = b"KMGTPE";

/// Scale `bytes` to the largest binary unit not exceeding it.
/// Returns `None` below one KiB.
fn scale(bytes: u64) -> Option<(f64, char)> {
    if bytes < UNIT {
        return None;
    }
    let mut div = UNIT;
    let mut exp = 0;
    let mut n = bytes / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }
    Some((bytes as f64 / div as f64, UNIT_LETTERS[exp] as char))
}

/// Human-readable size for summaries: `0 B`, `1023 B`, `1.5 KB`.
pub fn format_size(bytes: u64) -> String {
    match scale(bytes) {
        Some((value, unit)) => format!("{value:.1} {unit}B"),
        None => format!("{bytes} B"),
    }
}

/// Compact size for inline annotations: `10B`, `2.0KB`.
pub fn format_size_compact(bytes: u64) -> String {
    match scale(bytes) {
        Some((value, unit)) => format!("{value:.1}{unit}B"),
        None => format!("{bytes}B"),
    }
}

/// `Jan 02`, or `Jan 02 15:04` in long mode, in local time.
/// An unset timestamp formats as an empty string.
pub fn format_date(modified: Option<SystemTime>, long: bool) -> String {
    let Some(time) = modified else {
        return String::new();
    };
    let local: DateTime<Local> = time.into();
    if long {
        local.format("%b %d %H:%M").to_string()
    } else {
        local.format("%b %d").to_string()
    }
}

/// Inline annotations for one node, in display order. Empty dates are dropped.
pub fn annotations(node: &Node, annotate: &Annotate) -> Vec<String> {
    let mut parts = Vec::new();
    if annotate.shows_size() {
        if node.is_dir() {
            parts.push(format!("[{}]", format_size_compact(node.aggregate_size())));
        } else {
            parts.push(format_size_compact(node.size));
        }
    }
    if annotate.shows_date() {
        let date = format_date(node.modified, annotate.long_date);
        if !date.is_empty() {
            parts.push(date);
        }
    }
    parts
}
