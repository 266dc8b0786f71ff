//! Utility functions for the ladder engine

use crate::error::{LadderError, Result};
use crate::types::{Rank, SeedEntry};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use uuid::Uuid;

/// Generate a new unique match ID
pub fn generate_match_id() -> Uuid {
    Uuid::new_v4()
}

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Trim a display name, rejecting blank input
pub fn normalize_name(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LadderError::validation("player name must not be blank").into());
    }
    Ok(trimmed.to_string())
}

/// Parse an operator-supplied played-at timestamp.
///
/// Accepts RFC 3339 (`2024-03-01T18:30:00Z`) and the date/datetime forms
/// submitted by datetime-local inputs (`2024-03-01`, `2024-03-01 18:30`,
/// `2024-03-01 18:30:00`, with `T` also accepted as the separator).
/// Bare dates and naive datetimes are taken as UTC.
pub fn parse_played_at(raw: &str) -> Result<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LadderError::validation("played-at timestamp must not be blank").into());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    let candidate = trimmed.replace('T', " ");
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&candidate, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    Err(LadderError::validation(format!("unparsable played-at timestamp: {trimmed}")).into())
}

/// Parse operator seed text into explicit (name, rank) entries.
///
/// One entry per line. A line of the form `rank,name` carries an explicit
/// rank; a bare `name` takes its 1-based line position as rank. Lines whose
/// rank field is not a positive integer are treated as bare names. Blank
/// lines produce no entry but still consume a position, so position-ranked
/// entries after them keep their gaps.
pub fn parse_seed_lines(text: &str) -> Vec<SeedEntry> {
    let mut entries = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let position = (index + 1) as Rank;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (rank, name) = match line.split_once(',') {
            Some((rank_field, rest)) => match rank_field.trim().parse::<Rank>() {
                Ok(rank) if rank >= 1 => (rank, rest.trim()),
                _ => (position, line),
            },
            None => (position, line),
        };

        if name.is_empty() {
            continue;
        }
        entries.push(SeedEntry::new(name, rank));
    }
    entries
}
