//! Event timeline formatter.
//!
//! Selects and orders a bounded number of the most recent lifecycle
//! events for display, with deterministic tie-breaking, truncation, and
//! human-relative time labels.

use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use cairn_shared::{CairnError, EventKind, EventRecord, Result};

use crate::style::Tint;

/// Default number of events shown when the caller does not say otherwise.
pub const DEFAULT_MAX_EVENTS: usize = 5;

/// Placeholder text emitted for an empty event list.
pub const NO_EVENTS_LABEL: &str = "No events yet";

/// Width of the event token field.
const LABEL_WIDTH: usize = 16;

/// Width of the relative-time field.
const TIME_WIDTH: usize = 10;

/// One renderable timeline row.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineRow {
    /// Per-event icon glyph.
    pub icon: &'static str,
    /// Per-event color.
    pub tint: Tint,
    /// Event token, padded to a fixed width.
    pub label: String,
    /// Relative-time label, padded to a fixed width.
    pub rel_time: String,
    /// Who or what produced the event.
    pub actor: String,
    /// Row identity for list rendering: raw timestamp plus position,
    /// so duplicate timestamps stay distinguishable.
    pub key: (String, usize),
}

impl TimelineRow {
    /// Plain-text form of the row.
    pub fn to_text(&self) -> String {
        format!("{} {} {} {}", self.icon, self.label, self.rel_time, self.actor)
    }

    fn placeholder() -> Self {
        Self {
            icon: "·",
            tint: Tint::Gray,
            label: pad_label(NO_EVENTS_LABEL),
            rel_time: pad_time(""),
            actor: String::new(),
            key: (String::new(), 0),
        }
    }
}

/// Format a timeline from raw event records.
///
/// Events sort by timestamp descending; byte-equal timestamps break
/// ties by ascending lifecycle rank. The sorted list is truncated to
/// `max_events`. The input is never mutated.
///
/// `now` must be supplied explicitly — the formatter never consults the
/// live clock, so output is a pure function of its arguments. An
/// unparseable timestamp fails with a validation error rather than
/// silently mis-sorting.
///
/// Empty input yields exactly one "No events yet" placeholder row.
#[instrument(skip_all, fields(event_count = events.len(), max_events))]
pub fn format_timeline(
    events: &[EventRecord],
    max_events: usize,
    now: DateTime<Utc>,
) -> Result<Vec<TimelineRow>> {
    if events.is_empty() {
        return Ok(vec![TimelineRow::placeholder()]);
    }

    // Parse every timestamp up front so a bad record fails the whole
    // render instead of sorting incorrectly.
    let mut parsed: Vec<(DateTime<Utc>, &EventRecord)> = events
        .iter()
        .map(|event| Ok((parse_instant(&event.timestamp)?, event)))
        .collect::<Result<_>>()?;

    parsed.sort_by(|a, b| {
        b.0.cmp(&a.0)
            .then_with(|| event_rank(&a.1.event).cmp(&event_rank(&b.1.event)))
    });
    parsed.truncate(max_events);

    debug!(rows = parsed.len(), "timeline formatted");

    let rows = parsed
        .into_iter()
        .enumerate()
        .map(|(i, (instant, event))| {
            let (icon, tint) = event_style(&event.event);
            TimelineRow {
                icon,
                tint,
                label: pad_label(event.event.token()),
                rel_time: pad_time(&relative_label(now, instant)),
                actor: event.actor.clone(),
                key: (event.timestamp.clone(), i),
            }
        })
        .collect();

    Ok(rows)
}

/// Parse an ISO-8601 instant to UTC.
fn parse_instant(timestamp: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| CairnError::validation(format!("bad event timestamp '{timestamp}': {e}")))
}

/// Tie-break rank: lower rank (earlier lifecycle stage) sorts first
/// among byte-equal timestamps. Unknown tokens rank 99.
fn event_rank(event: &EventKind) -> u8 {
    match event {
        EventKind::Draft => 0,
        EventKind::ArtifactCreated => 1,
        EventKind::Ready => 2,
        EventKind::Blocked => 3,
        EventKind::InProgress => 4,
        EventKind::BranchCreated => 5,
        EventKind::InReview => 6,
        EventKind::PrReady => 7,
        EventKind::PrMerged => 8,
        EventKind::Completed => 9,
        EventKind::Cancelled => 10,
        EventKind::Archived => 11,
        EventKind::Other(_) => 99,
    }
}

/// Fixed per-event icon and tint. The `in_review` state and `pr_ready`
/// trigger share presentation.
fn event_style(event: &EventKind) -> (&'static str, Tint) {
    match event {
        EventKind::Draft => ("○", Tint::Gray),
        EventKind::ArtifactCreated => ("✚", Tint::Cyan),
        EventKind::Ready => ("◇", Tint::Blue),
        EventKind::Blocked => ("✖", Tint::Red),
        EventKind::InProgress => ("◐", Tint::Yellow),
        EventKind::BranchCreated => ("⎇", Tint::Magenta),
        EventKind::InReview => ("◎", Tint::Yellow),
        EventKind::PrReady => ("◎", Tint::Yellow),
        EventKind::PrMerged => ("⇅", Tint::Magenta),
        EventKind::Completed => ("✔", Tint::Green),
        EventKind::Cancelled => ("⊘", Tint::Red),
        EventKind::Archived => ("▪", Tint::Gray),
        EventKind::Other(_) => ("•", Tint::Gray),
    }
}

/// Human-relative time label against a reference instant.
///
/// `diff_hours < 1` (including negative, for future timestamps) is
/// "Just now"; under a day it is "{h}h ago"; otherwise "{d}d ago".
fn relative_label(now: DateTime<Utc>, instant: DateTime<Utc>) -> String {
    let diff_hours = (now - instant).num_hours();
    if diff_hours < 1 {
        "Just now".to_string()
    } else if diff_hours < 24 {
        format!("{diff_hours}h ago")
    } else {
        format!("{}d ago", diff_hours / 24)
    }
}

fn pad_label(token: &str) -> String {
    format!("{token:<width$}", width = LABEL_WIDTH)
}

fn pad_time(label: &str) -> String {
    format!("{label:<width$}", width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event(ts: &str, kind: EventKind) -> EventRecord {
        EventRecord::new(ts, kind, "alice")
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn empty_input_yields_no_events_placeholder() {
        let rows = format_timeline(&[], DEFAULT_MAX_EVENTS, fixed_now()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label.trim_end(), NO_EVENTS_LABEL);
    }

    #[test]
    fn orders_most_recent_first() {
        let events = vec![
            event("2025-01-01T00:00:00Z", EventKind::Draft),
            event("2025-01-02T00:00:00Z", EventKind::Ready),
        ];

        let rows = format_timeline(&events, DEFAULT_MAX_EVENTS, fixed_now()).unwrap();
        assert_eq!(rows[0].label.trim_end(), "ready");
        assert_eq!(rows[1].label.trim_end(), "draft");
    }

    #[test]
    fn equal_timestamps_break_ties_by_rank() {
        let events = vec![
            event("2025-01-01T00:00:00Z", EventKind::Completed),
            event("2025-01-01T00:00:00Z", EventKind::Draft),
        ];

        let rows = format_timeline(&events, DEFAULT_MAX_EVENTS, fixed_now()).unwrap();
        // draft (rank 0) before completed (rank 9) despite equal timestamps.
        assert_eq!(rows[0].label.trim_end(), "draft");
        assert_eq!(rows[1].label.trim_end(), "completed");
    }

    #[test]
    fn unknown_token_ranks_last_on_ties() {
        let events = vec![
            event("2025-01-01T00:00:00Z", EventKind::Other("reopened".into())),
            event("2025-01-01T00:00:00Z", EventKind::Archived),
        ];

        let rows = format_timeline(&events, DEFAULT_MAX_EVENTS, fixed_now()).unwrap();
        assert_eq!(rows[0].label.trim_end(), "archived");
        assert_eq!(rows[1].label.trim_end(), "reopened");
    }

    #[test]
    fn truncates_to_max_events() {
        let events: Vec<EventRecord> = (1..=8)
            .map(|d| event(&format!("2025-01-0{d}T00:00:00Z"), EventKind::InProgress))
            .collect();

        let rows = format_timeline(&events, 5, fixed_now()).unwrap();
        assert_eq!(rows.len(), 5);
        // The five most recent survive.
        assert_eq!(rows[0].key.0, "2025-01-08T00:00:00Z");
        assert_eq!(rows[4].key.0, "2025-01-04T00:00:00Z");
    }

    #[test]
    fn relative_time_boundaries() {
        let now = fixed_now();

        // 30 minutes ago
        let events = vec![event("2025-01-10T11:30:00Z", EventKind::Ready)];
        let rows = format_timeline(&events, 5, now).unwrap();
        assert_eq!(rows[0].rel_time.trim_end(), "Just now");

        // exactly 5 hours ago
        let events = vec![event("2025-01-10T07:00:00Z", EventKind::Ready)];
        let rows = format_timeline(&events, 5, now).unwrap();
        assert_eq!(rows[0].rel_time.trim_end(), "5h ago");

        // exactly 50 hours ago
        let events = vec![event("2025-01-08T10:00:00Z", EventKind::Ready)];
        let rows = format_timeline(&events, 5, now).unwrap();
        assert_eq!(rows[0].rel_time.trim_end(), "2d ago");
    }

    #[test]
    fn future_timestamp_reads_just_now() {
        let events = vec![event("2025-01-10T15:00:00Z", EventKind::Ready)];
        let rows = format_timeline(&events, 5, fixed_now()).unwrap();
        assert_eq!(rows[0].rel_time.trim_end(), "Just now");
    }

    #[test]
    fn bad_timestamp_fails_with_validation() {
        let events = vec![event("yesterday-ish", EventKind::Ready)];
        let err = format_timeline(&events, 5, fixed_now()).unwrap_err();
        assert!(matches!(err, CairnError::Validation { .. }));
        assert!(err.to_string().contains("yesterday-ish"));
    }

    #[test]
    fn in_review_and_pr_ready_share_presentation() {
        let events = vec![
            event("2025-01-02T00:00:00Z", EventKind::InReview),
            event("2025-01-01T00:00:00Z", EventKind::PrReady),
        ];

        let rows = format_timeline(&events, 5, fixed_now()).unwrap();
        assert_eq!(rows[0].icon, rows[1].icon);
        assert_eq!(rows[0].tint, rows[1].tint);
    }

    #[test]
    fn row_keys_tolerate_duplicate_timestamps() {
        let events = vec![
            event("2025-01-01T00:00:00Z", EventKind::Draft),
            event("2025-01-01T00:00:00Z", EventKind::Ready),
        ];

        let rows = format_timeline(&events, 5, fixed_now()).unwrap();
        assert_ne!(rows[0].key, rows[1].key);
    }

    #[test]
    fn input_is_not_mutated() {
        let events = vec![
            event("2025-01-01T00:00:00Z", EventKind::Draft),
            event("2025-01-02T00:00:00Z", EventKind::Ready),
        ];
        let before = events.clone();

        format_timeline(&events, 5, fixed_now()).unwrap();
        assert_eq!(events.len(), before.len());
        assert_eq!(events[0].timestamp, before[0].timestamp);
        assert_eq!(events[0].event, before[0].event);
    }
}
