//=========================================================================
// Notes
//
// The note model consumed by the cloud, plus the helpers that turn a
// note into what the detail overlay displays.
//
// Responsibilities:
// - Deserialize the note list (JSON array of `{content, time}`)
// - Format timestamps for display in local time
// - Build the `NoteDetail` shown by the focus overlay
// - Derive the deterministic per-index sticky style
//
//=========================================================================

//=== Standard Library Imports ============================================
use std::fmt;
use std::fs;
use std::path::Path;

//=== External Crates =====================================================
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

//=== Internal Modules ====================================================
use super::markup::render_content;

//=== Note ================================================================

/// One timestamped short note. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub content: String,
    /// ISO-8601 timestamp as supplied by the data source.
    pub time: String,
}

impl Note {
    pub fn new(content: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            time: time.into(),
        }
    }
}

//=== NoteLoadError =======================================================

/// Failure to obtain the note list. The view treats it as "no data".
#[derive(Debug)]
pub enum NoteLoadError {
    /// The note file could not be read.
    Io(std::io::Error),

    /// The payload is not a JSON array of notes.
    Parse(serde_json::Error),
}

//--- Trait Implementations -----------------------------------------------

impl fmt::Display for NoteLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "Failed to read notes: {}", e),
            Self::Parse(e) => write!(f, "Malformed note list: {}", e),
        }
    }
}

impl std::error::Error for NoteLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for NoteLoadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for NoteLoadError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

//=== Loading =============================================================

/// Parses a JSON array of notes.
///
/// A literal `null` is accepted as an empty list.
pub fn parse_notes(json: &str) -> Result<Vec<Note>, NoteLoadError> {
    let notes: Option<Vec<Note>> = serde_json::from_str(json)?;
    let notes = notes.unwrap_or_default();
    debug!(target: "cloud", "Parsed {} notes", notes.len());
    Ok(notes)
}

/// Reads and parses a note file.
pub fn load_notes(path: impl AsRef<Path>) -> Result<Vec<Note>, NoteLoadError> {
    let json = fs::read_to_string(path.as_ref())?;
    parse_notes(&json)
}

//=== Time Formatting =====================================================

/// Parses a note timestamp into local wall-clock time.
///
/// Accepts RFC 3339, offset-less date-times (taken as local) and bare
/// dates (taken as UTC midnight).
pub fn parse_local_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).naive_local());
    }

    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive);
        }
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let midnight = Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?);
    Some(midnight.with_timezone(&Local).naive_local())
}

/// Formats wall-clock time, omitting the year when it is `current_year`.
pub fn format_wall_time(time: &NaiveDateTime, current_year: i32) -> String {
    if time.year() == current_year {
        format!(
            "{}月{}日 {:02}:{:02}",
            time.month(),
            time.day(),
            time.hour(),
            time.minute()
        )
    } else {
        format!(
            "{}年{}月{}日 {:02}:{:02}",
            time.year(),
            time.month(),
            time.day(),
            time.hour(),
            time.minute()
        )
    }
}

/// Formats a raw note timestamp relative to `now`.
///
/// Unparseable timestamps are shown verbatim.
pub fn format_time(raw: &str, now: &DateTime<Local>) -> String {
    match parse_local_time(raw) {
        Some(time) => format_wall_time(&time, now.year()),
        None => raw.to_string(),
    }
}

//=== NoteDetail ==========================================================

/// Content of the focus overlay for one note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDetail {
    pub index: usize,
    /// Escaped content with bold spans rendered.
    pub content_html: String,
    pub time_label: String,
}

impl NoteDetail {
    pub fn new(index: usize, note: &Note, now: &DateTime<Local>) -> Self {
        Self {
            index,
            content_html: render_content(&note.content),
            time_label: format_time(&note.time, now),
        }
    }
}

//=== StickyStyle =========================================================

const STICKY_PALETTE: [&str; 5] = ["#fff9b1", "#ffd6e0", "#d4f0ff", "#d9f7be", "#ffe7ba"];

/// Paper color and tilt of a sticky note, a pure function of its index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StickyStyle {
    pub color: &'static str,
    /// Tilt in degrees, within `[-3, 3]`.
    pub tilt_deg: f64,
}

impl StickyStyle {
    pub fn for_index(index: usize) -> Self {
        let seed = ((index as f64 + 1.0) * 12.9898).sin() * 43_758.545_3;
        let unit = seed - seed.floor();
        Self {
            color: STICKY_PALETTE[index % STICKY_PALETTE.len()],
            tilt_deg: unit * 6.0 - 3.0,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn wall(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    //=====================================================================
    // Loading Tests
    //=====================================================================

    #[test]
    fn parses_note_array_in_order() {
        let notes = parse_notes(
            r#"[{"content":"first","time":"2024-03-01T08:00:00Z"},
                {"content":"second","time":"2024-03-02T09:30:00Z"}]"#,
        )
        .unwrap();

        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].content, "first");
        assert_eq!(notes[1].time, "2024-03-02T09:30:00Z");
    }

    #[test]
    fn null_payload_is_empty() {
        assert!(parse_notes("null").unwrap().is_empty());
        assert!(parse_notes("[]").unwrap().is_empty());
    }

    #[test]
    fn malformed_payload_is_parse_error() {
        let err = parse_notes(r#"{"content":"x"}"#).unwrap_err();
        assert!(matches!(err, NoteLoadError::Parse(_)));
        assert!(err.to_string().starts_with("Malformed note list"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_notes("/definitely/not/here/data.json").unwrap_err();
        assert!(matches!(err, NoteLoadError::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    //=====================================================================
    // Time Formatting Tests
    //=====================================================================

    #[test]
    fn current_year_omits_year() {
        assert_eq!(format_wall_time(&wall(2024, 3, 5, 7, 4), 2024), "3月5日 07:04");
    }

    #[test]
    fn other_year_includes_year() {
        assert_eq!(
            format_wall_time(&wall(2022, 12, 31, 23, 59), 2024),
            "2022年12月31日 23:59"
        );
    }

    #[test]
    fn offsetless_time_is_local_wall_clock() {
        assert_eq!(
            parse_local_time("2024-06-01T14:20:00"),
            Some(wall(2024, 6, 1, 14, 20))
        );
        assert_eq!(
            parse_local_time("2024-06-01T14:20:00.250"),
            Some(wall(2024, 6, 1, 14, 20).with_nanosecond(250_000_000).unwrap())
        );
    }

    #[test]
    fn rfc3339_round_trips_through_local() {
        let raw = "2024-06-01T14:20:00+00:00";
        let expected = DateTime::parse_from_rfc3339(raw)
            .unwrap()
            .with_timezone(&Local)
            .naive_local();
        assert_eq!(parse_local_time(raw), Some(expected));
    }

    #[test]
    fn garbage_time_is_shown_verbatim() {
        assert_eq!(format_time("yesterday-ish", &Local::now()), "yesterday-ish");
    }

    #[test]
    fn detail_renders_content_and_time() {
        let note = Note::new("a **b** <c>", "2020-01-02T03:04:00");
        let detail = NoteDetail::new(1, &note, &Local::now());

        assert_eq!(detail.index, 1);
        assert_eq!(detail.content_html, "a <strong>b</strong> &lt;c&gt;");
        assert_eq!(detail.time_label, "2020年1月2日 03:04");
    }

    //=====================================================================
    // Sticky Style Tests
    //=====================================================================

    #[test]
    fn sticky_style_is_pure_in_index() {
        for i in 0..50 {
            assert_eq!(StickyStyle::for_index(i), StickyStyle::for_index(i));
        }
    }

    #[test]
    fn sticky_tilt_is_bounded() {
        for i in 0..500 {
            let tilt = StickyStyle::for_index(i).tilt_deg;
            assert!((-3.0..=3.0).contains(&tilt), "index {} tilt {}", i, tilt);
        }
    }

    #[test]
    fn sticky_color_cycles_palette() {
        assert_eq!(StickyStyle::for_index(0).color, StickyStyle::for_index(5).color);
        assert_ne!(StickyStyle::for_index(0).color, StickyStyle::for_index(1).color);
    }
}
