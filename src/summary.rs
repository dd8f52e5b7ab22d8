//! # Derived Project Information
//!
//! Pure functions computing statistics from a [`JmonDocument`]. Neither
//! function can fail: missing or malformed fields fall back to the documented
//! defaults (`"Untitled"`, 120 BPM, 4/4, note time/duration 0).
//!
//! ## Example
//! ```rust
//! use jmon::{compute_duration, load_str, summarize};
//!
//! let doc = load_str(r#"{
//!     "format": "jmonTone",
//!     "tracks": [{"name": "T", "notes": [
//!         {"time": 0, "duration": 2},
//!         {"time": 1, "duration": 1}
//!     ]}]
//! }"#)?;
//!
//! assert_eq!(compute_duration(&doc), 2.0);
//!
//! let info = summarize(&doc);
//! assert_eq!(info.name, "Untitled");
//! assert_eq!(info.tempo, 120.0);
//! assert_eq!(info.track_count, 1);
//! # Ok::<(), jmon::JmonError>(())
//! ```

use serde::Serialize;

use crate::document::{JmonDocument, Lenient, TimeSignature, Track, DEFAULT_NAME, DEFAULT_TEMPO};
use crate::pitch::beats_to_seconds;

/// Summary of a project, with defaults applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    pub name: String,
    pub tempo: f64,
    pub time_signature: TimeSignature,
    pub track_count: usize,
    pub note_count: usize,
    /// Length in beats, equal to [`compute_duration`].
    pub total_duration: f64,
    /// `total_duration` at `tempo`.
    pub duration_seconds: f64,
}

/// Total length of the project in beats.
///
/// The maximum of `time + duration` over every note of every track, or 0 when
/// there are no notes. A missing or non-numeric `time` or `duration` counts as 0.
pub fn compute_duration(doc: &JmonDocument) -> f64 {
    doc.notes()
        .map(|note| note.end_beats())
        .fold(0.0, f64::max)
}

/// Summarize a document for display.
pub fn summarize(doc: &JmonDocument) -> ProjectInfo {
    let tempo = doc.tempo().unwrap_or(DEFAULT_TEMPO);
    let total_duration = compute_duration(doc);

    ProjectInfo {
        name: doc.name().unwrap_or(DEFAULT_NAME).to_string(),
        tempo,
        time_signature: doc.time_signature().unwrap_or_default(),
        track_count: track_count(doc),
        note_count: doc.tracks().map(note_count).sum(),
        total_duration,
        duration_seconds: beats_to_seconds(total_duration, tempo),
    }
}

/// Number of entries in `tracks`, including entries that are not objects.
fn track_count(doc: &JmonDocument) -> usize {
    match &doc.tracks {
        Some(Lenient::Typed(tracks)) => tracks.len(),
        _ => 0,
    }
}

fn note_count(track: &Track) -> usize {
    match &track.notes {
        Some(Lenient::Typed(notes)) => notes.len(),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Note;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> JmonDocument {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_duration_of_overlapping_notes() {
        let d = doc(json!({
            "format": "jmonTone",
            "tracks": [{"name": "T", "notes": [
                {"time": 0, "duration": 2},
                {"time": 1, "duration": 1}
            ]}]
        }));
        assert_eq!(compute_duration(&d), 2.0);
    }

    #[test]
    fn test_duration_across_tracks() {
        let d = JmonDocument::new("Two")
            .with_track(Track::new("A").with_notes([Note::new("C4", 0.0, 1.0)]))
            .with_track(Track::new("B").with_notes([Note::new("C3", 2.5, 0.75)]));
        assert_eq!(compute_duration(&d), 3.25);
    }

    #[test]
    fn test_duration_is_zero_without_notes() {
        assert_eq!(compute_duration(&JmonDocument::default()), 0.0);
        assert_eq!(compute_duration(&JmonDocument::new("Empty")), 0.0);
        assert_eq!(compute_duration(&doc(json!({"tracks": [{"name": "T"}]}))), 0.0);
        assert_eq!(compute_duration(&doc(json!({"tracks": "nope"}))), 0.0);
    }

    #[test]
    fn test_duration_missing_fields_count_as_zero() {
        let d = doc(json!({"tracks": [{"notes": [
            {"note": "C4"},
            {"time": 3},
            {"duration": 1.5},
            {"time": "1:0:0", "duration": "4n"}
        ]}]}));
        assert_eq!(compute_duration(&d), 3.0);
    }

    #[test]
    fn test_duration_never_negative() {
        let d = doc(json!({"tracks": [{"notes": [{"time": -4, "duration": 1}]}]}));
        assert_eq!(compute_duration(&d), 0.0);
    }

    #[test]
    fn test_summary_defaults() {
        let info = summarize(&JmonDocument::default());
        assert_eq!(info.name, "Untitled");
        assert_eq!(info.tempo, 120.0);
        assert_eq!(info.time_signature, TimeSignature(4, 4));
        assert_eq!(info.track_count, 0);
        assert_eq!(info.note_count, 0);
        assert_eq!(info.total_duration, 0.0);
        assert_eq!(info.duration_seconds, 0.0);
    }

    #[test]
    fn test_summary_of_populated_document() {
        let d = doc(json!({
            "name": "Demo",
            "tempo": 90,
            "timeSignature": "3/4",
            "tracks": [
                {"notes": [{"time": 0, "duration": 3}, {"time": 3, "duration": 3}]},
                {"notes": "not a list"},
                7
            ]
        }));
        let info = summarize(&d);
        assert_eq!(info.name, "Demo");
        assert_eq!(info.tempo, 90.0);
        assert_eq!(info.time_signature, TimeSignature(3, 4));
        assert_eq!(info.track_count, 3);
        assert_eq!(info.note_count, 2);
        assert_eq!(info.total_duration, 6.0);
        assert_eq!(info.duration_seconds, 4.0);
        assert_eq!(info.total_duration, compute_duration(&d));
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let value = serde_json::to_value(summarize(&JmonDocument::new("X"))).unwrap();
        assert_eq!(value["trackCount"], json!(0));
        assert_eq!(value["totalDuration"], json!(0.0));
        assert_eq!(value["timeSignature"], json!([4, 4]));
    }
}
