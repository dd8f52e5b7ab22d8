//! # JMON Document Types
//!
//! This module defines the data model of a JMON project file.
//!
//! ## Type Hierarchy
//! ```text
//! JmonDocument
//!   ├── format: "jmonTone"
//!   ├── version, name, tempo
//!   ├── timeSignature: [beatsPerBar, beatUnit]
//!   ├── extra: any other top-level keys (kept verbatim)
//!   └── tracks: Vec<Track>
//!         ├── name
//!         ├── synth: opaque JSON (passed through)
//!         └── notes: Vec<Note>
//!               ├── note: Pitch ("C4" | 60)
//!               ├── time, duration (beats)
//!               └── velocity (0..1)
//! ```
//!
//! ## Lenient Fields
//! JMON files are written by many tools and are frequently incomplete or
//! loosely typed. Every field is an `Option<Lenient<T>>`:
//! - `None` - the key is absent (or `null`)
//! - `Some(Lenient::Typed(v))` - the value has the expected shape
//! - `Some(Lenient::Raw(json))` - the key is present with an unexpected shape
//!
//! Loading therefore never fails on a JSON object, saving writes back exactly
//! what was read, and `validate` can report on the raw values it finds.
//! Defaults (`"Untitled"`, 120 BPM, 4/4) are never stored; they are applied by
//! the accessors below and by `summarize`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::pitch::note_name_to_midi;

/// Value of the `format` key for documents this crate understands.
pub const FORMAT_TAG: &str = "jmonTone";

/// Format version written by [`JmonDocument::new`].
pub const FORMAT_VERSION: &str = "1.0";

pub const DEFAULT_NAME: &str = "Untitled";
pub const DEFAULT_TEMPO: f64 = 120.0;
pub const DEFAULT_VELOCITY: f64 = 1.0;

/// A field that either matched its expected type or is kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Lenient<T> {
    Typed(T),
    Raw(Value),
}

impl<T> Lenient<T> {
    /// The typed value, if the field had the expected shape.
    pub fn typed(&self) -> Option<&T> {
        match self {
            Lenient::Typed(v) => Some(v),
            Lenient::Raw(_) => None,
        }
    }

    pub fn typed_mut(&mut self) -> Option<&mut T> {
        match self {
            Lenient::Typed(v) => Some(v),
            Lenient::Raw(_) => None,
        }
    }

    pub fn is_typed(&self) -> bool {
        matches!(self, Lenient::Typed(_))
    }

    /// The raw JSON, if the field did not have the expected shape.
    pub fn raw(&self) -> Option<&Value> {
        match self {
            Lenient::Typed(_) => None,
            Lenient::Raw(v) => Some(v),
        }
    }
}

impl<T> From<T> for Lenient<T> {
    fn from(value: T) -> Self {
        Lenient::Typed(value)
    }
}

/// Read the typed value out of an optional lenient field.
fn typed<T>(field: &Option<Lenient<T>>) -> Option<&T> {
    field.as_ref().and_then(Lenient::typed)
}

/// Pitch of a note: scientific pitch notation or a numeric (MIDI) value.
///
/// Both forms are accepted and kept as written; nothing is normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Pitch {
    Name(String),
    Number(f64),
}

impl Pitch {
    /// MIDI note number for this pitch (C4 = 60), if it can be resolved.
    ///
    /// Numeric pitches must be integral and within `0..=127`.
    pub fn midi(&self) -> Option<u8> {
        match self {
            Pitch::Name(name) => note_name_to_midi(name),
            Pitch::Number(n) => {
                if n.fract() == 0.0 && (0.0..=127.0).contains(n) {
                    Some(*n as u8)
                } else {
                    None
                }
            }
        }
    }
}

impl From<&str> for Pitch {
    fn from(name: &str) -> Self {
        Pitch::Name(name.to_string())
    }
}

impl From<String> for Pitch {
    fn from(name: String) -> Self {
        Pitch::Name(name)
    }
}

impl From<u8> for Pitch {
    fn from(midi: u8) -> Self {
        Pitch::Number(midi as f64)
    }
}

impl From<f64> for Pitch {
    fn from(value: f64) -> Self {
        Pitch::Number(value)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pitch::Name(name) => write!(f, "{}", name),
            Pitch::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Time signature, serialized as `[beatsPerBar, beatUnit]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSignature(pub u32, pub u32);

impl TimeSignature {
    pub fn beats_per_bar(&self) -> u32 {
        self.0
    }

    pub fn beat_unit(&self) -> u32 {
        self.1
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        TimeSignature(4, 4)
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.beats_per_bar(), self.beat_unit())
    }
}

/// Parses the textual `"N/D"` form found in older JMON files.
impl FromStr for TimeSignature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('/').collect();
        if parts.len() != 2 {
            return Err(format!("Invalid time signature: {}", s));
        }

        let beats: u32 = parts[0]
            .trim()
            .parse()
            .map_err(|_| format!("Invalid time signature beats: {}", s))?;
        let unit: u32 = parts[1]
            .trim()
            .parse()
            .map_err(|_| format!("Invalid time signature beat unit: {}", s))?;

        if beats == 0 || unit == 0 {
            return Err(format!("Time signature must be positive: {}", s));
        }

        Ok(TimeSignature(beats, unit))
    }
}

/// A single sound event.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Note {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<Lenient<Pitch>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<Lenient<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Lenient<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocity: Option<Lenient<f64>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Note {
    pub fn new(pitch: impl Into<Pitch>, time: f64, duration: f64) -> Self {
        Note {
            note: Some(Lenient::Typed(pitch.into())),
            time: Some(Lenient::Typed(time)),
            duration: Some(Lenient::Typed(duration)),
            velocity: None,
            extra: Map::new(),
        }
    }

    pub fn with_velocity(mut self, velocity: f64) -> Self {
        self.velocity = Some(Lenient::Typed(velocity));
        self
    }

    pub fn pitch(&self) -> Option<&Pitch> {
        typed(&self.note)
    }

    /// Start offset in beats; missing or non-numeric counts as 0.
    pub fn start_beats(&self) -> f64 {
        typed(&self.time).copied().unwrap_or(0.0)
    }

    /// Length in beats; missing or non-numeric counts as 0.
    pub fn duration_beats(&self) -> f64 {
        typed(&self.duration).copied().unwrap_or(0.0)
    }

    pub fn end_beats(&self) -> f64 {
        self.start_beats() + self.duration_beats()
    }

    pub fn velocity_or_default(&self) -> f64 {
        typed(&self.velocity).copied().unwrap_or(DEFAULT_VELOCITY)
    }
}

/// A named sequence of notes sharing one synth configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Track {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Lenient<String>>,
    /// Sound generator configuration, passed through uninterpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synth: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Lenient<Vec<Lenient<Note>>>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Track {
    pub fn new(name: impl Into<String>) -> Self {
        Track {
            name: Some(Lenient::Typed(name.into())),
            synth: None,
            notes: Some(Lenient::Typed(Vec::new())),
            extra: Map::new(),
        }
    }

    pub fn with_synth(mut self, synth: Value) -> Self {
        self.synth = Some(synth);
        self
    }

    pub fn with_notes(mut self, notes: impl IntoIterator<Item = Note>) -> Self {
        for note in notes {
            self.push_note(note);
        }
        self
    }

    pub fn name(&self) -> Option<&str> {
        typed(&self.name).map(String::as_str)
    }

    /// Notes that have the expected object shape, in order.
    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.notes
            .iter()
            .filter_map(Lenient::typed)
            .flatten()
            .filter_map(Lenient::typed)
    }

    /// Append a note. A missing or malformed `notes` value is replaced by a new list.
    pub fn push_note(&mut self, note: Note) {
        if !matches!(self.notes, Some(Lenient::Typed(_))) {
            self.notes = Some(Lenient::Typed(Vec::new()));
        }
        if let Some(Lenient::Typed(notes)) = &mut self.notes {
            notes.push(Lenient::Typed(note));
        }
    }
}

/// Root of a JMON project file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JmonDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Lenient<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Lenient<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Lenient<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tempo: Option<Lenient<f64>>,
    #[serde(
        rename = "timeSignature",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub time_signature: Option<Lenient<TimeSignature>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracks: Option<Lenient<Vec<Lenient<Track>>>>,
    /// Top-level keys this crate does not model (`bpm`, `metadata`, `audioGraph`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JmonDocument {
    /// A new empty project with every top-level field populated.
    pub fn new(name: impl Into<String>) -> Self {
        JmonDocument {
            format: Some(Lenient::Typed(FORMAT_TAG.to_string())),
            version: Some(Lenient::Typed(FORMAT_VERSION.to_string())),
            name: Some(Lenient::Typed(name.into())),
            tempo: Some(Lenient::Typed(DEFAULT_TEMPO)),
            time_signature: Some(Lenient::Typed(TimeSignature::default())),
            tracks: Some(Lenient::Typed(Vec::new())),
            extra: Map::new(),
        }
    }

    pub fn with_tempo(mut self, tempo: f64) -> Self {
        self.set_tempo(tempo);
        self
    }

    pub fn with_track(mut self, track: Track) -> Self {
        self.push_track(track);
        self
    }

    pub fn format(&self) -> Option<&str> {
        typed(&self.format).map(String::as_str)
    }

    pub fn version(&self) -> Option<&str> {
        typed(&self.version).map(String::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        typed(&self.name).map(String::as_str)
    }

    pub fn tempo(&self) -> Option<f64> {
        typed(&self.tempo).copied()
    }

    /// Time signature as stored, accepting both `[4, 4]` and `"4/4"`.
    pub fn time_signature(&self) -> Option<TimeSignature> {
        match self.time_signature.as_ref()? {
            Lenient::Typed(ts) => Some(*ts),
            Lenient::Raw(Value::String(s)) => s.parse().ok(),
            Lenient::Raw(_) => None,
        }
    }

    /// Tracks that have the expected object shape, in document order.
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks
            .iter()
            .filter_map(Lenient::typed)
            .flatten()
            .filter_map(Lenient::typed)
    }

    pub fn tracks_mut(&mut self) -> impl Iterator<Item = &mut Track> {
        self.tracks
            .iter_mut()
            .filter_map(Lenient::typed_mut)
            .flatten()
            .filter_map(Lenient::typed_mut)
    }

    /// Every well-formed note of every well-formed track.
    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.tracks().flat_map(|track| track.notes())
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(Lenient::Typed(name.into()));
    }

    pub fn set_tempo(&mut self, tempo: f64) {
        self.tempo = Some(Lenient::Typed(tempo));
    }

    pub fn set_time_signature(&mut self, time_signature: TimeSignature) {
        self.time_signature = Some(Lenient::Typed(time_signature));
    }

    /// Append a track. A missing or malformed `tracks` value is replaced by a new list.
    pub fn push_track(&mut self, track: Track) {
        if !matches!(self.tracks, Some(Lenient::Typed(_))) {
            self.tracks = Some(Lenient::Typed(Vec::new()));
        }
        if let Some(Lenient::Typed(tracks)) = &mut self.tracks {
            tracks.push(Lenient::Typed(track));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn from_json(value: Value) -> JmonDocument {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_absent_fields_stay_absent() {
        let doc = from_json(json!({"format": "jmonTone"}));
        assert_eq!(doc.format(), Some("jmonTone"));
        assert!(doc.name.is_none());
        assert!(doc.tempo.is_none());
        assert!(doc.tracks.is_none());
        assert_eq!(serde_json::to_value(&doc).unwrap(), json!({"format": "jmonTone"}));
    }

    #[test]
    fn test_wrong_shapes_are_kept_raw() {
        let doc = from_json(json!({
            "format": 5,
            "tempo": "fast",
            "tracks": {"lead": {}}
        }));
        assert_eq!(doc.format(), None);
        assert_eq!(doc.format.as_ref().and_then(Lenient::raw), Some(&json!(5)));
        assert_eq!(doc.tempo(), None);
        assert!(doc.tracks.as_ref().is_some_and(|t| !t.is_typed()));
        assert_eq!(doc.tracks().count(), 0);
    }

    #[test]
    fn test_unknown_keys_survive_serialization() {
        let value = json!({
            "format": "jmonTone",
            "bpm": 90,
            "metadata": {"author": "JMON DAW"},
            "tracks": [{
                "name": "Piano",
                "color": "#ce9187",
                "notes": [{"note": "C4", "time": 0, "duration": 1, "pan": -0.5}]
            }]
        });
        let doc = from_json(value.clone());
        assert_eq!(doc.extra.get("bpm"), Some(&json!(90)));

        let track = doc.tracks().next().unwrap();
        assert_eq!(track.extra.get("color"), Some(&json!("#ce9187")));
        assert_eq!(track.notes().next().unwrap().extra.get("pan"), Some(&json!(-0.5)));

        let back = from_json(serde_json::to_value(&doc).unwrap());
        assert_eq!(back, doc);
    }

    #[test]
    fn test_pitch_accepts_string_and_number() {
        let doc = from_json(json!({
            "tracks": [{"notes": [{"note": "E4"}, {"note": 64}, {"note": true}]}]
        }));
        let notes: Vec<&Note> = doc.notes().collect();
        assert_eq!(notes[0].pitch(), Some(&Pitch::Name("E4".to_string())));
        assert_eq!(notes[1].pitch(), Some(&Pitch::Number(64.0)));
        assert_eq!(notes[2].pitch(), None);
        assert_eq!(notes[0].pitch().and_then(Pitch::midi), Some(64));
        assert_eq!(notes[1].pitch().and_then(Pitch::midi), Some(64));
    }

    #[test]
    fn test_note_defaults() {
        let note: Note = serde_json::from_value(json!({"note": "C4"})).unwrap();
        assert_eq!(note.start_beats(), 0.0);
        assert_eq!(note.duration_beats(), 0.0);
        assert_eq!(note.velocity_or_default(), 1.0);

        let note: Note = serde_json::from_value(json!({"time": "0:1:0", "duration": 2})).unwrap();
        assert_eq!(note.start_beats(), 0.0);
        assert_eq!(note.end_beats(), 2.0);
    }

    #[test]
    fn test_null_is_treated_as_absent() {
        let doc = from_json(json!({"name": null, "tracks": [{"notes": null}]}));
        assert!(doc.name.is_none());
        assert!(doc.tracks().next().unwrap().notes.is_none());
    }

    #[test]
    fn test_time_signature_forms() {
        let doc = from_json(json!({"timeSignature": [3, 4]}));
        assert_eq!(doc.time_signature(), Some(TimeSignature(3, 4)));

        let doc = from_json(json!({"timeSignature": "6/8"}));
        let six_eight = doc.time_signature().unwrap();
        assert_eq!(six_eight.beats_per_bar(), 6);
        assert_eq!(six_eight.beat_unit(), 8);

        let doc = from_json(json!({"timeSignature": "common"}));
        assert_eq!(doc.time_signature(), None);

        assert!("0/4".parse::<TimeSignature>().is_err());
        assert_eq!(TimeSignature(7, 8).to_string(), "7/8");
    }

    #[test]
    fn test_push_track_replaces_malformed_list() {
        let mut doc = from_json(json!({"tracks": 3}));
        doc.push_track(Track::new("Bass").with_notes([Note::new("C2", 0.0, 1.0)]));
        assert_eq!(doc.tracks().count(), 1);
        assert_eq!(doc.notes().count(), 1);
    }

    #[test]
    fn test_mutation_in_place() {
        let mut doc = JmonDocument::new("Demo");
        doc.set_tempo(140.0);
        doc.set_name("Renamed");
        doc.push_track(Track::new("Lead"));
        doc.tracks_mut().for_each(|t| t.push_note(Note::new("G4", 1.0, 0.5).with_velocity(0.5)));

        assert_eq!(doc.tempo(), Some(140.0));
        assert_eq!(doc.name(), Some("Renamed"));
        let notes: Vec<&Note> = doc.notes().collect();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].velocity_or_default(), 0.5);
    }
}
