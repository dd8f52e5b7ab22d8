//! # Document Validation
//!
//! Checks the structure of a JMON document and reports every problem found
//! instead of stopping at the first one.
//!
//! ## Rules (errors, in order)
//! 1. `format` is present and equals `"jmonTone"`
//! 2. `tracks`, if present, is a list
//! 3. every track's `notes`, if present, is a list
//! 4. every note with a numeric `time` and a numeric `duration` has a
//!    non-negative time and a positive duration
//!
//! ## Warnings
//! Warnings never affect `valid`. They flag values a front-end will likely
//! misinterpret or skip: a non-positive tempo, a track or note entry that is
//! not an object, a `synth` that is not an object, velocity outside `0..=1`,
//! a pitch name that is not scientific pitch notation.
//!
//! ## Example
//! ```rust
//! use jmon::{sample, validate, SampleKind};
//!
//! let result = validate(&sample(SampleKind::Minimal));
//! assert!(result.valid);
//! assert!(result.errors.is_empty());
//! ```

use serde::Serialize;

use crate::document::{JmonDocument, Lenient, Note, Pitch, Track, FORMAT_TAG};
use crate::pitch::note_name_to_midi;

/// Outcome of [`validate`]. `valid` is true iff `errors` is empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Validate a document. Never fails; problems are returned as data.
pub fn validate(doc: &JmonDocument) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    validate_format(doc, &mut errors);
    validate_track_list(doc, &mut errors);
    validate_note_lists(doc, &mut errors);
    validate_note_timing(doc, &mut errors);

    check_tempo(doc, &mut warnings);
    check_entry_shapes(doc, &mut warnings);
    check_tracks(doc, &mut warnings);

    ValidationResult {
        valid: errors.is_empty(),
        errors,
        warnings,
    }
}

fn validate_format(doc: &JmonDocument, errors: &mut Vec<String>) {
    if doc.format() != Some(FORMAT_TAG) {
        errors.push("missing or invalid format".to_string());
    }
}

fn validate_track_list(doc: &JmonDocument, errors: &mut Vec<String>) {
    if let Some(Lenient::Raw(_)) = &doc.tracks {
        errors.push("tracks must be a list".to_string());
    }
}

fn validate_note_lists(doc: &JmonDocument, errors: &mut Vec<String>) {
    for (i, track) in indexed_tracks(doc) {
        if let Some(Lenient::Raw(_)) = &track.notes {
            errors.push(format!("{}: notes must be a list", track_label(i, track)));
        }
    }
}

fn validate_note_timing(doc: &JmonDocument, errors: &mut Vec<String>) {
    for (i, track) in indexed_tracks(doc) {
        for (j, note) in indexed_notes(track) {
            let time = note.time.as_ref().and_then(Lenient::typed);
            let duration = note.duration.as_ref().and_then(Lenient::typed);
            let (Some(time), Some(duration)) = (time, duration) else {
                continue;
            };
            if *time < 0.0 {
                errors.push(format!(
                    "{} note {}: time must be non-negative (got {})",
                    track_label(i, track),
                    j,
                    time
                ));
            }
            if *duration <= 0.0 {
                errors.push(format!(
                    "{} note {}: duration must be positive (got {})",
                    track_label(i, track),
                    j,
                    duration
                ));
            }
        }
    }
}

fn check_tempo(doc: &JmonDocument, warnings: &mut Vec<String>) {
    match &doc.tempo {
        Some(Lenient::Typed(tempo)) if *tempo <= 0.0 => {
            warnings.push(format!("tempo should be positive (got {})", tempo));
        }
        Some(Lenient::Raw(value)) => {
            warnings.push(format!("tempo should be a number (got {})", value));
        }
        _ => {}
    }
}

/// Entries that are not objects are skipped by every other pass.
fn check_entry_shapes(doc: &JmonDocument, warnings: &mut Vec<String>) {
    if let Some(Lenient::Typed(tracks)) = &doc.tracks {
        for (i, entry) in tracks.iter().enumerate() {
            if !entry.is_typed() {
                warnings.push(format!("track {} should be an object (ignored)", i));
            }
        }
    }
    for (i, track) in indexed_tracks(doc) {
        if let Some(Lenient::Typed(notes)) = &track.notes {
            for (j, entry) in notes.iter().enumerate() {
                if !entry.is_typed() {
                    warnings.push(format!(
                        "{} note {} should be an object (ignored)",
                        track_label(i, track),
                        j
                    ));
                }
            }
        }
    }
}

fn check_tracks(doc: &JmonDocument, warnings: &mut Vec<String>) {
    for (i, track) in indexed_tracks(doc) {
        if let Some(synth) = &track.synth {
            if !synth.is_object() {
                warnings.push(format!("{}: synth should be an object", track_label(i, track)));
            }
        }

        for (j, note) in indexed_notes(track) {
            if let Some(velocity) = note.velocity.as_ref().and_then(Lenient::typed) {
                if !(0.0..=1.0).contains(velocity) {
                    warnings.push(format!(
                        "{} note {}: velocity should be between 0 and 1 (got {})",
                        track_label(i, track),
                        j,
                        velocity
                    ));
                }
            }
            if let Some(Pitch::Name(name)) = note.pitch() {
                if note_name_to_midi(name).is_none() {
                    warnings.push(format!(
                        "{} note {}: unrecognized pitch {:?}",
                        track_label(i, track),
                        j,
                        name
                    ));
                }
            }
        }
    }
}

/// Well-formed tracks with their position in the `tracks` list.
fn indexed_tracks(doc: &JmonDocument) -> impl Iterator<Item = (usize, &Track)> {
    let entries: &[Lenient<Track>] = match &doc.tracks {
        Some(Lenient::Typed(tracks)) => tracks.as_slice(),
        _ => &[],
    };
    entries
        .iter()
        .enumerate()
        .filter_map(|(i, entry)| entry.typed().map(|track| (i, track)))
}

/// Well-formed notes with their position in the track's `notes` list.
fn indexed_notes(track: &Track) -> impl Iterator<Item = (usize, &Note)> {
    let entries: &[Lenient<Note>] = match &track.notes {
        Some(Lenient::Typed(notes)) => notes.as_slice(),
        _ => &[],
    };
    entries
        .iter()
        .enumerate()
        .filter_map(|(j, entry)| entry.typed().map(|note| (j, note)))
}

fn track_label(index: usize, track: &Track) -> String {
    match track.name() {
        Some(name) => format!("track {} ({:?})", index, name),
        None => format!("track {}", index),
    }
}
