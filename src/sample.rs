//! Canned documents for demos and tests.

use clap::ValueEnum;
use serde_json::json;

use crate::document::{JmonDocument, Note, Track};

/// Which sample document to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SampleKind {
    /// Three tracks: a melodic run, a sustained bass line and a held pad chord.
    Full,
    /// Top-level fields only, with an empty track list.
    Minimal,
}

/// Build a sample document. The output is fixed for each kind.
///
/// # Example
/// ```
/// use jmon::{compute_duration, sample, SampleKind};
///
/// let doc = sample(SampleKind::Full);
/// assert_eq!(doc.tracks().count(), 3);
/// assert_eq!(compute_duration(&doc), 4.0);
/// ```
pub fn sample(kind: SampleKind) -> JmonDocument {
    match kind {
        SampleKind::Full => full(),
        SampleKind::Minimal => JmonDocument::new("New Project"),
    }
}

fn full() -> JmonDocument {
    let lead = Track::new("Lead Synth")
        .with_synth(json!({"type": "Synth"}))
        .with_notes([
            Note::new("C4", 0.0, 0.5).with_velocity(1.0),
            Note::new("E4", 0.5, 0.5).with_velocity(0.8),
            Note::new("G4", 1.0, 0.5).with_velocity(0.9),
            Note::new("C5", 1.5, 1.0).with_velocity(1.0),
            Note::new("B4", 2.5, 0.25).with_velocity(0.7),
            Note::new("A4", 2.75, 0.25).with_velocity(0.7),
            Note::new("G4", 3.0, 1.0).with_velocity(0.8),
        ]);

    let bass = Track::new("Bass")
        .with_synth(json!({"type": "FMSynth"}))
        .with_notes([
            Note::new("C2", 0.0, 2.0).with_velocity(0.8),
            Note::new("F2", 2.0, 2.0).with_velocity(0.8),
        ]);

    let pad = Track::new("Pad")
        .with_synth(json!({"type": "AMSynth"}))
        .with_notes([
            Note::new("C3", 0.0, 4.0).with_velocity(0.4),
            Note::new("E3", 0.0, 4.0).with_velocity(0.4),
            Note::new("G3", 0.0, 4.0).with_velocity(0.4),
        ]);

    JmonDocument::new("Sample Project")
        .with_track(lead)
        .with_track(bass)
        .with_track(pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::{compute_duration, summarize};

    #[test]
    fn test_full_sample_shape() {
        let doc = sample(SampleKind::Full);
        let names: Vec<&str> = doc.tracks().filter_map(Track::name).collect();
        assert_eq!(names, vec!["Lead Synth", "Bass", "Pad"]);
        assert_eq!(doc.notes().count(), 12);
        assert_eq!(compute_duration(&doc), 4.0);

        let pad = doc.tracks().nth(2).unwrap();
        assert_eq!(pad.synth, Some(json!({"type": "AMSynth"})));
        assert!(pad.notes().all(|n| n.start_beats() == 0.0 && n.duration_beats() == 4.0));
    }

    #[test]
    fn test_minimal_sample_shape() {
        let doc = sample(SampleKind::Minimal);
        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({
                "format": "jmonTone",
                "version": "1.0",
                "name": "New Project",
                "tempo": 120.0,
                "timeSignature": [4, 4],
                "tracks": []
            })
        );

        let info = summarize(&doc);
        assert_eq!(info.track_count, 0);
        assert_eq!(info.total_duration, 0.0);
    }

    #[test]
    fn test_samples_are_deterministic() {
        assert_eq!(sample(SampleKind::Full), sample(SampleKind::Full));
        assert_eq!(sample(SampleKind::Minimal), sample(SampleKind::Minimal));
    }
}
