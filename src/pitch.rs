//! Pitch and timing conversions.
//!
//! Pitches use scientific pitch notation where middle C is `C4` = MIDI 60.
//! Accidentals are a single `#` or `b` directly after the letter.

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Convert a name such as `"C4"`, `"F#3"` or `"Bb-1"` to a MIDI note number.
///
/// Returns `None` for malformed names and for pitches outside `0..=127`.
///
/// # Example
/// ```
/// use jmon::pitch::note_name_to_midi;
///
/// assert_eq!(note_name_to_midi("C4"), Some(60));
/// assert_eq!(note_name_to_midi("A4"), Some(69));
/// assert_eq!(note_name_to_midi("H2"), None);
/// ```
pub fn note_name_to_midi(name: &str) -> Option<u8> {
    let mut chars = name.chars();
    let semitone: i32 = match chars.next()? {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };

    let rest = chars.as_str();
    let (alter, octave_str) = if let Some(r) = rest.strip_prefix('#') {
        (1, r)
    } else if let Some(r) = rest.strip_prefix('b') {
        (-1, r)
    } else {
        (0, rest)
    };

    let digits = octave_str.strip_prefix('-').unwrap_or(octave_str);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let octave: i8 = octave_str.parse().ok()?;

    let midi = (octave as i32 + 1) * 12 + semitone + alter;
    u8::try_from(midi).ok().filter(|m| *m <= 127)
}

/// Convert a MIDI note number to a name, spelling accidentals as sharps.
///
/// # Example
/// ```
/// use jmon::pitch::midi_to_note_name;
///
/// assert_eq!(midi_to_note_name(61).as_deref(), Some("C#4"));
/// assert_eq!(midi_to_note_name(128), None);
/// ```
pub fn midi_to_note_name(midi: u8) -> Option<String> {
    if midi > 127 {
        return None;
    }
    let octave = (midi / 12) as i32 - 1;
    Some(format!("{}{}", NOTE_NAMES[(midi % 12) as usize], octave))
}

/// Beats to seconds at `bpm`. A non-positive tempo yields 0.
pub fn beats_to_seconds(beats: f64, bpm: f64) -> f64 {
    if bpm > 0.0 {
        beats * 60.0 / bpm
    } else {
        0.0
    }
}

/// Seconds to beats at `bpm`. A non-positive tempo yields 0.
pub fn seconds_to_beats(seconds: f64, bpm: f64) -> f64 {
    if bpm > 0.0 {
        seconds * bpm / 60.0
    } else {
        0.0
    }
}
