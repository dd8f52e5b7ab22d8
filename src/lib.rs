pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod io;
pub mod pitch;
pub mod sample;
pub mod summary;
pub mod validate;
pub mod widget;

pub use cli::{Args, Command};
pub use config::{Language, WidgetConfig};
pub use document::*;
pub use error::*;
pub use io::{load, load_file, load_str, load_value, save, to_json_string, JmonSource};
pub use pitch::{beats_to_seconds, midi_to_note_name, note_name_to_midi, seconds_to_beats};
pub use sample::{sample, SampleKind};
pub use summary::{compute_duration, summarize, ProjectInfo};
pub use validate::{validate, ValidationResult};
pub use widget::{DocumentHost, WidgetState};
