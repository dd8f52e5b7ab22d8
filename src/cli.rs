use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::sample::SampleKind;

#[derive(Parser, Debug)]
#[command(name = "jmon", about = "Inspect, validate and generate JMON music projects")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a summary of a project (name, tempo, tracks, duration).
    Info {
        /// Path to the JMON file.
        file: PathBuf,

        /// Print the summary as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Check a project and list every error and warning. Exits with 1 if invalid.
    Validate {
        /// Path to the JMON file.
        file: PathBuf,
    },

    /// Write a sample project to a file, or to stdout.
    Sample {
        /// Which sample to generate.
        #[arg(value_enum, default_value = "full")]
        kind: SampleKind,

        /// Output path. Prints to stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Rewrite a project with canonical 2-space indentation.
    Format {
        /// Path to the JMON file.
        file: PathBuf,

        /// Output path. Rewrites the input file when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sample_defaults() {
        let args = Args::try_parse_from(["jmon", "sample"]).unwrap();
        match args.command {
            Command::Sample { kind, output } => {
                assert_eq!(kind, SampleKind::Full);
                assert!(output.is_none());
            }
            other => panic!("Unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_sample_minimal_with_output() {
        let args = Args::try_parse_from(["jmon", "sample", "minimal", "-o", "new.jmon"]).unwrap();
        match args.command {
            Command::Sample { kind, output } => {
                assert_eq!(kind, SampleKind::Minimal);
                assert_eq!(output, Some(PathBuf::from("new.jmon")));
            }
            other => panic!("Unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_info_json() {
        let args = Args::try_parse_from(["jmon", "info", "song.jmon", "--json"]).unwrap();
        assert!(matches!(args.command, Command::Info { json: true, .. }));
    }

    #[test]
    fn test_unknown_sample_kind_is_rejected() {
        assert!(Args::try_parse_from(["jmon", "sample", "huge"]).is_err());
    }
}
