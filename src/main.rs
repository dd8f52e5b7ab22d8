use anyhow::Result;
use clap::Parser;
use jmon::{load_file, sample, save, summarize, to_json_string, validate, Args, Command};
use log::{debug, info};
use std::process;

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Info { file, json } => {
            let doc = load_file(&file)?;
            let info = summarize(&doc);
            if json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Name:           {}", info.name);
                println!("Tempo:          {} BPM", info.tempo);
                println!("Time signature: {}", info.time_signature);
                println!("Tracks:         {}", info.track_count);
                println!("Notes:          {}", info.note_count);
                println!(
                    "Duration:       {} beats ({:.2} s)",
                    info.total_duration, info.duration_seconds
                );
            }
        }
        Command::Validate { file } => {
            let doc = load_file(&file)?;
            let result = validate(&doc);
            for warning in &result.warnings {
                eprintln!("warning: {}", warning);
            }
            for error in &result.errors {
                eprintln!("error: {}", error);
            }
            if !result.valid {
                eprintln!("{} is invalid ({} error(s))", file.display(), result.errors.len());
                process::exit(1);
            }
            println!("{} is valid", file.display());
        }
        Command::Sample { kind, output } => {
            let doc = sample(kind);
            debug!("Generated {:?} sample", kind);
            match output {
                Some(path) => {
                    save(&doc, &path)?;
                    info!("Wrote sample project to {}", path.display());
                }
                None => println!("{}", to_json_string(&doc)?),
            }
        }
        Command::Format { file, output } => {
            let doc = load_file(&file)?;
            let target = output.unwrap_or_else(|| file.clone());
            save(&doc, &target)?;
            info!("Formatted {} into {}", file.display(), target.display());
        }
    }

    Ok(())
}
