//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_series_writer::CsvSeriesWriter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config::{ConfigValue, TravelerConfig};
use crate::domain::error::TravelerError;
use crate::domain::traveler::TimeTraveler;
use crate::ports::config_port::ConfigPort;
use crate::ports::series_sink::SeriesSink;

#[derive(Parser, Debug)]
#[command(name = "timetraveler", about = "Discrete calendar time series generator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a series and write it as CSV
    Generate {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        starts_at: Option<String>,
        #[arg(long)]
        steps: Option<i64>,
        #[arg(long)]
        time_units: Option<String>,
        #[arg(long)]
        time_scale: Option<i64>,
    },
    /// Validate a series configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Generate {
            config,
            output,
            starts_at,
            steps,
            time_units,
            time_scale,
        } => run_generate(
            &config,
            output.as_ref(),
            starts_at.as_deref(),
            steps,
            time_units.as_deref(),
            time_scale,
        ),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = TravelerError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Lift one INI value into the loosely-typed form the traveler validates:
/// integer text becomes Integer, float text Float, true/false Bool, anything
/// else Text, and an absent key Missing.
pub fn raw_value(config: &dyn ConfigPort, section: &str, key: &str) -> ConfigValue {
    let Some(text) = config.get_string(section, key) else {
        return ConfigValue::Missing;
    };
    let trimmed = text.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        ConfigValue::Integer(n)
    } else if let Ok(f) = trimmed.parse::<f64>() {
        ConfigValue::Float(f)
    } else {
        match trimmed {
            "true" => ConfigValue::Bool(true),
            "false" => ConfigValue::Bool(false),
            _ => ConfigValue::Text(text),
        }
    }
}

pub fn build_traveler_config(config: &dyn ConfigPort) -> TravelerConfig {
    TravelerConfig {
        starts_at: raw_value(config, "series", "starts_at"),
        steps: raw_value(config, "series", "steps"),
        time_units: config
            .get_string("series", "time_units")
            .unwrap_or_default(),
        time_scale: config.get_int("series", "time_scale"),
    }
}

/// Drive a traveler into a sink, counting recorded rows.
///
/// The first sink failure stops recording; it is returned once the run
/// completes, taking precedence over `finish`.
pub fn emit_series(
    traveler: &mut TimeTraveler,
    sink: &mut dyn SeriesSink,
) -> Result<u64, TravelerError> {
    let mut rows: u64 = 0;
    let mut sink_error: Option<TravelerError> = None;
    traveler.run(|step| {
        if sink_error.is_some() {
            return;
        }
        match sink.record(&step) {
            Ok(()) => rows += 1,
            Err(e) => sink_error = Some(e),
        }
    })?;
    if let Some(e) = sink_error {
        return Err(e);
    }
    sink.finish()?;
    Ok(rows)
}

fn run_generate(
    config_path: &PathBuf,
    output_path: Option<&PathBuf>,
    starts_at: Option<&str>,
    steps: Option<i64>,
    time_units: Option<&str>,
    time_scale: Option<i64>,
) -> ExitCode {
    // Stage 1: Load config
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    // Stage 2: Build series config, applying CLI overrides
    let mut config = build_traveler_config(&adapter);
    if let Some(s) = starts_at {
        config.starts_at = s.into();
    }
    if let Some(n) = steps {
        config.steps = n.into();
    }
    if let Some(u) = time_units {
        config.time_units = u.to_string();
    }
    if let Some(scale) = time_scale {
        config.time_scale = Some(scale);
    }

    // Stage 3: Validate before any output is produced
    let mut traveler = TimeTraveler::new(config);
    let reasons = traveler.validate();
    if !reasons.is_empty() {
        let err = TravelerError::InvalidTraveler { reasons };
        eprintln!("error: {err}");
        return (&err).into();
    }

    eprintln!(
        "Generating series: {} {} per step",
        traveler.time_scale(),
        traveler.time_units(),
    );

    // Stage 4: Stream the series as CSV
    let result = match output_path {
        Some(path) => {
            let file = match File::create(path) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("error: failed to create {}: {}", path.display(), e);
                    return ExitCode::from(1);
                }
            };
            let mut sink = CsvSeriesWriter::new(file);
            emit_series(&mut traveler, &mut sink)
        }
        None => {
            let stdout = io::stdout();
            let mut sink = CsvSeriesWriter::new(stdout.lock());
            emit_series(&mut traveler, &mut sink)
        }
    };

    match result {
        Ok(rows) => {
            match output_path {
                Some(path) => eprintln!("Wrote {} rows to {}", rows, path.display()),
                None => eprintln!("Wrote {} rows", rows),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating series config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let traveler = TimeTraveler::new(build_traveler_config(&adapter));
    let reasons = traveler.validate();
    if reasons.is_empty() {
        eprintln!("Series configuration is valid.");
        ExitCode::SUCCESS
    } else {
        for reason in &reasons {
            eprintln!("error: {reason}");
        }
        (&TravelerError::InvalidTraveler { reasons }).into()
    }
}
