//! Border Watch entrypoint: single prediction, live session over stdin, or CSV batch.
//! Artifacts are loaded once per process; the session aggregator lives as long as
//! the `session` loop.

use border_watch::{
    batch::{self, CsvTable},
    config::AppConfig,
    logging::StructuredLogger,
    sensors::{FormBounds, SensorReading},
    session::SessionAggregator,
    Artifacts, PredictionResult,
};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Parser)]
#[command(
    name = "border-watch",
    about = "Border intrusion detection over sensor readings",
    version,
    long_about = None
)]
struct Cli {
    /// Config file (defaults to $BORDER_WATCH_CONFIG, then config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one reading
    Predict {
        #[arg(long, default_value_t = 10)]
        sensor_id: i64,
        #[arg(long, default_value_t = 28.0)]
        latitude: f64,
        #[arg(long, default_value_t = 78.0)]
        longitude: f64,
        /// Motion detected
        #[arg(long)]
        motion: bool,
        #[arg(long, default_value_t = 60.0)]
        sound_level_db: f64,
        #[arg(long, default_value_t = 35.0)]
        thermal_level: f64,
        #[arg(long, default_value_t = 3.0)]
        vibration_level: f64,
        /// clear, fog, rain or night
        #[arg(long, default_value = "clear")]
        visibility: String,
        /// JSON output for machine parsing
        #[arg(long)]
        json: bool,
    },

    /// Live session: NDJSON readings or {"command": "reset"|"snapshot"} on stdin
    Session,

    /// Score a CSV file of readings
    Batch {
        /// Input CSV
        #[arg(long)]
        input: PathBuf,
        /// Augmented CSV output (stdout if omitted)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Write map points as GeoJSON
        #[arg(long)]
        geojson: Option<PathBuf>,
    },
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum SessionCommand {
    Reset,
    Snapshot,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SessionInput {
    Command { command: SessionCommand },
    Reading(SensorReading),
}

#[derive(Serialize)]
struct Counters {
    total_events: u64,
    intrusions: u64,
    normal: u64,
}

impl Counters {
    fn of(agg: &SessionAggregator) -> Self {
        let s = agg.state();
        Self {
            total_events: s.total_events,
            intrusions: s.intrusions,
            normal: s.normal,
        }
    }
}

fn verdict(result: &PredictionResult) -> String {
    if result.is_intrusion() {
        format!("Intrusion Detected (Confidence: {:.2})", result.confidence())
    } else {
        format!("No Intrusion Detected (Confidence: {:.2})", result.confidence())
    }
}

fn predict_one(
    artifacts: &Artifacts,
    bounds: Option<&FormBounds>,
    reading: &SensorReading,
) -> border_watch::Result<PredictionResult> {
    if let Some(b) = bounds {
        b.check(reading)?;
    }
    let result = artifacts.predict(reading)?;
    info!(
        sensor_id = reading.sensor_id,
        label = %result.label,
        probability = result.probability,
        "prediction"
    );
    Ok(result)
}

fn run_session(
    artifacts: &Artifacts,
    bounds: Option<&FormBounds>,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<(), BoxError> {
    let mut agg = SessionAggregator::new();

    for (n, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let parsed: SessionInput = match serde_json::from_str(&line) {
            Ok(p) => p,
            Err(e) => {
                warn!(line = n + 1, error = %e, "unparsable session input");
                let msg = serde_json::json!({ "event": "error", "line": n + 1, "message": e.to_string() });
                StructuredLogger::emit_json(&msg, &mut *out)?;
                continue;
            }
        };
        match parsed {
            SessionInput::Command {
                command: SessionCommand::Reset,
            } => {
                agg.reset();
                let msg = serde_json::json!({ "event": "reset", "counters": Counters::of(&agg) });
                StructuredLogger::emit_json(&msg, &mut *out)?;
            }
            SessionInput::Command {
                command: SessionCommand::Snapshot,
            } => {
                let msg = serde_json::json!({ "event": "snapshot", "state": agg.snapshot() });
                StructuredLogger::emit_json(&msg, &mut *out)?;
            }
            SessionInput::Reading(reading) => match predict_one(artifacts, bounds, &reading) {
                Ok(result) => {
                    let row = agg.record(&reading, &result).clone();
                    let msg = serde_json::json!({
                        "event": "prediction",
                        "message": verdict(&result),
                        "row": row,
                        "counters": Counters::of(&agg),
                    });
                    StructuredLogger::emit_json(&msg, &mut *out)?;
                }
                Err(e) => {
                    warn!(line = n + 1, error = %e, "prediction aborted");
                    let msg = serde_json::json!({ "event": "error", "line": n + 1, "message": e.to_string() });
                    StructuredLogger::emit_json(&msg, &mut *out)?;
                }
            },
        }
        out.flush()?;
    }

    let msg = serde_json::json!({ "event": "end", "counters": Counters::of(&agg) });
    StructuredLogger::emit_json(&msg, &mut *out)?;
    Ok(())
}

fn run_batch(
    artifacts: &Artifacts,
    input: &Path,
    output: Option<&Path>,
    geojson: Option<&Path>,
) -> border_watch::Result<()> {
    let file = std::fs::File::open(input)?;
    let table = CsvTable::read(BufReader::new(file))?;
    let summary = batch::summarize_table(artifacts, &table)?;

    // Render both outputs before touching any destination.
    let mut rendered = Vec::new();
    batch::augment(&table, &summary).write(&mut rendered)?;
    let map = match geojson {
        Some(_) => Some(serde_json::to_string_pretty(&summary.to_geojson())?),
        None => None,
    };

    if let (Some(path), Some(map)) = (geojson, &map) {
        std::fs::write(path, map)?;
    }
    let written = match output {
        Some(path) => std::fs::write(path, &rendered),
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(&rendered).and_then(|_| lock.flush())
        }
    };
    if let Err(e) = written {
        if let Some(path) = geojson {
            let _ = std::fs::remove_file(path);
        }
        return Err(e.into());
    }

    eprintln!(
        "Total Events: {}  Intrusions: {}  Normal: {}",
        summary.total, summary.intrusions, summary.normal
    );
    Ok(())
}

/// Line shown when a batch is abandoned.
fn batch_failure_message(e: &border_watch::Error) -> String {
    format!("Batch prediction failed: {}", e)
}

fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();
    let config_path = AppConfig::resolve_path(cli.config.as_deref());
    let config = AppConfig::load(&config_path);

    StructuredLogger::init(config.log.json, &config.log.level);
    info!(config = %config_path.display(), "border-watch starting");

    let artifacts = Artifacts::load(&config.artifacts, config.severity.clone())?;
    let bounds = FormBounds::default();
    let bounds = config.session.enforce_form_bounds.then_some(&bounds);

    match cli.command {
        Commands::Predict {
            sensor_id,
            latitude,
            longitude,
            motion,
            sound_level_db,
            thermal_level,
            vibration_level,
            visibility,
            json,
        } => {
            let reading = SensorReading {
                sensor_id,
                latitude,
                longitude,
                motion_detected: u8::from(motion),
                sound_level_db,
                thermal_level,
                vibration_level,
                visibility,
            };
            let result = predict_one(&artifacts, bounds, &reading)?;
            if json {
                let msg = serde_json::json!({
                    "reading": reading,
                    "label": result.label,
                    "probability": result.probability,
                    "confidence": result.confidence(),
                });
                StructuredLogger::emit_json(&msg, &mut std::io::stdout())?;
            } else {
                println!("{}", verdict(&result));
            }
        }
        Commands::Session => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            run_session(&artifacts, bounds, stdin.lock(), &mut stdout.lock())?;
        }
        Commands::Batch {
            input,
            output,
            geojson,
        } => {
            if let Err(e) = run_batch(&artifacts, &input, output.as_deref(), geojson.as_deref()) {
                error!(input = %input.display(), error = %e, "batch abandoned");
                eprintln!("{}", batch_failure_message(&e));
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
