use anyhow::{Context, Result};
use clap::Parser;
use gearshift::config::{Settings, DEFAULT_CONFIG_PATH};
use gearshift::engine::{seeded_rng, ShiftEngine};
use gearshift::logging::{open_diagnostic_log, DEFAULT_DEBUG_LOG_PATH, DEFAULT_LOG_FILTER};
use gearshift::recorder::{CsvEventLog, EventRecorder, DEFAULT_EVENTS_PATH};
use gearshift::session::Session;
use gearshift::shell::{car_detail, Shell};
use std::io;
use std::path::PathBuf;
use tracing::{dispatcher, info, Dispatch};

/// Car every session starts with.
const STARTER_CAR: (&str, &str) = ("toyota", "1234yes");

/// Simulate gear changes of a fleet of cars from a text menu.
#[derive(Parser, Debug)]
#[command(name = "gearshift", version, about)]
struct Args {
    /// YAML file with the `gears` section
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// CSV file shift events are appended to
    #[arg(long, default_value = DEFAULT_EVENTS_PATH)]
    events: PathBuf,

    /// Diagnostic log file
    #[arg(long, default_value = DEFAULT_DEBUG_LOG_PATH)]
    debug_log: PathBuf,

    /// Seed for reproducible speeds
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let logger = open_diagnostic_log(&args.debug_log, DEFAULT_LOG_FILTER)
        .with_context(|| format!("opening diagnostic log {}", args.debug_log.display()))?;

    dispatcher::with_default(&logger, || run(&args, logger.clone()))
}

fn run(args: &Args, logger: Dispatch) -> Result<()> {
    let table = Settings::load(&args.config)?.gear_table()?;
    info!(gears = table.len(), "Gear table loaded");

    let events = CsvEventLog::open(&args.events)?;
    info!(path = %events.path().display(), "Event log opened");
    let recorder = EventRecorder::new(events, logger);
    let engine = ShiftEngine::new(seeded_rng(args.seed));
    let mut session = Session::new(table, engine, recorder);

    let (car_type, vin) = STARTER_CAR;
    let starter = session.create_car(car_type, vin)?;
    print!("{}", car_detail(starter, None));

    let stdin = io::stdin();
    let mut shell = Shell::new(stdin.lock(), io::stdout(), session);
    shell.run()?;

    info!("Session ended");
    Ok(())
}
