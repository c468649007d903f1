use std::path::Path;

use anyhow::{Context, Result, bail};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use flight_network::coverage::PngFrameSource;
use flight_network::geo::{COMMS_RADIUS_M, GROUND_COMMS_RADIUS_M, LatLon, US_CENTER_LAT, US_CENTER_LON};
use flight_network::io::{self, Flight, SimConfig};
use flight_network::network;
use flight_network::sim::Snapshot;
use flight_network::trials::{self, TrialSetup};

const USAGE: &str = "usage: flight_network <config.json> <report [minute [src_lat src_lon dst_lat dst_lon]] | percentage | coverage>";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [config_path, command, rest @ ..] = args.as_slice() else {
        bail!(USAGE);
    };

    let config = io::load_config(Path::new(config_path))?;
    let load = io::load_flights_csv(
        &config.flights_csv,
        config.start_time,
        config.end_time,
    )?;
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let flights = io::drop_out_flights(&load.flights, config.drop_out_threshold, &mut rng);
    info!(
        loaded = load.flights.len(),
        retained = flights.len(),
        start = load.start_time,
        end = load.end_time,
        "flight catalog ready"
    );

    match command.as_str() {
        "report" => report(&config, &flights, load.start_time, load.end_time, rest),
        "percentage" => {
            let setup = TrialSetup::new(load.start_time as i64, load.end_time as i64);
            let average = trials::percentage_trials(&flights, &setup, config.seed);
            println!("{average}");
            Ok(())
        }
        "coverage" => {
            let frames_dir = config
                .frames_dir
                .clone()
                .context("config is missing frames_dir, required for coverage trials")?;
            let mut frames = PngFrameSource::new(frames_dir);
            let average =
                trials::coverage_trials(&mut frames, load.start_time as i64, load.end_time as i64);
            match average {
                Some(average) => println!("{average}"),
                None => println!("undefined"),
            }
            Ok(())
        }
        other => bail!("unknown command {other:?}\n{USAGE}"),
    }
}

fn report(
    config: &SimConfig,
    flights: &[Flight],
    start_time: f64,
    end_time: f64,
    rest: &[String],
) -> Result<()> {
    let minute = match rest.first() {
        Some(raw) => raw
            .parse::<f64>()
            .with_context(|| format!("invalid time {raw:?}"))?
            .clamp(start_time, end_time),
        None => start_time,
    };

    // Endpoint pins default to the US centre, like an untouched selection.
    let (source, dest) = match rest.get(1..5) {
        Some([a, b, c, d]) => (
            LatLon::new(a.parse()?, b.parse()?),
            LatLon::new(c.parse()?, d.parse()?),
        ),
        _ => (
            LatLon::new(US_CENTER_LAT, US_CENTER_LON),
            LatLon::new(US_CENTER_LAT, US_CENTER_LON),
        ),
    };

    let snapshot = Snapshot::at(flights, minute, COMMS_RADIUS_M);
    let start_node = snapshot.nearest_node(source, GROUND_COMMS_RADIUS_M);
    let end_node = snapshot.nearest_node(dest, GROUND_COMMS_RADIUS_M);
    let report = network::analyze_snapshot(&snapshot, start_node, end_node);
    info!(seed = config.seed, minute, "report generated");
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
