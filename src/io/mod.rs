use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::Rng;
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::geo::LatLon;

/// One scheduled flight: a great-circle segment in space and time.
/// Times are simulation minutes, positions decimal degrees. Loaded once,
/// never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub start_lat: f64,
    pub start_lon: f64,
    pub start_time: f64,
    pub end_lat: f64,
    pub end_lon: f64,
    pub end_time: f64,
}

impl Flight {
    pub fn start(&self) -> LatLon {
        LatLon::new(self.start_lat, self.start_lon)
    }

    pub fn end(&self) -> LatLon {
        LatLon::new(self.end_lat, self.end_lon)
    }

    /// Inclusive on both bounds.
    pub fn airborne_at(&self, time: f64) -> bool {
        time >= self.start_time && time <= self.end_time
    }

    /// Fraction of the route flown at `time`. Callers must ensure the flight
    /// is airborne at `time`; a zero-duration flight pins to its start.
    pub fn time_fraction(&self, time: f64) -> f64 {
        let duration = self.end_time - self.start_time;
        if duration == 0.0 {
            return 0.0;
        }
        (time - self.start_time) / duration
    }
}

/// Flights loaded from a dataset plus the effective simulation window,
/// shrunk when the data runs out before the requested end.
#[derive(Debug, Clone)]
pub struct FlightLoad {
    pub flights: Vec<Flight>,
    pub start_time: f64,
    pub end_time: f64,
}

/// Loads flight records from a headered CSV with columns
/// `start_lat, start_lon, start_time, end_lat, end_lon, end_time`.
///
/// Records are assumed sorted by departure time; reading stops at the first
/// record departing after `end_time`. Records already landed before
/// `start_time` are skipped.
pub fn load_flights_csv(path: &Path, start_time: f64, end_time: f64) -> Result<FlightLoad> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open flight data {}", path.display()))?;

    let mut flights = Vec::new();
    let mut latest_end: f64 = 0.0;
    for record in reader.deserialize() {
        let flight: Flight = record.context("malformed flight record")?;
        if flight.start_time > end_time {
            break;
        }
        if flight.end_time >= start_time {
            if flight.end_time > latest_end {
                latest_end = flight.end_time;
            }
            flights.push(flight);
        }
    }

    let effective_end = if latest_end < end_time {
        latest_end.round() + 1.0
    } else {
        end_time
    };
    info!(
        count = flights.len(),
        effective_end, "loaded flights from dataset"
    );

    Ok(FlightLoad {
        flights,
        start_time,
        end_time: effective_end,
    })
}

/// Simulates aircraft dropping out of the mesh: each flight is independently
/// discarded with probability `threshold` (0 keeps everything, 1 keeps
/// nothing). Applied once at load time.
pub fn drop_out_flights<R: Rng>(flights: &[Flight], threshold: f64, rng: &mut R) -> Vec<Flight> {
    flights
        .iter()
        .copied()
        .filter(|_| rng.random::<f64>() >= threshold)
        .collect()
}

/// Simulation run configuration, read from a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    pub flights_csv: PathBuf,
    /// Directory of pre-masked PNG frames named `<minute>.png`, for the
    /// coverage trials. Optional; only that command needs it.
    #[serde(default)]
    pub frames_dir: Option<PathBuf>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub start_time: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub end_time: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub drop_out_threshold: f64,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_seed() -> u64 {
    0
}

/// Accepts numbers or numeric strings; anything unparseable falls back to
/// zero so `sanitize` still gets a value to clamp instead of the load
/// aborting on one bad field.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let parsed = match &value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.parse().ok(),
        _ => None,
    };
    Ok(parsed.unwrap_or_else(|| {
        warn!(%value, "non-numeric config value, defaulting to 0");
        0.0
    }))
}

impl SimConfig {
    /// Clamps out-of-range values to safe defaults. Non-numeric fields are
    /// already rejected by serde; this handles numeric nonsense only.
    pub fn sanitize(&mut self) {
        if !self.start_time.is_finite() || self.start_time < 0.0 {
            self.start_time = 0.0;
        }
        if !self.end_time.is_finite() || self.end_time < self.start_time {
            self.end_time = self.start_time;
        }
        self.drop_out_threshold = self.drop_out_threshold.clamp(0.0, 1.0);
    }
}

pub fn load_config(path: &Path) -> Result<SimConfig> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open config {}", path.display()))?;
    let reader = std::io::BufReader::new(file);
    let mut config: SimConfig = serde_json::from_reader(reader).context("malformed config")?;
    config.sanitize();
    Ok(config)
}
