use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use crate::coverage::{self, FrameSource};
use crate::geo::{COMMS_RADIUS_M, GROUND_COMMS_RADIUS_M, LatLon};
use crate::io::Flight;
use crate::path::{self, CostMode};
use crate::sim::Snapshot;

// Random-endpoint sampling region: the continental United States.
const REGION_MIN_LAT: f64 = 29.5;
const REGION_LAT_SPAN: f64 = 15.5;
const REGION_MIN_LON: f64 = -124.0;
const REGION_LON_SPAN: f64 = 49.0;

pub const DEFAULT_TRIALS: usize = 200;

#[derive(Debug, Clone, Copy)]
pub struct TrialSetup {
    pub start_time: i64,
    pub end_time: i64,
    pub comms_radius_m: f64,
    pub acceptance_radius_m: f64,
    pub trials: usize,
}

impl TrialSetup {
    pub fn new(start_time: i64, end_time: i64) -> Self {
        Self {
            start_time,
            end_time,
            comms_radius_m: COMMS_RADIUS_M,
            acceptance_radius_m: GROUND_COMMS_RADIUS_M,
            trials: DEFAULT_TRIALS,
        }
    }
}

fn random_point<R: Rng>(rng: &mut R) -> LatLon {
    LatLon::new(
        rng.random::<f64>() * REGION_LAT_SPAN + REGION_MIN_LAT,
        rng.random::<f64>() * REGION_LON_SPAN + REGION_MIN_LON,
    )
}

/// One percentage trial: draws a random ground endpoint pair, then walks
/// every instant of the window asking whether the mesh relays between the
/// nodes nearest each endpoint. Instants where either endpoint has no node
/// within the acceptance radius count as failures, not errors.
pub fn connection_percentage<R: Rng>(flights: &[Flight], setup: &TrialSetup, rng: &mut R) -> f64 {
    let source = random_point(rng);
    let dest = random_point(rng);
    let mut successes = 0u32;
    for minute in setup.start_time..=setup.end_time {
        let snapshot = Snapshot::at(flights, minute as f64, setup.comms_radius_m);
        let start = snapshot.nearest_node(source, setup.acceptance_radius_m);
        let end = snapshot.nearest_node(dest, setup.acceptance_radius_m);
        if let (Some(start), Some(end)) = (start, end) {
            let result = path::shortest_paths(&snapshot.graph, start, CostMode::Weighted);
            if result.is_reachable(end) {
                successes += 1;
            }
        }
    }
    let instants = (setup.end_time - setup.start_time + 1) as f64;
    successes as f64 / instants
}

/// Mean per-trial success ratio over `setup.trials` random endpoint pairs.
/// The incremental running average is a fold so each trial's intermediate
/// value can be reported without shared mutable counters.
pub fn percentage_trials(flights: &[Flight], setup: &TrialSetup, seed: u64) -> f64 {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let average = (0..setup.trials).fold(0.0, |avg, trial| {
        let value = connection_percentage(flights, setup, &mut rng);
        let next = (avg * trial as f64 + value) / (trial + 1) as f64;
        info!(trial, value, running_average = next, "percentage trial");
        next
    });
    info!(average, "percentage trials complete");
    average
}

/// Mean coverage ratio over `[start_time, end_time)`. A frame that fails to
/// load, or contains no ground pixels at all, is logged and skipped rather
/// than aborting the sweep. `None` when no instant contributed.
pub fn coverage_trials<F: FrameSource>(
    frames: &mut F,
    start_time: i64,
    end_time: i64,
) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0u32;
    for minute in start_time..end_time {
        let frame = match frames.capture(minute) {
            Ok(frame) => frame,
            Err(err) => {
                warn!(minute, error = %err, "skipping frame");
                continue;
            }
        };
        match coverage::area_coverage(&frame) {
            Some(ratio) => {
                sum += ratio;
                count += 1;
                info!(
                    minute,
                    ratio,
                    running_average = sum / count as f64,
                    "coverage trial"
                );
            }
            None => warn!(minute, "frame has no ground pixels, skipping"),
        }
    }
    (count > 0).then(|| sum / count as f64)
}
