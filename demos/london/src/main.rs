//! london: two recorded drones over the London tube map.
//!
//! Replays the bundled routes for drones 5937 and 6043 against the
//! bundled station list.  Waypoints are one second apart and legs block
//! for real travel time, so the default run takes about ten seconds
//! before the 08:10 cutoff lands both drones; pass `--no-cutoff` to fly
//! the routes to their ends.  Drone 5937 skirts enough stations to
//! exhaust its report memory mid-route, so a normal run also shows a
//! stall, a restart, and the resumed flight.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use df_agent::{DroneBuilder, DroneControl};
use df_core::Station;
use df_sim::{Dispatcher, Fleet};
use df_store::{CsvStore, StationProvider};

const DEFAULT_DRONES: [u32; 2] = [5937, 6043];


#[derive(Parser)]
#[command(about = "Replay recorded drone flights over the London tube map")]
struct Cli {
    /// Drones to fly.  Defaults to the two bundled recordings.
    drones: Vec<u32>,

    /// Fleet-wide cutoff: legs scheduled at or after this instant are
    /// not flown.
    #[arg(long, default_value = "2011-03-22T08:10:00Z")]
    cutoff: DateTime<Utc>,

    /// Ignore the cutoff and fly every route to its end.
    #[arg(long)]
    no_cutoff: bool,

    /// Directory holding `<id>.csv` routes and `tube-stations.csv`.
    #[arg(long, default_value = "demos/london/data")]
    data: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();
    run(cli)
}

/// The whole run, split from argument parsing and logging setup.
///
/// Always `Ok`: a failed flight is logged in the landing summary, it
/// does not fail the process.
fn run(cli: Cli) -> Result<()> {
    let store = CsvStore::new(&cli.data);
    let stations = load_stations(&store);

    let dispatcher = if cli.no_cutoff {
        Dispatcher::new(store)
    } else {
        Dispatcher::new(store).cutoff(cli.cutoff)
    };

    let drones = if cli.drones.is_empty() { DEFAULT_DRONES.to_vec() } else { cli.drones };
    let mut fleet = Fleet::new(dispatcher);
    for id in &drones {
        fleet.add(DroneBuilder::new(*id).stations(stations.clone()).build());
    }

    info!(count = drones.len(), "fleet lifting off");
    let reports = fleet.run();

    for report in &reports {
        info!(drone = %report.drone.id(), outcome = ?report.outcome, "flight ended");
    }
    let failures = reports.iter().filter(|r| r.outcome.is_failure()).count();
    if failures > 0 {
        warn!(failures, flights = reports.len(), "fleet landed with failed flights");
    } else {
        info!(flights = reports.len(), "fleet landed");
    }
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Load the station list, falling back to an empty sky: a missing or
/// damaged station file downgrades the run, it does not abort it.
fn load_stations(store: &CsvStore) -> Arc<[Station]> {
    match store.stations() {
        Ok(stations) => {
            info!(count = stations.len(), "loaded station list");
            stations.into()
        }
        Err(e) => {
            warn!(error = %e, "could not load stations, drones fly blind");
            Vec::new().into()
        }
    }
}
