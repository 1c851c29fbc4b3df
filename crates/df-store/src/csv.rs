//! CSV-backed route and station store.
//!
//! # File layout
//!
//! One directory holds everything, headerless:
//!
//! | File               | Row format                                  |
//! |--------------------|---------------------------------------------|
//! | `<drone id>.csv`   | `drone_id,lat,lon,"YYYY-MM-DD HH:MM:SS"`    |
//! | `tube-stations.csv`| `name,lat,lon`                              |
//!
//! ```csv
//! 5937,51.476105,-0.100224,"2011-03-22 07:47:55"
//! 5937,51.475967,-0.100368,"2011-03-22 07:47:56"
//! ```
//!
//! Timestamps carry no zone marker and are interpreted as UTC.
//!
//! # Leniency
//!
//! Recorder output is dirty in practice, so row-level problems are
//! skipped with a debug log rather than failing the whole file: fields
//! that do not parse, timestamps in the wrong shape, and the recorder's
//! `drone_id = 0` placeholder rows.  Structural CSV damage (unbalanced
//! quotes, ragged rows) still fails the load.

use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use csv::{ErrorKind, ReaderBuilder};
use serde::Deserialize;
use tracing::debug;

use df_core::{DroneId, Route, Station, Waypoint};

use crate::error::{StoreError, StoreResult};
use crate::provider::{RouteProvider, StationProvider};

/// Station list filename within a store directory.
pub const STATIONS_FILE: &str = "tube-stations.csv";

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ── CSV records ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RouteRecord {
    drone_id: u32,
    lat:      f64,
    lon:      f64,
    time:     String,
}

#[derive(Deserialize)]
struct StationRecord {
    name: String,
    lat:  f64,
    lon:  f64,
}

// ── CsvStore ────────────────────────────────────────────────────────────────

/// Route and station provider reading flat files from one directory.
pub struct CsvStore {
    dir: PathBuf,
}

impl CsvStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the route file for `drone`.
    pub fn route_path(&self, drone: DroneId) -> PathBuf {
        self.dir.join(format!("{drone}.csv"))
    }

    /// Path of the station list file.
    pub fn stations_path(&self) -> PathBuf {
        self.dir.join(STATIONS_FILE)
    }
}

impl RouteProvider for CsvStore {
    fn route(&self, drone: DroneId) -> StoreResult<Route> {
        let file = File::open(self.route_path(drone))?;
        route_from_reader(drone, file)
    }
}

impl StationProvider for CsvStore {
    fn stations(&self) -> StoreResult<Vec<Station>> {
        let file = File::open(self.stations_path())?;
        stations_from_reader(file)
    }
}

// ── Raw parsers ─────────────────────────────────────────────────────────────

/// Parse a route from any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or loading from
/// somewhere other than the flat-file layout.
pub fn route_from_reader<R: Read>(drone: DroneId, reader: R) -> StoreResult<Route> {
    let mut csv_reader = ReaderBuilder::new().has_headers(false).from_reader(reader);
    let mut waypoints = Vec::new();

    for result in csv_reader.deserialize::<RouteRecord>() {
        let record = match result {
            Ok(record) => record,
            Err(e) if matches!(e.kind(), ErrorKind::Deserialize { .. }) => {
                debug!(%drone, error = %e, "skipping unparseable route row");
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        if record.drone_id == 0 {
            debug!(%drone, "skipping placeholder route row");
            continue;
        }
        let time = match NaiveDateTime::parse_from_str(&record.time, TIME_FORMAT) {
            Ok(naive) => naive.and_utc(),
            Err(e) => {
                debug!(%drone, time = %record.time, error = %e, "skipping route row with bad timestamp");
                continue;
            }
        };
        waypoints.push(Waypoint::new(record.lat, record.lon, time));
    }

    Route::from_waypoints(waypoints).ok_or(StoreError::EmptyRoute(drone))
}

/// Parse a station list from any `Read` source.
///
/// An empty list is not an error; drones simply fly blind.
pub fn stations_from_reader<R: Read>(reader: R) -> StoreResult<Vec<Station>> {
    let mut csv_reader = ReaderBuilder::new().has_headers(false).from_reader(reader);
    let mut stations = Vec::new();

    for result in csv_reader.deserialize::<StationRecord>() {
        let record = match result {
            Ok(record) => record,
            Err(e) if matches!(e.kind(), ErrorKind::Deserialize { .. }) => {
                debug!(error = %e, "skipping unparseable station row");
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        stations.push(Station::new(record.name, record.lat, record.lon));
    }

    Ok(stations)
}
