//! Route and station storage for the dronefleet simulator.
//!
//! The dispatcher pulls a drone's route through [`RouteProvider`] and the
//! wiring layer pulls the station list through [`StationProvider`].  The
//! stock backend is [`CsvStore`], reading the same flat files the fleet's
//! recorder produces; in-memory providers cover tests and embedding.
//!
//! | Module     | Contents                                         |
//! |------------|--------------------------------------------------|
//! | `provider` | Provider traits plus in-memory implementations   |
//! | `csv`      | [`CsvStore`] and the raw `*_from_reader` parsers |
//! | `error`    | [`StoreError`] / [`StoreResult`]                 |

pub mod csv;
pub mod error;
pub mod provider;


pub use csv::{route_from_reader, stations_from_reader, CsvStore, STATIONS_FILE};
pub use error::{StoreError, StoreResult};
pub use provider::{MemoryRoutes, MemoryStations, RouteProvider, StationProvider};
