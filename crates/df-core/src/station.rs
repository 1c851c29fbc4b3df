//! Fixed stations that deplete a drone's traffic memory when overflown.

use crate::GeoPoint;

/// A named point of interest, immutable and shared read-only across the
/// whole fleet (typically as `Arc<[Station]>`).
#[derive(Clone, Debug, PartialEq)]
pub struct Station {
    pub name:     String,
    pub position: GeoPoint,
}

impl Station {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self { name: name.into(), position: GeoPoint::new(lat, lon) }
    }
}
