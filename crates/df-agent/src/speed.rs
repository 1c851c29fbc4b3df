//! Ground-speed estimation between two position fixes.

use std::time::Duration;

use df_core::GeoPoint;

/// Average speed in km/h for a hop of `elapsed` between two fixes.
///
/// Two fixes can share a timestamp while sitting at distinct
/// coordinates; bill such a hop at one nanosecond rather than divide
/// by zero, which yields an absurd but finite speed.
pub fn speed_kph(from: GeoPoint, to: GeoPoint, elapsed: Duration) -> f64 {
    let elapsed = if elapsed.is_zero() { Duration::from_nanos(1) } else { elapsed };
    let hours = elapsed.as_secs_f64() / 3600.0;
    from.distance_km(to) / hours
}
