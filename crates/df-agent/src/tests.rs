//! Unit tests for df-agent.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use df_core::{CollectingSink, Station, TrafficLevel, VirtualClock, Waypoint};

use crate::{DroneBuilder, FixedClassifier};

fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2011, 3, 22, h, m, s).unwrap()
}

fn wp(lat: f64, lon: f64, h: u32, m: u32, s: u32) -> Waypoint {
    Waypoint::new(lat, lon, at(h, m, s))
}

/// Drone wired for deterministic tests: fixed traffic, virtual clock,
/// collecting sink.
fn test_drone(
    id: u32,
    stations: Vec<Station>,
    events: &Arc<CollectingSink>,
    clock: &Arc<VirtualClock>,
) -> crate::Drone {
    DroneBuilder::new(id)
        .stations(stations.into())
        .classifier(FixedClassifier(TrafficLevel::Moderate))
        .clock(clock.clone())
        .events(events.clone())
        .build()
}

#[cfg(test)]
mod state_machine {
    use df_core::{CollectingSink, DroneId, FlightEvent, StallCause, Station, VirtualClock};
    use std::sync::Arc;

    use super::{test_drone, wp};
    use crate::{Drone, DroneControl, MAX_TRAFFIC_REPORTS};

    #[test]
    fn fresh_drone_is_off_and_empty() {
        let drone = Drone::new(5937);
        assert_eq!(drone.id(), DroneId(5937));
        assert!(!drone.is_on());
        assert_eq!(drone.traffic_reports(), 0);
    }

    #[test]
    fn powered_off_drone_refuses_to_move() {
        let events = Arc::new(CollectingSink::new());
        let clock = Arc::new(VirtualClock::new());
        let mut drone = test_drone(1, vec![], &events, &clock);

        let a = wp(51.5074, -0.1278, 8, 0, 0);
        let b = wp(51.5080, -0.1278, 8, 0, 2);
        assert_eq!(drone.fly_to(a, b), a);

        // No sleeping, no sightings, just the stall.
        assert!(clock.sleeps().is_empty());
        assert_eq!(
            events.take(),
            vec![FlightEvent::Stalled { drone: DroneId(1), at: a, cause: StallCause::PoweredOff }]
        );
    }

    #[test]
    fn off_stall_preserves_report_memory() {
        let events = Arc::new(CollectingSink::new());
        let clock = Arc::new(VirtualClock::new());
        let stations = vec![Station::new("Temple", 51.5074, -0.1278)];
        let mut drone = test_drone(6, stations, &events, &clock);

        drone.start();
        // Hover by the station for three hops, banking three reports.
        let mut here = wp(51.5074, -0.1278, 8, 0, 0);
        for s in 1..=3 {
            here = drone.fly_to(here, wp(51.5074, -0.1278, 8, 0, s));
        }
        assert_eq!(drone.traffic_reports(), 3);

        // An off-stall leaves the banked reports exactly as they were.
        drone.shut_down();
        assert_eq!(drone.fly_to(here, wp(51.5080, -0.1278, 8, 0, 4)), here);
        assert_eq!(drone.traffic_reports(), 3);
    }

    #[test]
    fn start_powers_on_and_wipes_memory() {
        let events = Arc::new(CollectingSink::new());
        let clock = Arc::new(VirtualClock::new());
        let stations = vec![Station::new("Oxford Circus", 51.5152, -0.1418)];
        let mut drone = test_drone(2, stations, &events, &clock);

        drone.start();
        let a = wp(51.5150, -0.1418, 8, 0, 0);
        let b = wp(51.5152, -0.1418, 8, 0, 1);
        drone.fly_to(a, b);
        assert_eq!(drone.traffic_reports(), 1);

        drone.start();
        assert!(drone.is_on());
        assert_eq!(drone.traffic_reports(), 0);
    }

    #[test]
    fn shut_down_reports_every_time() {
        let events = Arc::new(CollectingSink::new());
        let clock = Arc::new(VirtualClock::new());
        let mut drone = test_drone(3, vec![], &events, &clock);

        drone.shut_down();
        drone.shut_down();
        let off = events
            .take()
            .into_iter()
            .filter(|e| matches!(e, FlightEvent::PoweredOff { .. }))
            .count();
        assert_eq!(off, 2);
    }

    #[test]
    fn full_memory_stalls_and_powers_off() {
        let events = Arc::new(CollectingSink::new());
        let clock = Arc::new(VirtualClock::new());
        // A cluster of stations co-located with the first destination fills
        // the memory in a single scan.
        let stations = (0..MAX_TRAFFIC_REPORTS)
            .map(|i| Station::new(format!("Cluster {i}"), 51.5080, -0.1278))
            .collect();
        let mut drone = test_drone(4, stations, &events, &clock);

        drone.start();
        let a = wp(51.5074, -0.1278, 8, 0, 0);
        let b = wp(51.5080, -0.1278, 8, 0, 1);
        let c = wp(51.5086, -0.1278, 8, 0, 2);

        assert_eq!(drone.fly_to(a, b), b);
        assert_eq!(drone.traffic_reports(), MAX_TRAFFIC_REPORTS);
        assert!(drone.is_on());

        // Next hop hits the full memory: stall, then automatic power-down.
        assert_eq!(drone.fly_to(b, c), b);
        assert!(!drone.is_on());

        let tail: Vec<_> = events
            .take()
            .into_iter()
            .filter(|e| {
                matches!(e, FlightEvent::Stalled { .. } | FlightEvent::PoweredOff { .. })
            })
            .collect();
        assert_eq!(
            tail,
            vec![
                FlightEvent::Stalled {
                    drone: DroneId(4),
                    at:    b,
                    cause: StallCause::MemoryExhausted,
                },
                FlightEvent::PoweredOff { drone: DroneId(4) },
            ]
        );
    }

    #[test]
    fn one_scan_may_overflow_the_memory() {
        let events = Arc::new(CollectingSink::new());
        let clock = Arc::new(VirtualClock::new());
        let stations = (0..MAX_TRAFFIC_REPORTS + 2)
            .map(|i| Station::new(format!("Dense {i}"), 51.5080, -0.1278))
            .collect();
        let mut drone = test_drone(5, stations, &events, &clock);

        drone.start();
        let a = wp(51.5074, -0.1278, 8, 0, 0);
        let b = wp(51.5080, -0.1278, 8, 0, 1);
        drone.fly_to(a, b);
        // The scan runs to completion even once the memory is full.
        assert_eq!(drone.traffic_reports(), MAX_TRAFFIC_REPORTS + 2);
    }
}

#[cfg(test)]
mod movement {
    use df_core::{CollectingSink, FlightEvent, VirtualClock};
    use std::sync::Arc;
    use std::time::Duration;

    use super::{test_drone, wp};
    use crate::DroneControl;

    #[test]
    fn hop_sleeps_the_timestamp_delta() {
        let events = Arc::new(CollectingSink::new());
        let clock = Arc::new(VirtualClock::new());
        let mut drone = test_drone(1, vec![], &events, &clock);

        drone.start();
        let a = wp(51.5074, -0.1278, 8, 0, 0);
        let b = wp(51.5080, -0.1278, 8, 0, 2);
        assert_eq!(drone.fly_to(a, b), b);
        assert_eq!(clock.sleeps(), vec![Duration::from_secs(2)]);
    }

    #[test]
    fn out_of_order_timestamps_do_not_block() {
        let events = Arc::new(CollectingSink::new());
        let clock = Arc::new(VirtualClock::new());
        let mut drone = test_drone(2, vec![], &events, &clock);

        drone.start();
        // Destination stamped before departure: fly immediately.
        let a = wp(51.5074, -0.1278, 8, 0, 5);
        let b = wp(51.5080, -0.1278, 8, 0, 3);
        assert_eq!(drone.fly_to(a, b), b);
        assert_eq!(clock.sleeps(), vec![Duration::ZERO]);
    }

    #[test]
    fn clean_hop_emits_only_flying() {
        let events = Arc::new(CollectingSink::new());
        let clock = Arc::new(VirtualClock::new());
        let mut drone = test_drone(3, vec![], &events, &clock);

        drone.start();
        let a = wp(51.5074, -0.1278, 8, 0, 0);
        let b = wp(51.5080, -0.1278, 8, 0, 1);
        drone.fly_to(a, b);

        let flown: Vec<_> = events
            .take()
            .into_iter()
            .filter(|e| !matches!(e, FlightEvent::PoweredOn { .. }))
            .collect();
        assert_eq!(flown, vec![FlightEvent::Flying { drone: drone.id(), from: a, to: b }]);
    }

    #[test]
    fn empty_sky_route_lands_on_final_waypoint() {
        let events = Arc::new(CollectingSink::new());
        let clock = Arc::new(VirtualClock::new());
        let mut drone = test_drone(4, vec![], &events, &clock);

        drone.start();
        let route = [
            wp(51.5074, -0.1278, 8, 0, 0),
            wp(51.5080, -0.1278, 8, 0, 1),
            wp(51.5086, -0.1278, 8, 0, 2),
            wp(51.5092, -0.1278, 8, 0, 3),
        ];
        let mut here = route[0];
        for next in &route[1..] {
            here = drone.fly_to(here, *next);
        }

        assert_eq!(here, route[3]);
        assert_eq!(drone.traffic_reports(), 0);
        assert_eq!(clock.total_slept(), Duration::from_secs(3));
    }
}

#[cfg(test)]
mod traffic {
    use df_core::{CollectingSink, DroneId, FlightEvent, Station, TrafficLevel, VirtualClock};
    use std::sync::Arc;

    use super::{test_drone, wp};
    use crate::{DroneBuilder, DroneControl, FixedClassifier, SeededClassifier, TrafficClassifier};

    #[test]
    fn station_in_range_is_reported() {
        let events = Arc::new(CollectingSink::new());
        let clock = Arc::new(VirtualClock::new());
        // ~0.11 km north of the destination, well inside the 0.35 km radius.
        let stations = vec![Station::new("Covent Garden", 51.5090, -0.1278)];
        let mut drone = test_drone(1, stations, &events, &clock);

        drone.start();
        let a = wp(51.5074, -0.1278, 8, 0, 0);
        let b = wp(51.5080, -0.1278, 8, 0, 1);
        drone.fly_to(a, b);

        assert_eq!(drone.traffic_reports(), 1);
        let sightings: Vec<_> = events
            .take()
            .into_iter()
            .filter(|e| matches!(e, FlightEvent::StationSighted { .. }))
            .collect();
        match sightings.as_slice() {
            [FlightEvent::StationSighted { station, traffic, at, .. }] => {
                assert_eq!(station, "Covent Garden");
                assert_eq!(*traffic, TrafficLevel::Moderate);
                assert_eq!(*at, b);
            }
            other => panic!("expected one sighting, got {other:?}"),
        }
    }

    #[test]
    fn station_out_of_range_is_ignored() {
        let events = Arc::new(CollectingSink::new());
        let clock = Arc::new(VirtualClock::new());
        // ~0.56 km away: beyond visibility.
        let stations = vec![Station::new("Holborn", 51.5130, -0.1278)];
        let mut drone = test_drone(2, stations, &events, &clock);

        drone.start();
        drone.fly_to(wp(51.5074, -0.1278, 8, 0, 0), wp(51.5080, -0.1278, 8, 0, 1));

        assert_eq!(drone.traffic_reports(), 0);
        assert!(events.take().iter().all(|e| !matches!(e, FlightEvent::StationSighted { .. })));
    }

    #[test]
    fn station_at_exact_waypoint_is_visible() {
        let events = Arc::new(CollectingSink::new());
        let clock = Arc::new(VirtualClock::new());
        let stations = vec![Station::new("Embankment", 51.5080, -0.1278)];
        let mut drone = test_drone(3, stations, &events, &clock);

        drone.start();
        drone.fly_to(wp(51.5074, -0.1278, 8, 0, 0), wp(51.5080, -0.1278, 8, 0, 1));
        assert_eq!(drone.traffic_reports(), 1);
    }

    #[test]
    fn sighting_carries_hop_speed() {
        let events = Arc::new(CollectingSink::new());
        let clock = Arc::new(VirtualClock::new());
        let stations = vec![Station::new("Meridian", 52.5074, -0.1278)];
        let mut drone = test_drone(4, stations, &events, &clock);

        drone.start();
        // One degree of latitude in one hour: ~111.2 km/h.
        let a = wp(51.5074, -0.1278, 8, 0, 0);
        let b = wp(52.5074, -0.1278, 9, 0, 0);
        drone.fly_to(a, b);

        let speed = events
            .take()
            .into_iter()
            .find_map(|e| match e {
                FlightEvent::StationSighted { speed_kph, .. } => Some(speed_kph),
                _ => None,
            })
            .unwrap();
        assert!((speed - 111.195).abs() < 0.5, "got {speed}");
    }

    #[test]
    fn seeded_classifier_is_reproducible() {
        let station = Station::new("Any", 0.0, 0.0);
        let mut a = SeededClassifier::for_drone(DroneId(5937));
        let mut b = SeededClassifier::for_drone(DroneId(5937));
        let run_a: Vec<_> = (0..20).map(|_| a.classify(&station)).collect();
        let run_b: Vec<_> = (0..20).map(|_| b.classify(&station)).collect();
        assert_eq!(run_a, run_b);
    }

    #[test]
    fn sibling_drones_classify_independently() {
        let station = Station::new("Any", 0.0, 0.0);
        let mut a = SeededClassifier::for_drone(DroneId(5937));
        let mut b = SeededClassifier::for_drone(DroneId(5938));
        let run_a: Vec<_> = (0..32).map(|_| a.classify(&station)).collect();
        let run_b: Vec<_> = (0..32).map(|_| b.classify(&station)).collect();
        assert_ne!(run_a, run_b);
    }

    #[test]
    fn default_classifier_comes_from_drone_id() {
        // Two drones built with defaults but the same id report identical
        // sequences over identical flights.
        let fly = |events: Arc<CollectingSink>| {
            let clock = Arc::new(VirtualClock::new());
            let stations: Vec<_> =
                (0..5).map(|i| Station::new(format!("S{i}"), 51.5080, -0.1278)).collect();
            let mut drone = DroneBuilder::new(77)
                .stations(stations.into())
                .clock(clock)
                .events(events.clone())
                .build();
            drone.start();
            drone.fly_to(wp(51.5074, -0.1278, 8, 0, 0), wp(51.5080, -0.1278, 8, 0, 1));
            events
                .take()
                .into_iter()
                .filter_map(|e| match e {
                    FlightEvent::StationSighted { traffic, .. } => Some(traffic),
                    _ => None,
                })
                .collect::<Vec<_>>()
        };

        let first = fly(Arc::new(CollectingSink::new()));
        let second = fly(Arc::new(CollectingSink::new()));
        assert_eq!(first.len(), 5);
        assert_eq!(first, second);
    }

    #[test]
    fn fixed_classifier_echoes_its_level() {
        let station = Station::new("Any", 0.0, 0.0);
        let mut heavy = FixedClassifier(TrafficLevel::Heavy);
        assert_eq!(heavy.classify(&station), TrafficLevel::Heavy);
        assert_eq!(heavy.classify(&station), TrafficLevel::Heavy);
    }
}

#[cfg(test)]
mod speed {
    use std::time::Duration;

    use df_core::GeoPoint;

    use crate::speed_kph;

    #[test]
    fn one_degree_in_one_hour() {
        let a = GeoPoint::new(51.5074, -0.1278);
        let b = GeoPoint::new(52.5074, -0.1278);
        let v = speed_kph(a, b, Duration::from_secs(3600));
        assert!((v - 111.195).abs() < 0.5, "got {v}");
    }

    #[test]
    fn zero_elapsed_stays_finite() {
        let a = GeoPoint::new(51.5074, -0.1278);
        let b = GeoPoint::new(51.5080, -0.1278);
        let v = speed_kph(a, b, Duration::ZERO);
        assert!(v.is_finite());
        assert!(v > 1e9, "nanosecond billing should produce an absurd speed, got {v}");
    }

    #[test]
    fn zero_distance_is_zero_speed() {
        let p = GeoPoint::new(51.5074, -0.1278);
        assert_eq!(speed_kph(p, p, Duration::from_secs(1)), 0.0);
    }
}
