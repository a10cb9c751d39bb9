/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
#![allow(unused)]

use std::thread;
use chrono::{DateTime,Utc};
use odin_trajectory::{OdinTrajectoryError, quality::TrajectoryQuality, tracker::*};

const T0: i64 = 1_717_200_000; // 2024-06-01T00:00:00Z

fn t (secs: i64)->DateTime<Utc> { DateTime::from_timestamp( T0 + secs, 0).unwrap() }

#[test]
fn test_first_observation() {
    let tracker = TrajectoryTracker::new( LocalTrackStore::new());
    let update = tracker.update( "4840d6", t(0)).unwrap();

    assert_eq!( update, TrackUpdate { point_count: 1, gap: 0.0, quality: TrajectoryQuality::Poor });

    let state = tracker.state("4840d6").unwrap();
    println!("{state}");
    assert_eq!( state.first_seen, t(0));
    assert_eq!( state.last_seen, t(0));
    assert_eq!( state.mean_interval, 0.0);
    assert!( tracker.state("ffffff").is_none());
}

// run with "cargo test test_regular_cadence -- --nocapture"
#[test]
fn test_regular_cadence() {
    let tracker = TrajectoryTracker::new( LocalTrackStore::new());

    let mut last = None;
    for i in 0..35 {
        last = Some( tracker.update( "484506", t(i*30)).unwrap());
    }
    let last = last.unwrap();
    println!("{last:?}");

    assert_eq!( last.point_count, 35);
    assert_eq!( last.gap, 30.0);
    assert_eq!( last.quality, TrajectoryQuality::Excellent);

    let state = tracker.state("484506").unwrap();
    println!("{state}");
    assert!( (state.mean_interval - 30.0).abs() < 1e-9);
    assert_eq!( state.duration_secs(), 34.0 * 30.0);
}

#[test]
fn test_mean_is_arithmetic_mean_of_gaps() {
    let offsets: [i64;7] = [0, 10, 55, 58, 178, 178, 239];
    let tracker = TrajectoryTracker::new( LocalTrackStore::new());

    for o in offsets {
        tracker.update( "3c6444", t(o)).unwrap();
    }

    let gaps: Vec<f64> = offsets.windows(2).map( |w| (w[1] - w[0]) as f64).collect();
    let expected = gaps.iter().sum::<f64>() / gaps.len() as f64;

    let state = tracker.state("3c6444").unwrap();
    println!("{state}, expected mean {expected}");
    assert_eq!( state.point_count, offsets.len());
    assert!( (state.mean_interval - expected).abs() < 1e-9);
}

#[test]
fn test_long_gap_is_never_forgotten() {
    let tracker = TrajectoryTracker::new( LocalTrackStore::new());
    tracker.update( "a1", t(0)).unwrap();
    tracker.update( "a1", t(3600)).unwrap(); // one burst of lag

    for i in 1..=40 {
        tracker.update( "a1", t(3600 + i*30)).unwrap();
    }
    let state = tracker.state("a1").unwrap();
    // (3600 + 40*30) / 41
    assert!( (state.mean_interval - 4800.0/41.0).abs() < 1e-9);
    assert_eq!( state.quality, TrajectoryQuality::Fair);
}

#[test]
fn test_non_monotonic_update() {
    let tracker = TrajectoryTracker::new( LocalTrackStore::new());
    tracker.update( "a1", t(0)).unwrap();
    tracker.update( "a1", t(60)).unwrap();
    let before = tracker.state("a1").unwrap();

    match tracker.update( "a1", t(30)) {
        Err(e @ OdinTrajectoryError::NonMonotonicObservation{..}) => {
            println!("got expected error: {e}");
            assert!( e.is_recoverable());
        }
        other => panic!("expected non-monotonic error, got {other:?}")
    }
    assert_eq!( tracker.state("a1").unwrap(), before); // not modified

    // same timestamp is a zero gap, not an error
    let update = tracker.update( "a1", t(60)).unwrap();
    assert_eq!( update.gap, 0.0);
    assert_eq!( update.point_count, 3);

    // caller can decide to reset
    assert!( tracker.reset("a1").is_some());
    assert_eq!( tracker.update( "a1", t(30)).unwrap().point_count, 1);
}

#[test]
fn test_no_deduplication() {
    let tracker = TrajectoryTracker::new( LocalTrackStore::new());
    tracker.update( "a1", t(0)).unwrap();
    tracker.update( "a1", t(30)).unwrap();
    let update = tracker.update( "a1", t(30)).unwrap(); // same observation again
    assert_eq!( update.point_count, 3);
    assert_eq!( tracker.len(), 1);
}

#[test]
fn test_snapshot_order() {
    let store = LocalTrackStore::new();
    let tracker = TrajectoryTracker::new( store);
    for id in ["c3", "a1", "b2"] { tracker.update( id, t(0)).unwrap(); }

    let ids: Vec<String> = tracker.store().snapshot().iter().map( |s| s.icao24.to_string()).collect();
    assert_eq!( ids, vec!["a1", "b2", "c3"]);
}

// run with "cargo test test_shared_store -- --nocapture"
#[test]
fn test_shared_store() {
    let tracker = TrajectoryTracker::new( SharedTrackStore::new());
    let n_threads = 8;
    let n_updates = 500;

    thread::scope( |s| {
        for k in 0..n_threads {
            let tracker = &tracker;
            s.spawn( move || {
                let own_id = format!("own-{k}");
                for i in 0..n_updates {
                    // all threads hit the same aircraft with the same timestamp (zero gaps)...
                    tracker.update( "shared", t(0)).unwrap();
                    // ..and their own aircraft with a regular cadence
                    tracker.update( &own_id, t(i as i64 * 10)).unwrap();
                }
            });
        }
    });

    let shared = tracker.state("shared").unwrap();
    println!("{shared}");
    assert_eq!( shared.point_count, n_threads * n_updates);
    assert_eq!( shared.mean_interval, 0.0);

    for k in 0..n_threads {
        let own = tracker.state( &format!("own-{k}")).unwrap();
        assert_eq!( own.point_count, n_updates);
        assert!( (own.mean_interval - 10.0).abs() < 1e-9);
    }
    assert_eq!( tracker.len(), n_threads + 1);
}

#[test]
fn test_track_state_serde() {
    let tracker = TrajectoryTracker::new( LocalTrackStore::new());
    for i in 0..12 { tracker.update( "a1", t(i*45)).unwrap(); }
    let state = tracker.state("a1").unwrap();

    let json = serde_json::to_string( &state).unwrap();
    println!("{json}");
    let state1: AircraftTrackState = serde_json::from_str( &json).unwrap();
    assert_eq!( state1.point_count, state.point_count);
    assert_eq!( state1.quality, state.quality);
    assert_eq!( state1.last_seen, state.last_seen);
    assert!( (state1.mean_interval - state.mean_interval).abs() < 1e-9);
}

#[test]
fn test_restored_state_without_points() {
    // e.g. a state that was read back from storage with a zero count
    let mut state = AircraftTrackState::new( std::sync::Arc::new( "a1".to_string()), t(0));
    state.point_count = 0;

    let update = state.advance( t(30)).unwrap();
    println!("{state}");
    assert_eq!( update.point_count, 1);
    assert_eq!( state.mean_interval, 0.0);
    assert_eq!( state.quality, TrajectoryQuality::Poor);

    let update = state.advance( t(60)).unwrap();
    assert_eq!( update.point_count, 2);
    assert!( (state.mean_interval - 60.0).abs() < 1e-9); // spans first_seen..last_seen

    // restoring the previous state of a tracked aircraft
    let tracker = TrajectoryTracker::new( LocalTrackStore::new());
    tracker.update( "b2", t(0)).unwrap();
    let previous = tracker.state("b2");
    tracker.update( "b2", t(30)).unwrap();
    tracker.restore( "b2", previous.clone());
    assert_eq!( tracker.state("b2"), previous);

    tracker.restore( "b2", None);
    assert!( tracker.is_empty());
}
