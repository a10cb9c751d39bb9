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

use std::time::Duration;
use chrono::{DateTime,Utc};
use uom::si::{f64::Length, length::meter};
use odin_trajectory::{
    analysis::*,
    observation::Observation,
    quality::TrajectoryQuality,
    segment::{SegmenterConfig, TrajectorySegment},
    zone::*
};

const T0: i64 = 1_717_200_000; // 2024-06-01T00:00:00Z

fn t (secs: i64)->DateTime<Utc> { DateTime::from_timestamp( T0 + secs, 0).unwrap() }

fn zones ()->ZoneSet {
    ZoneSet::from_config( &[
        ZoneConfig::area( "core", ZoneRegion::BoundingBox { west: 4.84, south: 52.35, east: 4.95, north: 52.42 }),
        ZoneConfig::corridor( "polderbaan_north", ZoneRegion::BoundingBox { west: 4.65, south: 52.35, east: 4.85, north: 52.50 }),
    ]).unwrap()
}

/// interleaved stored history of three aircraft:
///  - "klm" 40 points at 30s inside core, loud
///  - "tra" 12 points at 90s inside polderbaan_north, then 20 min later another 3 points
///  - "ezy" 3 points outside of all zones
fn stored_history ()->Vec<Observation> {
    let mut list = Vec::new();
    for i in 0..40 {
        list.push( Observation::new( "484506", t(i*30), 52.38, 4.90)
            .with_callsign( "KLM1023")
            .with_altitude( Length::new::<meter>( 1000.0 - i as f64 * 10.0))
            .with_noise_db( 70.0 + i as f64 * 0.25));
        if i < 12 {
            list.push( Observation::new( "4845ab", t(i*90), 52.45, 4.70).with_callsign( "TRA6421").with_noise_db( 65.0));
        }
        if i < 3 {
            list.push( Observation::new( "406a93", t(i*30), 52.0, 4.2));
        }
    }
    for i in 0..3 {
        list.push( Observation::new( "4845ab", t(11*90 + 1200 + i*30), 52.45, 4.70).with_callsign( "TRA6421"));
    }
    list
}

#[test]
fn test_group_by_aircraft() {
    let groups = group_by_aircraft( stored_history());
    let ids: Vec<&str> = groups.iter().map( |g| g[0].aircraft_id()).collect();
    assert_eq!( ids, vec!["484506", "4845ab", "406a93"]);
    assert_eq!( groups[0].len(), 40);
    assert_eq!( groups[1].len(), 15);
    assert_eq!( groups[2].len(), 3);
    assert!( groups[1].windows(2).all( |w| w[0].date <= w[1].date));
}

// run with "cargo test test_summary -- --nocapture"
#[test]
fn test_summary() {
    let config = SegmenterConfig::new( Duration::from_secs(300), 3);
    let segments = reconstruct_all( stored_history(), &zones(), &config).unwrap();
    for s in &segments { println!("{s}"); }

    // klm, tra (two segments), ezy
    assert_eq!( segments.len(), 4);
    assert_eq!( segments[0].quality, TrajectoryQuality::Excellent);
    assert_eq!( segments[1].quality, TrajectoryQuality::Fair); // 12 points at 90s
    assert_eq!( segments[2].quality, TrajectoryQuality::Poor);

    let summary = TrajectorySummary::from_segments( &segments);
    println!("{summary}");

    assert_eq!( summary.total_trajectories, 4);
    assert_eq!( summary.aircraft_tracked, 3);
    assert!( (summary.avg_points - (40.0 + 12.0 + 3.0 + 3.0) / 4.0).abs() < 1e-9);

    assert_eq!( summary.count( TrajectoryQuality::Excellent), 1);
    assert_eq!( summary.count( TrajectoryQuality::Good), 0);
    assert_eq!( summary.count( TrajectoryQuality::Fair), 1);
    assert_eq!( summary.count( TrajectoryQuality::Poor), 2);
    assert_eq!( summary.quality_breakdown.len(), 4);

    assert_eq!( summary.zone_usage.get("core"), Some(&1));
    assert_eq!( summary.zone_usage.get("polderbaan_north"), Some(&2));

    let loudest = summary.loudest.get("core").unwrap();
    assert_eq!( loudest.icao24, "484506");
    assert_eq!( loudest.callsign.as_deref(), Some("KLM1023"));
    assert!( (loudest.noise_db - 79.75).abs() < 1e-9);

    // the second tra segment has no noise values
    let loudest = summary.loudest.get("polderbaan_north").unwrap();
    assert_eq!( loudest.start, t(0));
    assert_eq!( loudest.noise_db, 65.0);
}

#[test]
fn test_empty_summary() {
    let summary = TrajectorySummary::from_segments( &[]);
    assert_eq!( summary.total_trajectories, 0);
    assert_eq!( summary.avg_points, 0.0);
    assert_eq!( summary.quality_breakdown.values().sum::<usize>(), 0);
    assert!( summary.zone_usage.is_empty());
}

#[test]
fn test_segments_json() {
    let config = SegmenterConfig::new( Duration::from_secs(300), 3);
    let segments = reconstruct_all( stored_history(), &zones(), &config).unwrap();

    let path = std::env::temp_dir().join( format!("odin_trajectory_segments_{}.json", std::process::id()));
    write_segments_json( &path, &segments).unwrap();
    let restored = read_segments_json( &path).unwrap();
    std::fs::remove_file( &path).unwrap();

    assert_eq!( restored.len(), segments.len());
    for (a,b) in segments.iter().zip( restored.iter()) {
        assert_eq!( a.icao24, b.icao24);
        assert_eq!( a.callsign, b.callsign);
        assert_eq!( a.start, b.start);
        assert_eq!( a.end, b.end);
        assert_eq!( a.point_count(), b.point_count());
        assert_eq!( a.entered_zones, b.entered_zones);
        assert_eq!( a.quality, b.quality);
        assert!( (a.mean_interval - b.mean_interval).abs() < 1e-9);
        assert_eq!( a.altitude.is_some(), b.altitude.is_some());
    }

    let alt = restored[0].altitude.unwrap();
    assert!( (alt.max.get::<meter>() - 1000.0).abs() < 1e-6);
    assert!( (alt.min.get::<meter>() - 610.0).abs() < 1e-6);
}
