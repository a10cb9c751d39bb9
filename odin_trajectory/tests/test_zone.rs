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

use odin_trajectory::{load_config, parse_config, TrajectoryConfig, OdinTrajectoryError};
use odin_trajectory::zone::*;

fn core_box ()->ZoneRegion {
    ZoneRegion::BoundingBox { west: 4.84, south: 52.35, east: 4.95, north: 52.42 }
}

fn approach_polygon ()->ZoneRegion {
    ZoneRegion::Polygon { exterior: vec![ (4.65, 52.45), (4.85, 52.45), (4.80, 52.35), (4.70, 52.35) ] }
}

// run with "cargo test test_box_membership -- --nocapture"
#[test]
fn test_box_membership() {
    let zones = ZoneSet::from_config( &[ ZoneConfig::area( "core", core_box()) ]).unwrap();

    let m = zones.classify_position( 52.385157, 4.895168);
    println!("(52.385157, 4.895168) -> {m}");
    assert!( m.in_area("core"));
    assert!( m.corridor.is_none());

    let m = zones.classify_position( 52.0, 4.2);
    println!("(52.0, 4.2) -> {m}");
    assert!( m.is_empty());
}

#[test]
fn test_boundary_inclusive() {
    let zones = ZoneSet::from_config( &[ ZoneConfig::area( "core", core_box()) ]).unwrap();
    assert!( zones.classify_position( 52.35, 4.84).in_area("core"));
    assert!( zones.classify_position( 52.42, 4.95).in_area("core"));
    assert!( !zones.classify_position( 52.4201, 4.90).in_area("core"));
}

#[test]
fn test_nested_areas_and_corridor_priority() {
    let zones = ZoneSet::from_config( &[
        ZoneConfig::area( "core", core_box()),
        ZoneConfig::area( "extended", ZoneRegion::BoundingBox { west: 4.70, south: 52.25, east: 5.05, north: 52.45 }),
        ZoneConfig::corridor( "polderbaan_north", ZoneRegion::BoundingBox { west: 4.65, south: 52.35, east: 4.85, north: 52.50 }),
        ZoneConfig::corridor( "zwanenburg_east", ZoneRegion::BoundingBox { west: 4.75, south: 52.28, east: 5.00, north: 52.38 }),
    ]).unwrap();

    // inside both corridors, first configured one wins
    let m = zones.classify_position( 52.36, 4.80);
    println!("(52.36, 4.80) -> {m}");
    assert_eq!( m.areas.len(), 1);
    assert!( m.in_area("extended"));
    assert!( m.in_corridor("polderbaan_north"));
    assert!( !m.is_in("zwanenburg_east"));

    // core and extended at the same time
    let m = zones.classify_position( 52.37, 4.90);
    println!("(52.37, 4.90) -> {m}");
    assert!( m.in_area("core") && m.in_area("extended"));
    assert!( m.in_corridor("zwanenburg_east"));

    // outside of everything is not an error
    let m = zones.classify_position( 40.0, -120.0);
    assert!( m.is_empty());
}

#[test]
fn test_polygon_zone() {
    let zones = ZoneSet::from_config( &[ ZoneConfig::corridor( "polderbaan_approach", approach_polygon()) ]).unwrap();
    assert!( zones.classify_position( 52.40, 4.75).in_corridor("polderbaan_approach"));
    assert!( !zones.classify_position( 52.36, 4.66).is_in("polderbaan_approach"));
    assert!( !zones.classify_position( 52.50, 4.75).is_in("polderbaan_approach"));
}

#[test]
fn test_invalid_zone_configs() {
    let dup = ZoneSet::from_config( &[ ZoneConfig::area( "core", core_box()), ZoneConfig::corridor( "core", approach_polygon()) ]);
    assert!( matches!( dup, Err(OdinTrajectoryError::ConfigError(_))));

    let inverted = ZoneSet::from_config( &[
        ZoneConfig::area( "bad", ZoneRegion::BoundingBox { west: 4.95, south: 52.35, east: 4.84, north: 52.42 })
    ]);
    assert!( matches!( inverted, Err(OdinTrajectoryError::ConfigError(_))));

    let degenerate = ZoneSet::from_config( &[
        ZoneConfig::area( "line", ZoneRegion::Polygon { exterior: vec![ (4.0, 52.0), (4.1, 52.1), (4.0, 52.0) ] })
    ]);
    assert!( matches!( degenerate, Err(OdinTrajectoryError::ConfigError(_))));
}

#[test]
fn test_parse_zone_config() {
    let input = r#"
        TrajectoryConfig(
            zones: [
                ( name: "core", category: Area, region: BoundingBox( west: 4.84, south: 52.35, east: 4.95, north: 52.42 ) ),
                ( name: "approach", category: Corridor, region: Polygon( exterior: [ (4.65, 52.45), (4.85, 52.45), (4.80, 52.35) ] ) ),
            ],
        )
    "#;
    let config: TrajectoryConfig = parse_config( input).unwrap();
    println!("{config:?}");
    assert_eq!( config.zones.len(), 2);
    assert_eq!( config.segmenter.min_points, 5); // defaults
    assert_eq!( config.schedules.len(), 3);

    let zones = config.zone_set().unwrap();
    assert_eq!( zones.zone_names().collect::<Vec<_>>(), vec!["core", "approach"]);
    assert_eq!( zones.get("approach").map( |z| z.category()), Some(ZoneCategory::Corridor));
}

#[test]
fn test_load_sample_config() {
    let config: TrajectoryConfig = load_config( "configs/schiphol.ron").unwrap();
    config.validate().unwrap();

    let zones = config.zone_set().unwrap();
    assert_eq!( zones.len(), 7);

    let m = zones.classify_position( 52.385157, 4.895168);
    println!("Amsterdam Noord -> {m}");
    assert!( m.in_area("core") && m.in_area("extended") && m.in_area("full"));
    assert!( m.corridor.is_none());
}
