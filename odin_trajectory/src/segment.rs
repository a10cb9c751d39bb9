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

//! batch reconstruction of trajectory segments from the stored, time ordered observation history of a
//! single aircraft. The same gap rule that separates segments here is used when replaying a history, and
//! segments are graded with the same [`grade`] function as the streaming tracker.

use std::{collections::BTreeMap, fmt, ops::Range, sync::Arc, time::Duration};
use chrono::{DateTime,Utc};
use serde::{Serialize,Deserialize};
use itertools::Itertools;
use geo::{Distance, Haversine, LineString, Point};
use uom::si::{
    f64::{Length,Velocity},
    length::meter, velocity::meter_per_second
};

use crate::{
    errors::{config_error, OdinTrajectoryError, Result},
    observation::Observation,
    quality::{grade, TrajectoryQuality},
    stats::{gap_seconds, mean_interval, Extremes, GapStats, MinMaxAvg},
    zone::ZoneSet
};

#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct SegmenterConfig {
    /// consecutive observations further apart than this start a new segment
    pub max_gap: Duration,

    /// segments with fewer points are discarded (at least 1)
    pub min_points: usize,
}

impl SegmenterConfig {
    pub fn new (max_gap: Duration, min_points: usize)->Self {
        SegmenterConfig { max_gap, min_points }
    }

    pub fn max_gap_secs (&self)->f64 { self.max_gap.as_secs_f64() }

    pub fn validate (&self)->Result<()> {
        if self.min_points == 0 { return Err( config_error("segmenter min_points has to be at least 1")) }
        Ok(())
    }
}

impl Default for SegmenterConfig {
    fn default()->Self {
        SegmenterConfig { max_gap: Duration::from_secs(300), min_points: 5 }
    }
}

/// a reconstructed trajectory segment. This is a derived, immutable projection of the observation history
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct TrajectorySegment {
    pub icao24: Arc<String>,
    pub callsign: Option<String>, // of the first observation

    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_secs: f64,

    pub points: Vec<Observation>,

    pub altitude: Option<Extremes<Length>>,
    pub ground_speed: Option<Extremes<Velocity>>,
    pub noise_db: Option<Extremes<f64>>,

    /// one flag per configured zone (area and corridor), true if any point of the segment is inside
    pub entered_zones: BTreeMap<String,bool>,

    pub gaps: GapStats,

    /// mean interval between consecutive points in seconds (0 for single point segments)
    pub mean_interval: f64,
    pub quality: TrajectoryQuality,
}

impl TrajectorySegment {
    /// create from a non-empty, time ordered run of observations of the same aircraft
    fn from_run (points: &[Observation], zones: &ZoneSet)->Self {
        let first = &points[0];
        let last = &points[points.len()-1];
        let n = points.len();

        let duration_secs = gap_seconds( &first.date, &last.date);
        let mean_interval = mean_interval( duration_secs, n);

        let mut alt = MinMaxAvg::new();
        let mut spd = MinMaxAvg::new();
        let mut noise = MinMaxAvg::new();
        let mut entered_zones: BTreeMap<String,bool> = zones.zone_names().map( |name| (name.to_string(), false)).collect();

        for p in points {
            alt.add_opt( p.altitude.map( |v| v.get::<meter>()));
            spd.add_opt( p.ground_speed.map( |v| v.get::<meter_per_second>()));
            noise.add_opt( p.noise_db);

            let membership = zones.classify( p);
            for a in &membership.areas {
                entered_zones.insert( a.to_string(), true);
            }
            if let Some(c) = &membership.corridor {
                entered_zones.insert( c.to_string(), true);
            }
        }

        TrajectorySegment {
            icao24: first.icao24.clone(),
            callsign: first.callsign.clone(),
            start: first.date,
            end: last.date,
            duration_secs,
            points: points.to_vec(),
            altitude: alt.extremes().map( |e| e.map( |v| Length::new::<meter>(v))),
            ground_speed: spd.extremes().map( |e| e.map( |v| Velocity::new::<meter_per_second>(v))),
            noise_db: noise.extremes(),
            entered_zones,
            gaps: GapStats::from_dates( points.iter().map( |p| &p.date)),
            mean_interval,
            quality: grade( n, mean_interval)
        }
    }

    pub fn point_count (&self)->usize { self.points.len() }

    pub fn entered (&self, zone_name: &str)->bool {
        self.entered_zones.get( zone_name).copied().unwrap_or(false)
    }

    /// names of all zones entered by this segment
    pub fn entered_zone_names (&self)->impl Iterator<Item=&str> {
        self.entered_zones.iter().filter( |(_,v)| **v).map( |(k,_)| k.as_str())
    }

    /// the segment as a lon/lat line string
    pub fn polyline (&self)->LineString<f64> {
        self.points.iter().map( |p| (p.longitude, p.latitude)).collect::<Vec<_>>().into()
    }

    /// great circle length of the segment polyline
    pub fn path_length (&self)->Length {
        let d: f64 = self.points.iter()
            .tuple_windows()
            .map( |(a,b)| Haversine.distance( a.point(), b.point()))
            .sum();
        Length::new::<meter>(d)
    }
}

impl fmt::Display for TrajectorySegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "TrajectorySegment( icao24: {}", self.icao24)?;
        if let Some(cs) = &self.callsign { write!( f, ", cs: \"{cs}\"")?; }
        write!( f, ", start: {}, duration: {:.0}s, n: {}, mean_interval: {:.1}s, quality: {}",
                self.start, self.duration_secs, self.points.len(), self.mean_interval, self.quality)?;
        let zones = self.entered_zone_names().join(",");
        if !zones.is_empty() { write!( f, ", zones: [{zones}]")?; }
        write!( f, ")")
    }
}

/// check the batch preconditions: all observations belong to the same aircraft and are ordered by time
pub fn check_history (history: &[Observation])->Result<()> {
    if let Some(first) = history.first() {
        for (i,(prev,obs)) in history.iter().tuple_windows().enumerate() {
            if obs.icao24 != first.icao24 {
                return Err( OdinTrajectoryError::MixedHistory { expected: first.icao24.to_string(), found: obs.icao24.to_string() })
            }
            if obs.date < prev.date {
                return Err( OdinTrajectoryError::UnsortedHistory { aircraft_id: first.icao24.to_string(), index: i+1 })
            }
        }
    }
    Ok(())
}

/// partition a checked history into maximal index ranges in which no consecutive gap exceeds `max_gap`.
/// This includes runs that are too short to become segments
pub fn gap_runs (history: &[Observation], max_gap: Duration)->Result<Vec<Range<usize>>> {
    check_history( history)?;

    let max_gap = max_gap.as_secs_f64();
    let mut runs: Vec<Range<usize>> = Vec::new();
    if history.is_empty() { return Ok(runs) }

    let mut start = 0;
    for (i,(prev,obs)) in history.iter().tuple_windows().enumerate() {
        if gap_seconds( &prev.date, &obs.date) > max_gap {
            runs.push( start..i+1);
            start = i+1;
        }
    }
    runs.push( start..history.len());

    Ok(runs)
}

/// split the time ordered `history` of a single aircraft into trajectory segments. This does not sort -
/// unordered input is rejected
pub fn segment_history (history: &[Observation], zones: &ZoneSet, config: &SegmenterConfig)->Result<Vec<TrajectorySegment>> {
    config.validate()?;

    let segments = gap_runs( history, config.max_gap)?.into_iter()
        .filter( |r| r.len() >= config.min_points)
        .map( |r| TrajectorySegment::from_run( &history[r], zones))
        .collect();

    Ok(segments)
}
