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

//! batch analysis over the stored history of all aircraft: per-aircraft segmentation, pattern summaries
//! and JSON storage of reconstructed segments

use std::{collections::{BTreeMap,HashMap}, fmt, fs::File, io::{BufReader,BufWriter}, path::Path, sync::Arc};
use chrono::{DateTime,Utc};
use serde::{Serialize,Deserialize};
use itertools::Itertools;
use strum::IntoEnumIterator;

use crate::{
    errors::Result,
    observation::Observation,
    quality::TrajectoryQuality,
    segment::{segment_history, SegmenterConfig, TrajectorySegment},
    zone::ZoneSet
};

/// split a mixed stored history into per-aircraft histories, keeping the order in which aircraft first appear
/// and the relative order of observations per aircraft
pub fn group_by_aircraft (observations: Vec<Observation>)->Vec<Vec<Observation>> {
    let mut index: HashMap<Arc<String>,usize> = HashMap::new();
    let mut groups: Vec<Vec<Observation>> = Vec::new();

    for obs in observations {
        let i = *index.entry( obs.icao24.clone()).or_insert_with( || { groups.push( Vec::new()); groups.len()-1 });
        groups[i].push( obs);
    }
    groups
}

/// reconstruct segments for all aircraft of a stored history. Per aircraft the history has to be time ordered
pub fn reconstruct_all (observations: Vec<Observation>, zones: &ZoneSet, config: &SegmenterConfig)->Result<Vec<TrajectorySegment>> {
    let mut segments: Vec<TrajectorySegment> = Vec::new();
    for history in group_by_aircraft( observations) {
        segments.extend( segment_history( &history, zones, config)?);
    }
    Ok(segments)
}

/* #region summary *******************************************************************************************/

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct LoudestTrajectory {
    pub icao24: String,
    pub callsign: Option<String>,
    pub start: DateTime<Utc>,
    pub noise_db: f64,
}

/// aggregate view over a set of reconstructed segments
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct TrajectorySummary {
    pub total_trajectories: usize,
    pub aircraft_tracked: usize,
    pub avg_points: f64,
    pub avg_duration_secs: f64,

    /// number of segments per grade (all grades present)
    pub quality_breakdown: BTreeMap<TrajectoryQuality,usize>,

    /// number of segments that entered a zone
    pub zone_usage: BTreeMap<String,usize>,

    /// per zone the segment with the highest noise maximum among those that entered it
    pub loudest: BTreeMap<String,LoudestTrajectory>,
}

impl TrajectorySummary {
    pub fn from_segments (segments: &[TrajectorySegment])->Self {
        let total_trajectories = segments.len();
        let aircraft_tracked = segments.iter().map( |s| s.icao24.as_str()).unique().count();

        let (avg_points, avg_duration_secs) = if total_trajectories > 0 {
            let n = total_trajectories as f64;
            ( segments.iter().map( |s| s.point_count() as f64).sum::<f64>() / n,
              segments.iter().map( |s| s.duration_secs).sum::<f64>() / n )
        } else {
            (0.0, 0.0)
        };

        let mut quality_breakdown: BTreeMap<TrajectoryQuality,usize> = TrajectoryQuality::iter().map( |q| (q,0)).collect();
        for s in segments {
            *quality_breakdown.entry( s.quality).or_insert(0) += 1;
        }

        let mut zone_usage: BTreeMap<String,usize> = BTreeMap::new();
        let mut loudest: BTreeMap<String,LoudestTrajectory> = BTreeMap::new();

        for s in segments {
            for (zone,entered) in &s.entered_zones {
                let n = zone_usage.entry( zone.clone()).or_insert(0);
                if !*entered { continue }
                *n += 1;

                if let Some(noise) = &s.noise_db {
                    if loudest.get( zone).is_none_or( |l| noise.max > l.noise_db) {
                        loudest.insert( zone.clone(), LoudestTrajectory {
                            icao24: s.icao24.to_string(),
                            callsign: s.callsign.clone(),
                            start: s.start,
                            noise_db: noise.max
                        });
                    }
                }
            }
        }

        TrajectorySummary { total_trajectories, aircraft_tracked, avg_points, avg_duration_secs, quality_breakdown, zone_usage, loudest }
    }

    pub fn count (&self, quality: TrajectoryQuality)->usize {
        self.quality_breakdown.get( &quality).copied().unwrap_or(0)
    }
}

impl fmt::Display for TrajectorySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!( f, "trajectories:     {}", self.total_trajectories)?;
        writeln!( f, "aircraft:         {}", self.aircraft_tracked)?;
        writeln!( f, "avg points:       {:.1}", self.avg_points)?;
        writeln!( f, "avg duration:     {:.1} min", self.avg_duration_secs / 60.0)?;
        writeln!( f, "quality:")?;
        for (q,n) in self.quality_breakdown.iter().rev() {
            writeln!( f, "  {:<10} {}", q.as_ref(), n)?;
        }
        writeln!( f, "zones:")?;
        for (zone,n) in &self.zone_usage {
            write!( f, "  {:<18} {}", zone, n)?;
            if let Some(l) = self.loudest.get( zone) {
                write!( f, "  (loudest: {} {:.1} dB)", l.callsign.as_deref().unwrap_or( l.icao24.as_str()), l.noise_db)?;
            }
            writeln!( f)?;
        }
        Ok(())
    }
}

/* #endregion summary */

/* #region storage *******************************************************************************************/

pub fn write_segments_json (path: impl AsRef<Path>, segments: &[TrajectorySegment])->Result<()> {
    let file = File::create( path)?;
    Ok( serde_json::to_writer_pretty( BufWriter::new(file), segments)? )
}

pub fn read_segments_json (path: impl AsRef<Path>)->Result<Vec<TrajectorySegment>> {
    let file = File::open( path)?;
    Ok( serde_json::from_reader( BufReader::new(file))? )
}

/* #endregion storage */
