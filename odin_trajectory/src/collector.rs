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

//! the collection time pipeline: raw provider records are filtered for position, classified against the
//! configured zones and fed into the streaming tracker. Results are handed to a [`PointSink`] (the
//! persistence collaborator). This is where the collection policy lives - the core components only
//! report errors, the collector decides to drop non-monotonic observations and to continue

use std::{collections::BTreeMap, fmt, sync::Arc, time::Duration};
use chrono::{DateTime,TimeZone};
use serde::{Serialize,Deserialize};
use tracing::{debug,info,warn};

use crate::{
    errors::{OdinTrajectoryError, Result},
    observation::{Observation,RawObservation},
    schedule::CollectionSchedules,
    source::ObservationSource,
    tracker::{LocalTrackStore, TrackStore, TrackUpdate, TrajectoryTracker},
    zone::{ZoneMembership,ZoneSet}
};

/// what the collector produces for each accepted observation
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct CollectedPoint {
    pub observation: Observation,
    pub membership: ZoneMembership,
    pub update: TrackUpdate,
}

/// the persistence side of the collector
pub trait PointSink {
    fn store_point (&mut self, point: &CollectedPoint)->Result<()>;
}

impl PointSink for Vec<CollectedPoint> {
    fn store_point (&mut self, point: &CollectedPoint)->Result<()> {
        self.push( point.clone());
        Ok(())
    }
}

/// result of one pass over an observation source
#[derive(Debug,Clone,Default,PartialEq,Serialize,Deserialize)]
pub struct CycleReport {
    pub schedule: String,
    /// how long to wait before the next cycle according to the active schedule
    pub next_interval: Duration,
    pub received: usize,
    pub collected: usize,
    /// records without position
    pub dropped: usize,
    /// observations rejected by the tracker (out of order)
    pub rejected: usize,
    /// aircraft seen for the first time in this cycle
    pub new_aircraft: usize,
}

impl fmt::Display for CycleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "cycle[{}]: received {}, collected {}, dropped {}, rejected {}, new aircraft {}, next in {}s",
                self.schedule, self.received, self.collected, self.dropped, self.rejected, self.new_aircraft, self.next_interval.as_secs())
    }
}

/// cumulative collection statistics
#[derive(Debug,Clone,Default,PartialEq,Serialize,Deserialize)]
pub struct CollectionStats {
    pub cycles: usize,
    pub points: usize,
    pub dropped: usize,
    pub rejected: usize,
    pub area_hits: BTreeMap<String,usize>,
    pub corridor_hits: BTreeMap<String,usize>,
    pub schedule_cycles: BTreeMap<String,usize>,
}

pub struct Collector<S: TrackStore = LocalTrackStore> {
    zones: Arc<ZoneSet>,
    tracker: TrajectoryTracker<S>,
    schedules: CollectionSchedules,
    stats: CollectionStats,
}

impl<S: TrackStore> Collector<S> {
    pub fn new (zones: Arc<ZoneSet>, tracker: TrajectoryTracker<S>, schedules: CollectionSchedules)->Self {
        Collector { zones, tracker, schedules, stats: CollectionStats::default() }
    }

    pub fn zones (&self)->&ZoneSet { self.zones.as_ref() }
    pub fn tracker (&self)->&TrajectoryTracker<S> { &self.tracker }
    pub fn into_tracker (self)->TrajectoryTracker<S> { self.tracker }
    pub fn stats (&self)->&CollectionStats { &self.stats }

    /// process a single provider record. Records without position are dropped (`Ok(None)`), tracker errors
    /// are passed on to the caller
    pub fn ingest (&mut self, raw: RawObservation)->Result<Option<CollectedPoint>> {
        let Some(observation) = raw.into_observation() else {
            self.stats.dropped += 1;
            return Ok(None)
        };

        let point = self.track( observation)?;
        self.count_point( &point);
        Ok( Some(point))
    }

    fn track (&self, observation: Observation)->Result<CollectedPoint> {
        let membership = self.zones.classify( &observation);
        let update = self.tracker.update_with( &observation)?;
        Ok( CollectedPoint { observation, membership, update } )
    }

    fn count_point (&mut self, point: &CollectedPoint) {
        self.stats.points += 1;
        for a in &point.membership.areas {
            *self.stats.area_hits.entry( a.to_string()).or_insert(0) += 1;
        }
        if let Some(c) = &point.membership.corridor {
            *self.stats.corridor_hits.entry( c.to_string()).or_insert(0) += 1;
        }
    }

    /// run one collection cycle over `source` at (local) time `now`. Recoverable errors (out of order observations)
    /// are logged and skipped, all other errors abort the cycle.
    /// A point the sink fails to store is rolled back in the tracker, i.e. tracker and stored history stay consistent
    /// and the cycle can be retried. The rollback is only exact if no other source updated the same aircraft meanwhile
    pub fn collect_cycle<Tz: TimeZone> (&mut self, source: &dyn ObservationSource, sink: &mut dyn PointSink, now: &DateTime<Tz>)->Result<CycleReport> {
        let schedule = self.schedules.for_date( now);
        let mut report = CycleReport {
            schedule: schedule.name.clone(),
            next_interval: schedule.interval,
            ..CycleReport::default()
        };
        debug!("starting collection cycle from {} with schedule {}", source.name(), report.schedule);

        for r in source.observations()? {
            let raw = r?;
            report.received += 1;

            let Some(observation) = raw.into_observation() else {
                self.stats.dropped += 1;
                report.dropped += 1;
                continue
            };

            let previous = self.tracker.state( observation.aircraft_id());
            match self.track( observation) {
                Ok(point) => {
                    if let Err(e) = sink.store_point( &point) {
                        warn!("failed to store {}, rolling back: {e}", point.observation);
                        self.tracker.restore( point.observation.aircraft_id(), previous);
                        return Err(e)
                    }
                    if point.update.point_count == 1 { report.new_aircraft += 1 }
                    self.count_point( &point);
                    report.collected += 1;
                }
                Err(e) if e.is_recoverable() => {
                    warn!("skipping observation: {e}");
                    self.stats.rejected += 1;
                    report.rejected += 1;
                }
                Err(e) => return Err(e)
            }
        }

        self.stats.cycles += 1;
        *self.stats.schedule_cycles.entry( report.schedule.clone()).or_insert(0) += 1;
        info!("{report}");

        Ok(report)
    }
}
