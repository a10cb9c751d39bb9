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

//! time-of-day dependent collection schedules. Observation cadence (and hence reachable trajectory quality)
//! follows the schedule that was active when the observations were collected

use std::time::Duration;
use chrono::{DateTime,TimeZone,Timelike};
use serde::{Serialize,Deserialize};
use lazy_static::lazy_static;

use crate::errors::{config_error, Result};

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct CollectionSchedule {
    pub name: String,
    /// local hours of day [0..23] this schedule is active
    pub hours: Vec<u32>,
    /// polling interval
    pub interval: Duration,
}

impl CollectionSchedule {
    pub fn new (name: impl ToString, hours: Vec<u32>, interval: Duration)->Self {
        CollectionSchedule { name: name.to_string(), hours, interval }
    }
}

lazy_static! {
    /// used for hours that are not covered by any configured schedule
    static ref FALLBACK_SCHEDULE: CollectionSchedule = CollectionSchedule::new( "off_peak", Vec::new(), Duration::from_secs(60));
}

#[derive(Debug,Clone,PartialEq)]
pub struct CollectionSchedules {
    schedules: Vec<CollectionSchedule>
}

impl CollectionSchedules {
    pub fn new (schedules: Vec<CollectionSchedule>)->Result<Self> {
        for s in &schedules {
            if let Some(h) = s.hours.iter().find( |h| **h > 23) {
                return Err( config_error( format!("schedule '{}' has invalid hour {h}", s.name)))
            }
            if s.interval.is_zero() {
                return Err( config_error( format!("schedule '{}' has zero interval", s.name)))
            }
        }
        Ok( CollectionSchedules { schedules } )
    }

    pub fn schedules (&self)->&[CollectionSchedule] { self.schedules.as_slice() }

    /// first schedule that lists `hour`, or the 60 sec off-peak fallback
    pub fn for_hour (&self, hour: u32)->&CollectionSchedule {
        self.schedules.iter().find( |s| s.hours.contains( &hour)).unwrap_or( &*FALLBACK_SCHEDULE)
    }

    /// schedule for the hour of `date` in its own timezone (use a station local timezone such as `chrono_tz::Europe::Amsterdam`)
    pub fn for_date<Tz: TimeZone> (&self, date: &DateTime<Tz>)->&CollectionSchedule {
        self.for_hour( date.hour())
    }
}

impl Default for CollectionSchedules {
    fn default()->Self {
        CollectionSchedules { schedules: default_schedules() }
    }
}

pub fn default_schedules ()->Vec<CollectionSchedule> {
    vec![
        CollectionSchedule::new( "peak", (6..21).collect(), Duration::from_secs(30)),
        CollectionSchedule::new( "off_peak", vec![5, 21, 22, 23], Duration::from_secs(60)),
        CollectionSchedule::new( "night", (0..5).collect(), Duration::from_secs(300)),
    ]
}
