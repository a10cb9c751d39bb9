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

//! reconstruction of aircraft trajectories from irregularly sampled position reports.
//!
//! Observations are classified against configurable geographic zones ([`zone`]), tracked incrementally per
//! aircraft during collection ([`tracker`]) and split into trajectory segments from stored histories
//! ([`segment`]). Both paths grade trajectories with the same rule ([`quality::grade`]).

use std::{fs::File, io::BufReader, path::Path};
use serde::{Serialize,Deserialize};
use serde::de::DeserializeOwned;

pub mod errors;
pub use errors::*;

pub mod observation;
pub mod zone;
pub mod quality;
pub mod stats;
pub mod tracker;
pub mod segment;
pub mod schedule;
pub mod source;
pub mod collector;
pub mod analysis;

pub mod prelude {
    pub use crate::observation::{Observation,RawObservation};
    pub use crate::zone::{ZoneCategory,ZoneConfig,ZoneMembership,ZoneRegion,ZoneSet};
    pub use crate::quality::{grade,TrajectoryQuality};
    pub use crate::tracker::{AircraftTrackState,LocalTrackStore,SharedTrackStore,TrackStore,TrackUpdate,TrajectoryTracker};
    pub use crate::segment::{segment_history,SegmenterConfig,TrajectorySegment};
    pub use crate::schedule::{CollectionSchedule,CollectionSchedules};
    pub use crate::source::{CsvObservationSource,ObservationSource,VecObservationSource};
    pub use crate::collector::{CollectedPoint,Collector,CycleReport,PointSink};
    pub use crate::analysis::{reconstruct_all,TrajectorySummary};
    pub use crate::{load_config,TrajectoryConfig};
    pub use crate::errors::{OdinTrajectoryError,Result};
}

use zone::{ZoneConfig,ZoneSet};
use segment::SegmenterConfig;
use schedule::{CollectionSchedule,CollectionSchedules};

/// the startup configuration. All parts are read once and are not modified while running
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct TrajectoryConfig {
    #[serde(default)]
    pub zones: Vec<ZoneConfig>,

    #[serde(default)]
    pub segmenter: SegmenterConfig,

    #[serde(default = "schedule::default_schedules")]
    pub schedules: Vec<CollectionSchedule>,
}

impl TrajectoryConfig {
    pub fn zone_set (&self)->Result<ZoneSet> {
        ZoneSet::from_config( &self.zones)
    }

    pub fn collection_schedules (&self)->Result<CollectionSchedules> {
        CollectionSchedules::new( self.schedules.clone())
    }

    /// check all parts without keeping the results
    pub fn validate (&self)->Result<()> {
        self.zone_set()?;
        self.segmenter.validate()?;
        self.collection_schedules()?;
        Ok(())
    }
}

impl Default for TrajectoryConfig {
    fn default()->Self {
        TrajectoryConfig {
            zones: Vec::new(),
            segmenter: SegmenterConfig::default(),
            schedules: schedule::default_schedules()
        }
    }
}

/// load a RON config file
pub fn load_config<T: DeserializeOwned> (path: impl AsRef<Path>)->Result<T> {
    let file = File::open( path)?;
    Ok( ron::de::from_reader( BufReader::new(file))? )
}

/// parse RON config text
pub fn parse_config<T: DeserializeOwned> (input: &str)->Result<T> {
    Ok( ron::from_str( input)? )
}
