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

//! observation sources. A source is a lazy, restartable sequence of raw provider records - every call of
//! [`ObservationSource::observations`] starts a new pass. Fetching from actual flight data providers is not
//! part of this crate, the CSV source reads records that were stored by such a fetcher

use std::{fs::File, path::{Path,PathBuf}};
use tracing::{debug,warn};

use crate::{
    errors::{OdinTrajectoryError, Result},
    observation::{Observation,RawObservation}
};

pub type ObservationIter<'a> = Box<dyn Iterator<Item=Result<RawObservation>> + 'a>;

pub trait ObservationSource {
    fn name (&self)->&str;

    /// start a new pass over the records of this source
    fn observations (&self)->Result<ObservationIter<'_>>;
}

/// CSV file source with header
/// `icao24,callsign,time,latitude,longitude,baro_altitude,velocity,true_track,vertical_rate,noise_db`.
/// Times are RFC 3339, empty fields are read as missing values
pub struct CsvObservationSource {
    name: String,
    path: PathBuf,
}

impl CsvObservationSource {
    pub fn new (path: impl AsRef<Path>)->Self {
        let path = path.as_ref().to_path_buf();
        let name = path.file_stem().map( |s| s.to_string_lossy().to_string()).unwrap_or_else( || "csv".to_string());
        CsvObservationSource { name, path }
    }

    pub fn path (&self)->&Path { self.path.as_path() }
}

impl ObservationSource for CsvObservationSource {
    fn name (&self)->&str { self.name.as_str() }

    fn observations (&self)->Result<ObservationIter<'_>> {
        debug!("reading observations from {:?}", self.path);
        let reader = csv::Reader::from_path( &self.path)?;
        Ok( Box::new( reader.into_deserialize::<RawObservation>().map( |r| r.map_err( OdinTrajectoryError::from))))
    }
}

/// in-memory source, mostly for replay and tests
pub struct VecObservationSource {
    name: String,
    records: Vec<RawObservation>
}

impl VecObservationSource {
    pub fn new (name: impl ToString, records: Vec<RawObservation>)->Self {
        VecObservationSource { name: name.to_string(), records }
    }
}

impl ObservationSource for VecObservationSource {
    fn name (&self)->&str { self.name.as_str() }

    fn observations (&self)->Result<ObservationIter<'_>> {
        Ok( Box::new( self.records.iter().cloned().map( Ok)))
    }
}

/// store raw records in the CSV format read by [`CsvObservationSource`]
pub fn write_csv (path: impl AsRef<Path>, records: &[RawObservation])->Result<()> {
    let mut writer = csv::Writer::from_path( path)?;
    for r in records {
        writer.serialize( r)?;
    }
    writer.flush()?;
    Ok(())
}

/// read a full pass of `source`, dropping records without position. Returns the observations in source
/// order and the number of dropped records
pub fn read_observations (source: &dyn ObservationSource)->Result<(Vec<Observation>,usize)> {
    let mut list: Vec<Observation> = Vec::new();
    let mut n_dropped = 0;

    for r in source.observations()? {
        let raw = r?;
        match raw.into_observation() {
            Some(obs) => list.push( obs),
            None => n_dropped += 1
        }
    }

    if n_dropped > 0 {
        warn!("dropped {} records without position from {}", n_dropped, source.name());
    }
    Ok( (list, n_dropped) )
}
