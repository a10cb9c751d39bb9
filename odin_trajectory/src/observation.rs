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

use std::{fmt, sync::Arc};
use chrono::{DateTime,Utc};
use serde::{Serialize,Deserialize};
use geo::Point;
use uom::si::{
    f64::{Angle,Length,Velocity},
    angle::degree, length::{meter,foot}, velocity::{meter_per_second,knot}
};

use crate::errors::{OdinTrajectoryError,Result};

/// a single position report of an aircraft as it enters the core. Position is mandatory, all other
/// state vector elements are optional. Observations are only ever read once created - trackers and segmenters
/// take them by reference, segments hold clones
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct Observation {
    pub icao24: Arc<String>, // we keep that in an Arc so that we can clone without heap allocation
    pub callsign: Option<String>,
    pub date: DateTime<Utc>,

    pub latitude: f64,  // degrees
    pub longitude: f64, // degrees

    pub altitude: Option<Length>,
    pub ground_speed: Option<Velocity>,
    pub track: Option<Angle>,
    pub vertical_rate: Option<Velocity>,

    /// optional noise proxy (estimated dB at reference location) as computed by an external noise model
    pub noise_db: Option<f64>,
}

impl Observation {
    pub fn new (icao24: impl Into<String>, date: DateTime<Utc>, latitude: f64, longitude: f64)->Self {
        Observation {
            icao24: Arc::new(icao24.into()),
            callsign: None,
            date,
            latitude,
            longitude,
            altitude: None,
            ground_speed: None,
            track: None,
            vertical_rate: None,
            noise_db: None
        }
    }

    // builder style setters, only used while constructing

    pub fn with_callsign (mut self, cs: impl Into<String>)->Self { self.callsign = Some(cs.into()); self }
    pub fn with_altitude (mut self, alt: Length)->Self { self.altitude = Some(alt); self }
    pub fn with_ground_speed (mut self, spd: Velocity)->Self { self.ground_speed = Some(spd); self }
    pub fn with_track (mut self, trk: Angle)->Self { self.track = Some(trk); self }
    pub fn with_vertical_rate (mut self, vr: Velocity)->Self { self.vertical_rate = Some(vr); self }
    pub fn with_noise_db (mut self, db: f64)->Self { self.noise_db = Some(db); self }

    pub fn aircraft_id (&self)->&str { self.icao24.as_str() }

    /// note that geo uses x=longitude, y=latitude
    pub fn point (&self)->Point<f64> { Point::new( self.longitude, self.latitude) }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "Observation( icao24: {}", self.icao24)?;
        if let Some(cs) = &self.callsign { write!( f, ", cs: \"{cs}\"")?; }
        write!( f, ", pos: [{:.5},{:.5}]", self.latitude, self.longitude)?;
        if let Some(alt) = self.altitude { write!( f, ", alt: {:.0}ft", alt.get::<foot>())?; }
        if let Some(spd) = self.ground_speed { write!( f, ", spd: {:.1}kn", spd.get::<knot>())?; }
        if let Some(trk) = self.track { write!( f, ", trk: {:.0}", trk.get::<degree>())?; }
        if let Some(db) = self.noise_db { write!( f, ", noise: {:.1}dB", db)?; }
        write!( f, ", time: {})", self.date)
    }
}

/// the record as it comes from an observation provider (e.g. an OpenSky state vector or a stored CSV row).
/// Units are SI (meters, m/s) and degrees. Position fields might be missing, in which case the record has to be
/// dropped before it reaches the classifier or tracker
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct RawObservation {
    pub icao24: String,
    pub callsign: Option<String>,
    pub time: DateTime<Utc>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub baro_altitude: Option<f64>,
    pub velocity: Option<f64>,
    pub true_track: Option<f64>,
    pub vertical_rate: Option<f64>,
    pub noise_db: Option<f64>,
}

impl RawObservation {
    pub fn has_position (&self)->bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    /// turn into an [`Observation`] if the record has a position, otherwise return `None`
    pub fn into_observation (self)->Option<Observation> {
        let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) else { return None };

        // providers pad callsigns with blanks
        let callsign = self.callsign.map( |cs| cs.trim().to_string()).filter( |cs| !cs.is_empty());

        Some( Observation {
            icao24: Arc::new( self.icao24),
            callsign,
            date: self.time,
            latitude,
            longitude,
            altitude: self.baro_altitude.map( |v| Length::new::<meter>(v)),
            ground_speed: self.velocity.map( |v| Velocity::new::<meter_per_second>(v)),
            track: self.true_track.map( |v| Angle::new::<degree>(v)),
            vertical_rate: self.vertical_rate.map( |v| Velocity::new::<meter_per_second>(v)),
            noise_db: self.noise_db
        })
    }
}

impl TryFrom<RawObservation> for Observation {
    type Error = OdinTrajectoryError;

    fn try_from (raw: RawObservation)->Result<Self> {
        let id = raw.icao24.clone();
        raw.into_observation().ok_or( OdinTrajectoryError::MissingPosition(id))
    }
}
