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

//! the streaming trajectory tracker. It keeps one [`AircraftTrackState`] per aircraft id in an explicitly
//! owned [`TrackStore`], which is either a [`LocalTrackStore`] for a single collection loop or a
//! [`SharedTrackStore`] if several observation sources update the same tracker concurrently.
//! Each update is a read-modify-write of one aircraft state that is executed while the store holds
//! exclusive access to that entry.

use std::{cell::RefCell, collections::HashMap, fmt, sync::Arc};
use chrono::{DateTime,Utc};
use serde::{Serialize,Deserialize};
use dashmap::{DashMap, mapref::entry::Entry};

use crate::{
    errors::{OdinTrajectoryError,Result},
    observation::Observation,
    quality::{grade,TrajectoryQuality},
    stats::{gap_seconds, mean_interval}
};

/* #region track state ***************************************************************************************/

/// the running summary of a tracked aircraft. Created on first observation, never expires
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct AircraftTrackState {
    pub icao24: Arc<String>,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    pub point_count: usize,

    /// lifetime arithmetic mean of all gaps between consecutive observations, in seconds.
    /// This is never reset, i.e. a single long gap permanently raises it
    pub mean_interval: f64,

    pub quality: TrajectoryQuality,
}

impl AircraftTrackState {
    pub fn new (icao24: Arc<String>, date: DateTime<Utc>)->Self {
        AircraftTrackState {
            icao24,
            first_seen: date,
            last_seen: date,
            point_count: 1,
            mean_interval: 0.0,
            quality: grade( 1, 0.0)
        }
    }

    /// add an observation at `date`. The state is not modified if `date` precedes `last_seen`
    pub fn advance (&mut self, date: DateTime<Utc>)->Result<TrackUpdate> {
        if date < self.last_seen {
            return Err( OdinTrajectoryError::NonMonotonicObservation {
                aircraft_id: self.icao24.to_string(),
                last_seen: self.last_seen,
                date
            })
        }

        let gap = gap_seconds( &self.last_seen, &date);
        self.point_count += 1;
        self.last_seen = date;

        // sum of all gaps is the lifetime duration. Has to use the same arithmetic as the segmenter
        self.mean_interval = mean_interval( self.duration_secs(), self.point_count);
        self.quality = grade( self.point_count, self.mean_interval);

        Ok( TrackUpdate { point_count: self.point_count, gap, quality: self.quality } )
    }

    pub fn duration_secs (&self)->f64 { gap_seconds( &self.first_seen, &self.last_seen) }
}

impl fmt::Display for AircraftTrackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "AircraftTrackState( icao24: {}, n: {}, mean_interval: {:.1}s, quality: {}, first: {}, last: {})",
                self.icao24, self.point_count, self.mean_interval, self.quality, self.first_seen, self.last_seen)
    }
}

/// what a single tracker update returns to the caller
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct TrackUpdate {
    pub point_count: usize,
    /// seconds since the previous observation of this aircraft (0 for the first one)
    pub gap: f64,
    pub quality: TrajectoryQuality,
}

/* #endregion track state */

/* #region track stores **************************************************************************************/

/// abstraction of the per-aircraft state repository. Implementations have to guarantee that `update` or
/// `insert` run while no other update for the same aircraft id can interleave
pub trait TrackStore {
    /// run `update` on the existing state for `aircraft_id` or, if there is none, store the state returned by `insert`
    fn update_or_insert<R,U,I> (&self, aircraft_id: &str, update: U, insert: I)->R
        where U: FnOnce(&mut AircraftTrackState)->R, I: FnOnce()->(AircraftTrackState,R);

    fn get (&self, aircraft_id: &str)->Option<AircraftTrackState>;

    /// drop the state of an aircraft (e.g. after the caller decided to reset it)
    fn remove (&self, aircraft_id: &str)->Option<AircraftTrackState>;

    /// store `state` under its aircraft id, replacing any previous state
    fn insert (&self, state: AircraftTrackState)->Option<AircraftTrackState>;

    fn len (&self)->usize;

    fn is_empty (&self)->bool { self.len() == 0 }

    /// cloned states ordered by aircraft id
    fn snapshot (&self)->Vec<AircraftTrackState>;
}

/// store for a single collection loop. This is not `Sync`, use a [`SharedTrackStore`] if updates come from
/// several threads
#[derive(Debug,Default)]
pub struct LocalTrackStore {
    map: RefCell<HashMap<String,AircraftTrackState>>
}

impl LocalTrackStore {
    pub fn new ()->Self { LocalTrackStore { map: RefCell::new( HashMap::new()) } }
}

impl TrackStore for LocalTrackStore {
    fn update_or_insert<R,U,I> (&self, aircraft_id: &str, update: U, insert: I)->R
        where U: FnOnce(&mut AircraftTrackState)->R, I: FnOnce()->(AircraftTrackState,R)
    {
        let mut map = self.map.borrow_mut();
        if let Some(state) = map.get_mut( aircraft_id) {
            update( state)
        } else {
            let (state,r) = insert();
            map.insert( aircraft_id.to_string(), state);
            r
        }
    }

    fn get (&self, aircraft_id: &str)->Option<AircraftTrackState> {
        self.map.borrow().get( aircraft_id).cloned()
    }

    fn remove (&self, aircraft_id: &str)->Option<AircraftTrackState> {
        self.map.borrow_mut().remove( aircraft_id)
    }

    fn insert (&self, state: AircraftTrackState)->Option<AircraftTrackState> {
        self.map.borrow_mut().insert( state.icao24.to_string(), state)
    }

    fn len (&self)->usize { self.map.borrow().len() }

    fn snapshot (&self)->Vec<AircraftTrackState> {
        let mut list: Vec<AircraftTrackState> = self.map.borrow().values().cloned().collect();
        list.sort_by( |a,b| a.icao24.cmp( &b.icao24));
        list
    }
}

/// concurrent store. DashMap entries are locked for the duration of `update_or_insert`, which keeps
/// concurrent updates of the same aircraft from interleaving
#[derive(Debug,Default)]
pub struct SharedTrackStore {
    map: DashMap<String,AircraftTrackState>
}

impl SharedTrackStore {
    pub fn new ()->Self { SharedTrackStore { map: DashMap::new() } }
}

impl TrackStore for SharedTrackStore {
    fn update_or_insert<R,U,I> (&self, aircraft_id: &str, update: U, insert: I)->R
        where U: FnOnce(&mut AircraftTrackState)->R, I: FnOnce()->(AircraftTrackState,R)
    {
        // fast path without key allocation for known aircraft
        if let Some(mut e) = self.map.get_mut( aircraft_id) {
            return update( e.value_mut())
        }

        match self.map.entry( aircraft_id.to_string()) {
            Entry::Occupied(mut e) => update( e.get_mut()), // somebody else was faster
            Entry::Vacant(e) => {
                let (state,r) = insert();
                e.insert( state);
                r
            }
        }
    }

    fn get (&self, aircraft_id: &str)->Option<AircraftTrackState> {
        self.map.get( aircraft_id).map( |e| e.value().clone())
    }

    fn remove (&self, aircraft_id: &str)->Option<AircraftTrackState> {
        self.map.remove( aircraft_id).map( |(_,v)| v)
    }

    fn insert (&self, state: AircraftTrackState)->Option<AircraftTrackState> {
        self.map.insert( state.icao24.to_string(), state)
    }

    fn len (&self)->usize { self.map.len() }

    fn snapshot (&self)->Vec<AircraftTrackState> {
        let mut list: Vec<AircraftTrackState> = self.map.iter().map( |e| e.value().clone()).collect();
        list.sort_by( |a,b| a.icao24.cmp( &b.icao24));
        list
    }
}

/* #endregion track stores */

/* #region tracker *******************************************************************************************/

/// the streaming tracker. It does not deduplicate - feeding the same observation twice counts it twice
#[derive(Debug,Default)]
pub struct TrajectoryTracker<S: TrackStore = LocalTrackStore> {
    store: S
}

impl<S: TrackStore> TrajectoryTracker<S> {
    pub fn new (store: S)->Self { TrajectoryTracker { store } }

    /// record an observation of `aircraft_id` at `date`
    pub fn update (&self, aircraft_id: &str, date: DateTime<Utc>)->Result<TrackUpdate> {
        self.store.update_or_insert( aircraft_id,
            |state| state.advance( date),
            || {
                let state = AircraftTrackState::new( Arc::new( aircraft_id.to_string()), date);
                let update = TrackUpdate { point_count: state.point_count, gap: 0.0, quality: state.quality };
                (state, Ok(update))
            }
        )
    }

    pub fn update_with (&self, obs: &Observation)->Result<TrackUpdate> {
        self.update( obs.aircraft_id(), obs.date)
    }

    pub fn state (&self, aircraft_id: &str)->Option<AircraftTrackState> { self.store.get( aircraft_id) }

    /// forget everything about an aircraft, the next observation starts a new state
    pub fn reset (&self, aircraft_id: &str)->Option<AircraftTrackState> { self.store.remove( aircraft_id) }

    /// set the state of an aircraft back to a previously obtained `state()` result (`None` forgets the aircraft)
    pub fn restore (&self, aircraft_id: &str, previous: Option<AircraftTrackState>) {
        match previous {
            Some(state) => { self.store.insert( state); }
            None => { self.store.remove( aircraft_id); }
        }
    }

    pub fn len (&self)->usize { self.store.len() }
    pub fn is_empty (&self)->bool { self.store.is_empty() }

    pub fn store (&self)->&S { &self.store }
    pub fn into_store (self)->S { self.store }
}

/* #endregion tracker */
