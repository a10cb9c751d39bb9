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

//! geographic zones used to classify observations. Zones come in two categories:
//! `Area` zones are non-exclusive (an observation can be inside "core" and "extended" at the same time),
//! `Corridor` zones are exclusive with the first match in configured order winning.
//! Containment is boundary inclusive for both bounding boxes and polygons.

use std::{collections::HashSet, fmt, sync::Arc};
use serde::{Serialize,Deserialize};
use geo::{Coord, Intersects, LineString, Point, Polygon, Rect};

use crate::observation::Observation;
use crate::errors::{config_error, Result};

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize)]
pub enum ZoneCategory {
    Area,
    Corridor
}

/// the serializable region description
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub enum ZoneRegion {
    BoundingBox { west: f64, south: f64, east: f64, north: f64 },

    /// exterior ring as (longitude,latitude) degree tuples. Does not have to be closed
    Polygon { exterior: Vec<(f64,f64)> }
}

/// zone configuration entry as it is stored in config files
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct ZoneConfig {
    pub name: String,
    pub category: ZoneCategory,
    pub region: ZoneRegion,
}

impl ZoneConfig {
    pub fn area (name: impl ToString, region: ZoneRegion)->Self {
        ZoneConfig { name: name.to_string(), category: ZoneCategory::Area, region }
    }
    pub fn corridor (name: impl ToString, region: ZoneRegion)->Self {
        ZoneConfig { name: name.to_string(), category: ZoneCategory::Corridor, region }
    }
}

#[derive(Debug,Clone)]
enum ZoneGeometry {
    Box(Rect<f64>),
    Polygon(Polygon<f64>)
}

impl ZoneGeometry {
    fn from_region (name: &str, region: &ZoneRegion)->Result<Self> {
        match region {
            ZoneRegion::BoundingBox { west, south, east, north } => {
                if ![*west,*south,*east,*north].iter().all( |v| v.is_finite()) {
                    return Err( config_error( format!("zone '{name}' has non-finite bounds")))
                }
                if west > east || south > north {
                    return Err( config_error( format!("zone '{name}' has inverted bounds")))
                }
                Ok( ZoneGeometry::Box( Rect::new( Coord{x: *west, y: *south}, Coord{x: *east, y: *north})))
            }
            ZoneRegion::Polygon { exterior } => {
                if exterior.iter().any( |(lon,lat)| !lon.is_finite() || !lat.is_finite()) {
                    return Err( config_error( format!("zone '{name}' has non-finite vertices")))
                }
                let mut coords: Vec<Coord<f64>> = exterior.iter().map( |(lon,lat)| Coord{ x: *lon, y: *lat }).collect();
                coords.dedup();
                if coords.len() > 1 && coords.first() == coords.last() { coords.pop(); }
                if coords.len() < 3 {
                    return Err( config_error( format!("zone '{name}' polygon needs at least 3 distinct vertices")))
                }
                // LineString::new does not close, Polygon::new does
                Ok( ZoneGeometry::Polygon( Polygon::new( LineString::new(coords), Vec::new())))
            }
        }
    }

    fn contains (&self, p: &Point<f64>)->bool {
        match self {
            ZoneGeometry::Box(rect) => p.intersects(rect),
            ZoneGeometry::Polygon(poly) => p.intersects(poly)
        }
    }
}

/// a validated zone that can be used to test positions
#[derive(Debug,Clone)]
pub struct Zone {
    name: Arc<String>,
    category: ZoneCategory,
    geometry: ZoneGeometry,
}

impl Zone {
    pub fn from_config (config: &ZoneConfig)->Result<Self> {
        if config.name.trim().is_empty() {
            return Err( config_error("zone without name"))
        }
        let geometry = ZoneGeometry::from_region( &config.name, &config.region)?;
        Ok( Zone { name: Arc::new( config.name.clone()), category: config.category, geometry } )
    }

    pub fn name (&self)->&str { self.name.as_str() }
    pub fn category (&self)->ZoneCategory { self.category }

    pub fn contains (&self, p: &Point<f64>)->bool { self.geometry.contains(p) }
}

/// the result of classifying a single position
#[derive(Debug,Clone,Default,PartialEq,Serialize,Deserialize)]
pub struct ZoneMembership {
    /// all matching area zones, in configured order
    pub areas: Vec<Arc<String>>,

    /// first matching corridor zone in configured order, if any
    pub corridor: Option<Arc<String>>,
}

impl ZoneMembership {
    pub fn is_empty (&self)->bool { self.areas.is_empty() && self.corridor.is_none() }

    pub fn in_area (&self, name: &str)->bool { self.areas.iter().any( |a| a.as_str() == name) }

    pub fn in_corridor (&self, name: &str)->bool { self.corridor.as_ref().is_some_and( |c| c.as_str() == name) }

    /// is the position inside the named zone, regardless of zone category
    pub fn is_in (&self, name: &str)->bool { self.in_area(name) || self.in_corridor(name) }
}

impl fmt::Display for ZoneMembership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "areas: [")?;
        for (i,a) in self.areas.iter().enumerate() {
            if i > 0 { write!( f, ",")?; }
            write!( f, "{a}")?;
        }
        match &self.corridor {
            Some(c) => write!( f, "], corridor: {c}"),
            None => write!( f, "], corridor: none")
        }
    }
}

/// the static, ordered set of configured zones. This is created once at startup and then shared read-only
/// (wrap in an `Arc` if used from several sources)
#[derive(Debug,Clone,Default)]
pub struct ZoneSet {
    zones: Vec<Zone>
}

impl ZoneSet {
    pub fn new ()->Self { ZoneSet { zones: Vec::new() } }

    pub fn from_config (configs: &[ZoneConfig])->Result<Self> {
        let mut names: HashSet<&str> = HashSet::with_capacity( configs.len());
        let mut zones: Vec<Zone> = Vec::with_capacity( configs.len());

        for zc in configs {
            if !names.insert( zc.name.as_str()) {
                return Err( config_error( format!("duplicated zone name '{}'", zc.name)))
            }
            zones.push( Zone::from_config( zc)?);
        }

        Ok( ZoneSet { zones } )
    }

    pub fn len (&self)->usize { self.zones.len() }
    pub fn is_empty (&self)->bool { self.zones.is_empty() }

    pub fn zones (&self)->&[Zone] { self.zones.as_slice() }
    pub fn get (&self, name: &str)->Option<&Zone> { self.zones.iter().find( |z| z.name() == name) }

    /// zone names in configured order
    pub fn zone_names (&self)->impl Iterator<Item=&str> { self.zones.iter().map( |z| z.name()) }

    pub fn classify (&self, obs: &Observation)->ZoneMembership {
        self.classify_point( &obs.point())
    }

    pub fn classify_position (&self, latitude: f64, longitude: f64)->ZoneMembership {
        self.classify_point( &Point::new( longitude, latitude))
    }

    /// the single dispatch over zone categories
    pub fn classify_point (&self, p: &Point<f64>)->ZoneMembership {
        let mut membership = ZoneMembership::default();

        for zone in &self.zones {
            match zone.category {
                ZoneCategory::Area => {
                    if zone.contains(p) { membership.areas.push( zone.name.clone()) }
                }
                ZoneCategory::Corridor => {
                    if membership.corridor.is_none() && zone.contains(p) { membership.corridor = Some( zone.name.clone()) }
                }
            }
        }

        membership
    }
}
