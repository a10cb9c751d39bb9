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

use chrono::{DateTime,Utc};
use serde::{Serialize,Deserialize};

/// elapsed seconds from `earlier` to `later` (millisecond resolution, negative if `later` precedes `earlier`)
#[inline]
pub fn gap_seconds (earlier: &DateTime<Utc>, later: &DateTime<Utc>)->f64 {
    (*later - *earlier).num_milliseconds() as f64 / 1000.0
}

/// mean interval in seconds between `point_count` observations that span `duration_secs`. Used by both the
/// streaming tracker and the batch segmenter, their grades have to agree
pub fn mean_interval (duration_secs: f64, point_count: usize)->f64 {
    if point_count > 1 { duration_secs / (point_count - 1) as f64 } else { 0.0 }
}

/// min/max/avg of some attribute over a set of observations
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct Extremes<T> {
    pub min: T,
    pub max: T,
    pub avg: T,
}

impl Extremes<f64> {
    pub fn map<U,F> (&self, f: F)->Extremes<U> where F: Fn(f64)->U {
        Extremes { min: f(self.min), max: f(self.max), avg: f(self.avg) }
    }
}

/// a simple incremental min/max/avg accumulator
#[derive(Debug,Clone)]
pub struct MinMaxAvg {
    pub n: usize,
    pub min: f64,
    pub max: f64,
    pub avg: f64
}

impl MinMaxAvg {
    pub fn new()->Self { MinMaxAvg { n: 0, min: f64::MAX, max: f64::MIN, avg: f64::NAN } }

    /// add a new observation
    pub fn add (&mut self, x: f64) {
        self.n += 1;

        if self.n > 1 {
            self.avg = self.avg + (x - self.avg) / self.n as f64;
            if x < self.min { self.min = x }
            if x > self.max { self.max = x }
        } else {
            self.min = x;
            self.max = x;
            self.avg = x;
        }
    }

    /// add if there is a value. Missing values do not count
    pub fn add_opt (&mut self, x: Option<f64>) {
        if let Some(x) = x { self.add(x) }
    }

    pub fn extremes (&self)->Option<Extremes<f64>> {
        if self.n > 0 { Some( Extremes { min: self.min, max: self.max, avg: self.avg }) } else { None }
    }
}

impl Default for MinMaxAvg {
    fn default()->Self { MinMaxAvg::new() }
}

/// statistics of time gaps between consecutive observations (in seconds)
#[derive(Debug,Clone,Copy,PartialEq,Default,Serialize,Deserialize)]
pub struct GapStats {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// sample standard deviation, 0 for less than two gaps
    pub stddev: f64,
}

impl GapStats {
    /// compute from an ordered sequence of timestamps
    pub fn from_dates<'a,I> (dates: I)->Self where I: IntoIterator<Item=&'a DateTime<Utc>> {
        let mut count = 0usize;
        let mut mean = 0.0;
        let mut m2 = 0.0;
        let mut min = f64::MAX;
        let mut max = f64::MIN;
        let mut prev: Option<&DateTime<Utc>> = None;

        for d in dates {
            if let Some(p) = prev {
                let gap = gap_seconds( p, d);
                count += 1;
                let delta = gap - mean;
                mean += delta / count as f64;
                m2 += delta * (gap - mean);
                if gap < min { min = gap }
                if gap > max { max = gap }
            }
            prev = Some(d);
        }

        if count == 0 {
            GapStats::default()
        } else {
            let stddev = if count > 1 { (m2 / (count - 1) as f64).sqrt() } else { 0.0 };
            GapStats { count, mean, min, max, stddev }
        }
    }
}
