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

//! trajectory reconstruction quality grades. This is the one rule that has to be shared between the
//! streaming tracker (grading after each update) and the batch segmenter (grading after reconstruction),
//! which is why there is only one [`grade`] function.

use serde::{Serialize,Deserialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

#[derive(Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Hash,Serialize,Deserialize,Display,EnumString,AsRefStr,EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TrajectoryQuality {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl TrajectoryQuality {
    pub const LOWEST: TrajectoryQuality = TrajectoryQuality::Poor;
}

/// minimum point count and maximum mean interval (in seconds) required for a grade
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct QualityThreshold {
    pub quality: TrajectoryQuality,
    pub min_points: usize,
    pub max_mean_interval: f64,
}

/// ordered from highest to lowest grade, first match wins. Everything that does not match is `Poor`
pub const QUALITY_THRESHOLDS: [QualityThreshold;3] = [
    QualityThreshold { quality: TrajectoryQuality::Excellent, min_points: 30, max_mean_interval: 35.0 },
    QualityThreshold { quality: TrajectoryQuality::Good,      min_points: 20, max_mean_interval: 60.0 },
    QualityThreshold { quality: TrajectoryQuality::Fair,      min_points: 10, max_mean_interval: 120.0 },
];

/// grade a trajectory with `point_count` points and a mean inter-arrival interval of `mean_interval` seconds
pub fn grade (point_count: usize, mean_interval: f64)->TrajectoryQuality {
    QUALITY_THRESHOLDS.iter()
        .find( |t| point_count >= t.min_points && mean_interval <= t.max_mean_interval)
        .map( |t| t.quality)
        .unwrap_or( TrajectoryQuality::LOWEST)
}
