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

use thiserror::Error;
use chrono::{DateTime,Utc};

pub type Result<T> = std::result::Result<T, OdinTrajectoryError>;

#[derive(Error,Debug)]
pub enum OdinTrajectoryError {

    /// a streaming update that precedes the last seen time of a tracked aircraft. The tracker does not
    /// clamp or reorder, it is up to the caller to drop the observation or reset the aircraft state
    #[error("non-monotonic observation for {aircraft_id}: {date} precedes last seen {last_seen}")]
    NonMonotonicObservation { aircraft_id: String, last_seen: DateTime<Utc>, date: DateTime<Utc> },

    /// batch history is not in ascending time order (index of first offending observation)
    #[error("history of {aircraft_id} not sorted by time at index {index}")]
    UnsortedHistory { aircraft_id: String, index: usize },

    /// batch history contains observations of more than one aircraft
    #[error("history of {expected} contains observation of {found}")]
    MixedHistory { expected: String, found: String },

    #[error("observation of {0} has no position")]
    MissingPosition(String),

    #[error("config error {0}")]
    ConfigError(String),

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("RON parse error {0}")]
    RonError( #[from] ron::error::SpannedError),

    #[error("RON serialization error {0}")]
    RonSerError( #[from] ron::Error),

    #[error("JSON error {0}")]
    JsonError( #[from] serde_json::Error),

    #[error("CSV error {0}")]
    CsvError( #[from] csv::Error),

    /// a generic error
    #[error("operation failed {0}")]
    OpFailed(String)
}

impl OdinTrajectoryError {
    /// is this the kind of error a collection loop can skip over (the observation is dropped, the cycle continues)
    pub fn is_recoverable (&self)->bool {
        matches!( self, OdinTrajectoryError::NonMonotonicObservation{..} | OdinTrajectoryError::MissingPosition(_))
    }
}

pub fn op_failed (msg: impl ToString)->OdinTrajectoryError {
    OdinTrajectoryError::OpFailed(msg.to_string())
}

pub fn config_error (msg: impl ToString)->OdinTrajectoryError {
    OdinTrajectoryError::ConfigError(msg.to_string())
}
