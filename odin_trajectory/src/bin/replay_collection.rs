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

use std::{collections::BTreeMap, sync::Arc};
use anyhow::Result;
use chrono::Utc;
use chrono_tz::Tz;
use clap::Parser;
use lazy_static::lazy_static;
use tracing_subscriber::EnvFilter;

use odin_trajectory::{
    load_config, TrajectoryConfig,
    collector::{CollectedPoint, Collector},
    quality::TrajectoryQuality,
    source::CsvObservationSource,
    tracker::{SharedTrackStore, TrackStore, TrajectoryTracker},
};

#[derive(Parser)]
#[command(about="replay a stored observation history through the streaming trajectory tracker")]
struct CliOpts {
    #[arg(help="filename of trajectory config", short, long, default_value="configs/schiphol.ron")]
    config: String,

    #[arg(help="timezone of the collection station (selects the collection schedule)", long, default_value="Europe/Amsterdam")]
    tz: String,

    #[arg(help="number of aircraft to list", short, long, default_value_t=20)]
    top: usize,

    #[arg(help="CSV file with observation history")]
    history: String,
}

lazy_static! { static ref ARGS: CliOpts = CliOpts::parse(); }

fn main ()->Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::from_default_env())
        .init();

    let config: TrajectoryConfig = load_config( &ARGS.config)?;
    let tz: Tz = ARGS.tz.parse().map_err( |e| anyhow::anyhow!("invalid timezone {}: {e}", ARGS.tz))?;

    let zones = Arc::new( config.zone_set()?);
    let tracker = TrajectoryTracker::new( SharedTrackStore::new());
    let mut collector = Collector::new( zones, tracker, config.collection_schedules()?);

    let source = CsvObservationSource::new( &ARGS.history);
    let mut points: Vec<CollectedPoint> = Vec::new();
    let report = collector.collect_cycle( &source, &mut points, &Utc::now().with_timezone(&tz))?;
    println!("{report}");

    let stats = collector.stats();
    for (zone,n) in &stats.area_hits { println!("  area {zone:<20} {n}") }
    for (zone,n) in &stats.corridor_hits { println!("  corridor {zone:<16} {n}") }

    let mut states = collector.tracker().store().snapshot();
    let mut by_quality: BTreeMap<TrajectoryQuality,usize> = BTreeMap::new();
    for s in &states { *by_quality.entry( s.quality).or_insert(0) += 1 }

    println!("\n{} aircraft tracked:", states.len());
    for (q,n) in by_quality.iter().rev() { println!("  {:<10} {}", q.as_ref(), n) }

    states.sort_by( |a,b| b.point_count.cmp( &a.point_count));
    println!();
    for s in states.iter().take( ARGS.top) { println!("{s}") }

    Ok(())
}
