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

use std::time::Duration;
use anyhow::Result;
use clap::Parser;
use lazy_static::lazy_static;
use tracing::info;
use tracing_subscriber::EnvFilter;

use odin_trajectory::{
    load_config, TrajectoryConfig,
    analysis::{reconstruct_all, write_segments_json, TrajectorySummary},
    source::{read_observations, CsvObservationSource},
};

#[derive(Parser)]
#[command(about="reconstruct aircraft trajectories from a stored observation history")]
struct CliOpts {
    #[arg(help="filename of trajectory config", short, long, default_value="configs/schiphol.ron")]
    config: String,

    #[arg(help="override max gap between consecutive observations of a segment (sec)", long)]
    max_gap: Option<u64>,

    #[arg(help="override min number of points per segment", long)]
    min_points: Option<usize>,

    #[arg(help="optional filename to store reconstructed segments as JSON", short, long)]
    output: Option<String>,

    #[arg(help="print each reconstructed segment", short, long)]
    verbose: bool,

    #[arg(help="CSV file with observation history")]
    history: String,
}

lazy_static! { static ref ARGS: CliOpts = CliOpts::parse(); }

fn main ()->Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::from_default_env())  // use RUST_LOG to set max level
        .init();

    let mut config: TrajectoryConfig = load_config( &ARGS.config)?;
    if let Some(secs) = ARGS.max_gap { config.segmenter.max_gap = Duration::from_secs(secs) }
    if let Some(n) = ARGS.min_points { config.segmenter.min_points = n }
    config.validate()?;

    let zones = config.zone_set()?;
    let source = CsvObservationSource::new( &ARGS.history);
    let (observations,n_dropped) = read_observations( &source)?;
    info!("read {} observations ({} without position)", observations.len(), n_dropped);

    let segments = reconstruct_all( observations, &zones, &config.segmenter)?;

    if ARGS.verbose {
        for s in &segments { println!("{s}") }
        println!();
    }
    print!("{}", TrajectorySummary::from_segments( &segments));

    if let Some(path) = &ARGS.output {
        write_segments_json( path, &segments)?;
        info!("{} segments written to {}", segments.len(), path);
    }

    Ok(())
}
