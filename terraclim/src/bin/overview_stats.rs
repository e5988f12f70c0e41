/*
 * Copyright © 2025, TerraCLIM client contributors. All rights reserved.
 *
 * The “TerraCLIM client” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use std::path::PathBuf;
use anyhow::Result;
use clap::Parser;
use terraclim::{OverviewStats, cli::{ConnectionArgs, output_path, print_and_save}};

/// retrieve overview statistics of a farm or field and save them as CSV
#[derive(Parser,Debug)]
#[command(version, about)]
struct Args {
    #[command(flatten)]
    conn: ConnectionArgs,

    #[arg(long, required_unless_present="field_id")]
    farm_id: Option<u64>,

    /// field (within the farm, if --farm-id is also given)
    #[arg(long)]
    field_id: Option<u64>,

    /// output CSV file [default: overview_stats.csv]
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main()->Result<()> {
    let args = Args::parse();
    let session = args.conn.open_session()?;

    let table = OverviewStats::new( &session)?.get_overview_stats( args.farm_id, args.field_id)?;
    print_and_save( &table, "overview records", &output_path( &args.output, "overview_stats.csv"))?;

    Ok(())
}
