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
use clap::{Parser, Subcommand};
use terraclim::{Extent, FarmPortions, cli::{ConnectionArgs, output_path, print_and_save}};

/// retrieve farm portions (GeoJSON features in EPSG:3857) within a bounding box and save them as CSV
#[derive(Parser,Debug)]
#[command(version, about)]
struct Args {
    #[command(flatten)]
    conn: ConnectionArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand,Debug)]
enum Command {
    /// list farm portions within an extent
    List {
        /// bounding box minx,miny,maxx,maxy, e.g. 2086038.17,-4033790.72,2112561.82,-4007477.27
        #[arg(long, allow_hyphen_values=true)]
        extent: Extent,
        /// output CSV file [default: farm_portions.csv]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// list the portions of a farm within an extent
    ListFarm {
        farm_id: u64,
        /// bounding box minx,miny,maxx,maxy
        #[arg(long, allow_hyphen_values=true)]
        extent: Extent,
        /// output CSV file [default: farm_<id>_portions.csv]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main()->Result<()> {
    let args = Args::parse();
    let session = args.conn.open_session()?;
    let client = FarmPortions::new( &session)?;

    match &args.command {
        Command::List { extent, output } => {
            println!("Fetching farm portions within extent {extent}...");
            let table = client.get_farm_portions( extent, None)?;
            print_and_save( &table, "portions", &output_path( output, "farm_portions.csv"))?;
        }
        Command::ListFarm { farm_id, extent, output } => {
            println!("Fetching portions for farm {farm_id} within extent {extent}...");
            let table = client.get_farm_portions( extent, Some(*farm_id))?;
            print_and_save( &table, "portions", &output_path( output, format!("farm_{farm_id}_portions.csv")))?;
        }
    }

    Ok(())
}
