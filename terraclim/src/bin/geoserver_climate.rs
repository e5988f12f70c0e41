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
use terraclim::{GeoServerClimate, WmsMapRequest, cli::{ConnectionArgs, output_path, save_csv}};

/// query the climate WMS of the TerraCLIM GeoServer and save the response metadata as CSV
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
    /// get the WMS capabilities document (saved to wms_capabilities.csv)
    Capabilities,
    /// request a climate map
    Map {
        /// date of climate data (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// climate variable
        #[arg(long)]
        variable: Option<String>,
        /// bounding box minx,miny,maxx,maxy
        #[arg(long, allow_hyphen_values=true)]
        bbox: Option<String>,
        /// image width in pixels
        #[arg(long)]
        width: Option<u32>,
        /// image height in pixels
        #[arg(long)]
        height: Option<u32>,
        /// output CSV file [default: climate_wms.csv]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main()->Result<()> {
    let args = Args::parse();
    let session = args.conn.open_session()?;
    let client = GeoServerClimate::new( &session)?;

    match args.command {
        Command::Capabilities => {
            println!("Fetching WMS capabilities...");
            let table = client.get_capabilities()?;
            println!("{table}");
            save_csv( &table, &PathBuf::from("wms_capabilities.csv"))?;
        }
        Command::Map { date, variable, bbox, width, height, output } => {
            let req = WmsMapRequest { date, variable, bbox, width, height };
            println!("Fetching climate WMS data with {req:?}...");
            let table = client.get_climate_wms( &req)?;
            println!("{table}");
            save_csv( &table, &output_path( &output, "climate_wms.csv"))?;
        }
    }

    Ok(())
}
