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
use terraclim::{GeoServerFeature, FeatureInfoRequest, cli::{ConnectionArgs, output_path, print_and_save}};

/// retrieve GeoServer feature information for a map location and save it as CSV
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
    /// feature information for pixel x,y of a map
    Info {
        /// x coordinate in pixels
        #[arg(long)]
        x: u32,
        /// y coordinate in pixels
        #[arg(long)]
        y: u32,
        /// bounding box minx,miny,maxx,maxy
        #[arg(long, allow_hyphen_values=true)]
        bbox: String,
        /// map width in pixels
        #[arg(long)]
        width: u32,
        /// map height in pixels
        #[arg(long)]
        height: u32,
        /// comma separated layer names
        #[arg(long)]
        layers: String,
        /// comma separated layers to query [default: --layers]
        #[arg(long)]
        query_layers: Option<String>,
        /// date of temporal data (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// output CSV file [default: feature_info.csv]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main()->Result<()> {
    let args = Args::parse();
    let session = args.conn.open_session()?;
    let client = GeoServerFeature::new( &session)?;

    match args.command {
        Command::Info { x, y, bbox, width, height, layers, query_layers, date, output } => {
            let req = FeatureInfoRequest { x, y, bbox, width, height, layers, query_layers, date };
            println!("Fetching feature info at ({x},{y})...");
            let table = client.get_feature_info( &req)?;
            print_and_save( &table, "features", &output_path( &output, "feature_info.csv"))?;
        }
    }

    Ok(())
}
