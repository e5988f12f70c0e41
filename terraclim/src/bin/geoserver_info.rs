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
use terraclim::{GeoServerInfo, cli::{ConnectionArgs, output_path, save_csv}};

/// retrieve GeoServer workspace and layer information and save it as CSV
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
    /// information about a workspace
    Info {
        #[arg(long)]
        workspace: String,
        /// output CSV file [default: geoserver_info.csv]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// information about a layer of a workspace
    Layer {
        layer_name: String,
        #[arg(long)]
        workspace: String,
        /// output CSV file [default: layer_<name>_info.csv]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main()->Result<()> {
    let args = Args::parse();
    let session = args.conn.open_session()?;
    let client = GeoServerInfo::new( &session)?;

    match &args.command {
        Command::Info { workspace, output } => {
            println!("Fetching GeoServer info for workspace {workspace}...");
            let table = client.get_info( workspace)?;
            println!("{table}");
            save_csv( &table, &output_path( output, "geoserver_info.csv"))?;
        }
        Command::Layer { layer_name, workspace, output } => {
            println!("Fetching info for layer {layer_name} in workspace {workspace}...");
            let table = client.get_layer_info( layer_name, workspace)?;
            println!("{table}");
            save_csv( &table, &output_path( output, format!("layer_{layer_name}_info.csv")))?;
        }
    }

    Ok(())
}
