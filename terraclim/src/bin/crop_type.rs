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
use terraclim::{CropType, cli::{ConnectionArgs, output_path, print_and_save, save_csv}};

/// retrieve crop types from the TerraCLIM API and save them as CSV
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
    /// list all crop types
    List {
        /// output CSV file [default: crop_types.csv]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// details of a specific crop type
    Get {
        crop_type_id: u64,
        /// output CSV file [default: crop_type_<id>.csv]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main()->Result<()> {
    let args = Args::parse();
    let session = args.conn.open_session()?;
    let client = CropType::new( &session)?;

    match &args.command {
        Command::List { output } => {
            let table = client.get_crop_types()?;
            print_and_save( &table, "crop types", &output_path( output, "crop_types.csv"))?;
        }
        Command::Get { crop_type_id, output } => {
            let table = client.get_crop_type( *crop_type_id)?;
            println!("{table}");
            save_csv( &table, &output_path( output, format!("crop_type_{crop_type_id}.csv")))?;
        }
    }

    Ok(())
}
