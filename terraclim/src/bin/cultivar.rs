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
use terraclim::{Cultivar, cli::{ConnectionArgs, output_path, print_and_save, save_csv}};

/// retrieve cultivars from the TerraCLIM API and save them as CSV
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
    /// list cultivars
    List {
        /// only cultivars of this crop type
        #[arg(long)]
        crop_type_id: Option<u64>,
        /// output CSV file [default: cultivars.csv]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// details of a specific cultivar
    Get {
        cultivar_id: u64,
        /// output CSV file [default: cultivar_<id>.csv]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main()->Result<()> {
    let args = Args::parse();
    let session = args.conn.open_session()?;
    let client = Cultivar::new( &session)?;

    match &args.command {
        Command::List { crop_type_id, output } => {
            let table = client.get_cultivars( *crop_type_id)?;
            print_and_save( &table, "cultivars", &output_path( output, "cultivars.csv"))?;
        }
        Command::Get { cultivar_id, output } => {
            let table = client.get_cultivar( *cultivar_id)?;
            println!("{table}");
            save_csv( &table, &output_path( output, format!("cultivar_{cultivar_id}.csv")))?;
        }
    }

    Ok(())
}
