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
use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use terraclim::{Farms, cli::{ConnectionArgs, output_path, print_and_save, save_csv}};

/// retrieve farm data from the TerraCLIM API and save it as CSV
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
    /// list all farms
    List {
        /// output CSV file [default: farms.csv]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// details of a specific farm
    Get {
        farm_id: u64,
        /// output CSV file [default: farm_<id>.csv]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// statistics of a specific farm
    Stats {
        farm_id: u64,
        /// start date (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<String>,
        /// end date (YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<String>,
        /// output CSV file [default: farm_<id>_stats.csv]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// save the ids of all farms to farm_ids.csv
    ExtractIds,
}

fn main()->Result<()> {
    let args = Args::parse();
    let session = args.conn.open_session()?;
    let client = Farms::new( &session)?;

    match &args.command {
        Command::List { output } => {
            println!("Fetching all farms...");
            let table = client.get_farms()?;
            print_and_save( &table, "farms", &output_path( output, "farms.csv"))?;
        }
        Command::Get { farm_id, output } => {
            println!("Fetching details for farm {farm_id}...");
            let table = client.get_farm( *farm_id)?;
            println!("{table}");
            save_csv( &table, &output_path( output, format!("farm_{farm_id}.csv")))?;
        }
        Command::Stats { farm_id, start_date, end_date, output } => {
            println!("Fetching statistics for farm {farm_id}...");
            let table = client.get_farm_statistics( *farm_id, start_date.as_deref(), end_date.as_deref())?;
            print_and_save( &table, "statistics records", &output_path( output, format!("farm_{farm_id}_stats.csv")))?;
        }
        Command::ExtractIds => {
            println!("Fetching farms to extract ids...");
            let table = client.get_farms()?;
            if !table.has_column("id") {
                bail!("could not extract farm ids")
            }
            save_csv( &table.select( &["id"])?, &PathBuf::from("farm_ids.csv"))?;
        }
    }

    Ok(())
}
