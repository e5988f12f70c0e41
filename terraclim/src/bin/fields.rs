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
use terraclim::{Fields, cli::{ConnectionArgs, output_path, print_and_save, save_csv}};

/// retrieve field data from the TerraCLIM API and save it as CSV
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
    /// list all fields
    List {
        /// only fields of this farm portion
        #[arg(long)]
        portion_id: Option<u64>,
        /// output CSV file [default: all_fields.csv]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// list the fields of a farm
    ListFarm {
        farm_id: u64,
        /// output CSV file [default: farm_<id>_fields.csv]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// details of a specific field
    Get {
        field_id: u64,
        /// output CSV file [default: field_<id>_details.csv]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// statistics of a specific field
    Stats {
        field_id: u64,
        /// start date (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<String>,
        /// end date (YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<String>,
        /// output CSV file [default: field_<id>_stats.csv]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main()->Result<()> {
    let args = Args::parse();
    let session = args.conn.open_session()?;
    let client = Fields::new( &session)?;

    match &args.command {
        Command::List { portion_id, output } => {
            println!("Fetching all fields...");
            let table = client.get_fields( None, *portion_id)?;
            print_and_save( &table, "fields", &output_path( output, "all_fields.csv"))?;
        }
        Command::ListFarm { farm_id, output } => {
            println!("Fetching fields of farm {farm_id}...");
            let table = client.get_fields( Some(*farm_id), None)?;
            print_and_save( &table, "fields", &output_path( output, format!("farm_{farm_id}_fields.csv")))?;
        }
        Command::Get { field_id, output } => {
            println!("Fetching details for field {field_id}...");
            let table = client.get_field( *field_id)?;
            println!("{table}");
            save_csv( &table, &output_path( output, format!("field_{field_id}_details.csv")))?;
        }
        Command::Stats { field_id, start_date, end_date, output } => {
            println!("Fetching statistics for field {field_id}...");
            let table = client.get_field_statistics( *field_id, start_date.as_deref(), end_date.as_deref())?;
            print_and_save( &table, "statistics records", &output_path( output, format!("field_{field_id}_stats.csv")))?;
        }
    }

    Ok(())
}
