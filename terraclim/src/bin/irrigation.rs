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
use terraclim::{Irrigation, cli::{ConnectionArgs, output_path, print_and_save, save_csv}};

/// retrieve irrigation records from the TerraCLIM API and save them as CSV
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
    /// list irrigation records
    List {
        #[arg(long)]
        field_id: Option<u64>,
        /// start date (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<String>,
        /// end date (YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<String>,
        /// output CSV file [default: irrigation_data.csv]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// a specific irrigation record
    Get {
        record_id: u64,
        /// output CSV file [default: irrigation_<id>.csv]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// irrigation summary of a field
    Summary {
        field_id: u64,
        /// start date (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<String>,
        /// end date (YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<String>,
        /// output CSV file [default: irrigation_summary_field_<id>.csv]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main()->Result<()> {
    let args = Args::parse();
    let session = args.conn.open_session()?;
    let client = Irrigation::new( &session)?;

    match &args.command {
        Command::List { field_id, start_date, end_date, output } => {
            let table = client.get_irrigation_data( *field_id, start_date.as_deref(), end_date.as_deref())?;
            print_and_save( &table, "irrigation records", &output_path( output, "irrigation_data.csv"))?;
        }
        Command::Get { record_id, output } => {
            let table = client.get_irrigation_record( *record_id)?;
            println!("{table}");
            save_csv( &table, &output_path( output, format!("irrigation_{record_id}.csv")))?;
        }
        Command::Summary { field_id, start_date, end_date, output } => {
            let table = client.get_irrigation_summary( *field_id, start_date.as_deref(), end_date.as_deref())?;
            println!("{table}");
            save_csv( &table, &output_path( output, format!("irrigation_summary_field_{field_id}.csv")))?;
        }
    }

    Ok(())
}
