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
use terraclim::{ClimateFilter, cli::{ConnectionArgs, output_path, print_and_save}};

/// retrieve filtered climate data from the TerraCLIM API and save it as CSV
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
    /// list the available climate variables (saved to climate_variables.csv)
    Variables,
    /// get climate data
    Data {
        #[arg(long)]
        field_id: Option<u64>,
        /// start date (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<String>,
        /// end date (YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<String>,
        /// climate variable, e.g. rainfall
        #[arg(long)]
        variable: Option<String>,
        /// output CSV file [default: climate_data.csv]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main()->Result<()> {
    let args = Args::parse();
    let session = args.conn.open_session()?;
    let client = ClimateFilter::new( &session)?;

    match &args.command {
        Command::Variables => {
            let table = client.get_available_variables()?;
            print_and_save( &table, "variables", &PathBuf::from("climate_variables.csv"))?;
        }
        Command::Data { field_id, start_date, end_date, variable, output } => {
            let table = client.get_climate_data( *field_id, start_date.as_deref(), end_date.as_deref(), variable.as_deref())?;
            print_and_save( &table, "climate records", &output_path( output, "climate_data.csv"))?;
        }
    }

    Ok(())
}
