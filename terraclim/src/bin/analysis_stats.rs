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
use terraclim::{AnalysisStats, cli::{ConnectionArgs, output_path, print_and_save}};

/// retrieve analysis statistics (default period is the last 60 days) and save them as CSV
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
    /// get analysis statistics
    Get {
        /// start date (YYYY-MM-DD), defaults to 60 days before the end date
        #[arg(long)]
        start_date: Option<String>,
        /// end date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        end_date: Option<String>,
        /// comma separated field ids, e.g. 1,2,3
        #[arg(long, value_delimiter=',')]
        fields: Vec<u64>,
        /// output CSV file [default: analysis_stats.csv]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main()->Result<()> {
    let args = Args::parse();
    let session = args.conn.open_session()?;
    let client = AnalysisStats::new( &session)?;

    match &args.command {
        Command::Get { start_date, end_date, fields, output } => {
            let table = client.get_analysis_stats( start_date.as_deref(), end_date.as_deref(), fields)?;
            print_and_save( &table, "analysis records", &output_path( output, "analysis_stats.csv"))?;
        }
    }

    Ok(())
}
