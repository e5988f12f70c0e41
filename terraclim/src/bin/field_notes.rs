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
use terraclim::{FieldNotes, cli::{ConnectionArgs, output_path, print_and_save, save_csv}};

/// retrieve field notes from the TerraCLIM API and save them as CSV
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
    /// list field notes
    List {
        #[arg(long)]
        field_id: Option<u64>,
        /// start date (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<String>,
        /// end date (YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<String>,
        /// output CSV file [default: field_notes.csv]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// a specific field note
    Get {
        note_id: u64,
        /// output CSV file [default: field_note_<id>.csv]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main()->Result<()> {
    let args = Args::parse();
    let session = args.conn.open_session()?;
    let client = FieldNotes::new( &session)?;

    match &args.command {
        Command::List { field_id, start_date, end_date, output } => {
            let table = client.get_field_notes( *field_id, start_date.as_deref(), end_date.as_deref())?;
            print_and_save( &table, "field notes", &output_path( output, "field_notes.csv"))?;
        }
        Command::Get { note_id, output } => {
            let table = client.get_field_note( *note_id)?;
            println!("{table}");
            save_csv( &table, &output_path( output, format!("field_note_{note_id}.csv")))?;
        }
    }

    Ok(())
}
