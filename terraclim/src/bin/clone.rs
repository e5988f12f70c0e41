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
use clap::Parser;
use terraclim::{CloneClient, cli::{ConnectionArgs, output_path, print_and_save}};

/// retrieve clonable model data from the TerraCLIM API and save it as CSV
#[derive(Parser,Debug)]
#[command(version, about)]
struct Args {
    #[command(flatten)]
    conn: ConnectionArgs,

    /// model type to filter by
    #[arg(long)]
    model_type: Option<String>,

    /// model instance to filter by
    #[arg(long)]
    instance_id: Option<u64>,

    /// output CSV file [default: clone_data.csv]
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main()->Result<()> {
    let args = Args::parse();
    let session = args.conn.open_session()?;

    let table = CloneClient::new( &session)?.get_clone_data( args.model_type.as_deref(), args.instance_id)?;
    print_and_save( &table, "clone records", &output_path( &args.output, "clone_data.csv"))?;

    Ok(())
}
