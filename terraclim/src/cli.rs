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

//! helpers shared by the command line tools in `src/bin`

use std::path::{Path, PathBuf};
use anyhow::{anyhow, Result};
use clap::Args;
use tracing_subscriber::EnvFilter;

use crate::config::TerraClimConfig;
use crate::session::Session;
use crate::table::Table;

/// number of rows we show on the terminal
pub const SAMPLE_ROWS: usize = 5;

/// connection options every tool accepts
#[derive(Args,Debug,Clone)]
pub struct ConnectionArgs {
    /// TerraCLIM username (defaults to $TERRACLIM_USERNAME)
    #[arg(long, global=true)]
    pub user: Option<String>,

    /// TerraCLIM password (defaults to $TERRACLIM_PASSWORD)
    #[arg(long, global=true)]
    pub pass: Option<String>,

    /// RON config file, overlaid by TERRACLIM_* environment variables
    #[arg(long, global=true)]
    pub config: Option<PathBuf>,

    /// log debug output (RUST_LOG takes precedence)
    #[arg(short, long, global=true)]
    pub verbose: bool,
}

impl ConnectionArgs {
    pub fn load_config (&self)->Result<TerraClimConfig> {
        let config = match &self.config {
            Some(path) => TerraClimConfig::from_ron_file( path)?,
            None => TerraClimConfig::from_env()?
        };
        Ok(config)
    }

    /// init logging, load the config and log in
    pub fn open_session (&self)->Result<Session> {
        init_tracing( self.verbose);

        let mut session = Session::live( self.load_config()?)?;
        if session.login( self.user.as_deref(), self.pass.as_deref())? {
            Ok(session)
        } else {
            Err( anyhow!("Failed to authenticate: {}", session.last_error().unwrap_or("unknown reason")))
        }
    }
}

/// install a fmt subscriber that logs to stderr. The level is taken from RUST_LOG, or
/// defaults to `debug` for our crates if `verbose` is set and `warn` otherwise
pub fn init_tracing (verbose: bool) {
    let default_filter = if verbose { "warn,terraclim=debug,terraclim_common=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else( |_| EnvFilter::new( default_filter));

    // only fails if there already is a global subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter( filter)
        .with_writer( std::io::stderr)
        .try_init();
}

/// print row count and a sample of the table, then save it as CSV
pub fn print_and_save (table: &Table, label: &str, output: &Path)->Result<()> {
    println!("Total {label}: {}", table.n_rows());
    print_sample( table, label);
    save_csv( table, output)
}

pub fn print_sample (table: &Table, label: &str) {
    if !table.is_empty() {
        println!("\nSample of {label} data:");
        println!("{}", table.head( SAMPLE_ROWS));
    }
}

pub fn save_csv (table: &Table, output: &Path)->Result<()> {
    table.write_csv( output)?;
    println!("\nData saved to {}", output.display());
    Ok(())
}

/// the explicit output path or the tool specific default
pub fn output_path (output: &Option<PathBuf>, default: impl Into<PathBuf>)->PathBuf {
    output.clone().unwrap_or_else( || default.into())
}
