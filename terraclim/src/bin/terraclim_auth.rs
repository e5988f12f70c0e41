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

use anyhow::Result;
use clap::{Parser, Subcommand};
use terraclim::{Session, cli::ConnectionArgs, session::format_token};

/// log in to the TerraCLIM API and show the obtained tokens.
/// Credentials default to $TERRACLIM_USERNAME and $TERRACLIM_PASSWORD, which is preferable over
/// passing them on the command line
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
    /// log in and show the new tokens (use --user/--pass to override configured credentials)
    Login,
    /// log in and then refresh the access token
    Refresh,
    /// show if we can authenticate with the configured credentials
    Status,
}

fn print_tokens (session: &Session, prefix: &str) {
    println!("{prefix}Access Token: {}", format_token( session.access_token()));
    println!("{prefix}Refresh Token: {}", format_token( session.refresh_token()));
}

fn main()->Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Login => {
            let session = args.conn.open_session()?;
            println!("Successfully logged in!");
            print_tokens( &session, "");
        }
        Command::Refresh => {
            let mut session = args.conn.open_session()?;
            if session.refresh_tokens() {
                println!("Successfully refreshed tokens!");
                print_tokens( &session, "New ");
            } else {
                println!("Token refresh failed: {}", session.last_error().unwrap_or("unknown reason"));
            }
        }
        Command::Status => {
            match args.conn.open_session() {
                Ok(session) => {
                    println!("Status: Authenticated");
                    println!("Server: {}", session.config().base_url);
                    print_tokens( &session, "");
                }
                Err(e) => {
                    println!("Status: Not authenticated ({e})");
                }
            }
        }
    }

    Ok(())
}
