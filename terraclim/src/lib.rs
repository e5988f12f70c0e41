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

//! client library for the TerraCLIM agricultural data API. A [`Session`] obtains and holds a bearer token,
//! resource clients (farms, fields, irrigation, GeoServer, ..) issue authenticated GET requests and turn
//! the JSON/GeoJSON responses into [`Table`]s that can be written as CSV or handed to BI tools

pub mod errors;
pub use errors::{Result, TerraClimError};

pub mod config;
pub use config::TerraClimConfig;

pub mod response;
pub use response::{ApiResponse, interpret_response, check_status};

pub mod table;
pub use table::{Table, NormalizeMode, normalize};

pub mod session;
pub use session::Session;

pub mod client;
pub use client::{ResourceClient, Query};

pub mod resources;
pub use resources::*;

pub mod bi;
pub mod cli;

#[cfg(test)]
mod mock_connector;

pub const DEFAULT_BASE_URL: &str = "https://dashboard.staging.terraclim.co.za";
pub const DEFAULT_API_VERSION: &str = "v0";

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
