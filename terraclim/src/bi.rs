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

//! entry points for BI tools. Every function logs in with the given (or configured) credentials, fetches
//! one dataset and always returns a [`Table`]: failures are reported as a single row table with an `error` column

use chrono::Local;
use serde_json::{Map, Value, json};
use tracing::{error, info};

use crate::config::TerraClimConfig;
use crate::errors::{Result, TerraClimError, api_error, auth_error};
use crate::resources::{Extent, FarmPortions, Farms, FieldNotes, Fields, GeoServerInfo};
use crate::session::Session;
use crate::table::{NormalizeMode, Table, normalize};

pub const AUTH_FAILED_MSG: &str = "Authentication failed. Please check your credentials.";
pub const NETWORK_ERROR_MSG: &str = "Network error. Please check your internet connection.";

/// columns a farm portions table has to have
pub const FARM_PORTION_COLUMNS: [&str; 2] = ["geometry", "farm_portion_id"];

/// farm columns we add to the fields in `get_farm_fields`
const FARM_JOIN_COLUMNS: [&str; 3] = ["farm_id", "farm_name", "farmer_name"];
const FARM_FIELDS_FIRST_COLUMNS: [&str; 7] = ["farm_id", "farm_name", "farmer_name", "field_id", "field_name", "area_ha", "user_id"];

pub fn get_farms (config: &TerraClimConfig, username: Option<&str>, password: Option<&str>)->Table {
    run( "get_farms", config, username, password, |session| {
        Farms::new(session)?.get_farms()
    })
}

pub fn get_fields (config: &TerraClimConfig, username: Option<&str>, password: Option<&str>)->Table {
    run( "get_fields", config, username, password, |session| {
        Fields::new(session)?.get_fields( None, None)
    })
}

pub fn get_field_notes (config: &TerraClimConfig, username: Option<&str>, password: Option<&str>, field_id: Option<u64>)->Table {
    run( "get_field_notes", config, username, password, |session| {
        FieldNotes::new(session)?.get_field_notes( field_id, None, None)
    })
}

pub fn get_geoserver_info (config: &TerraClimConfig, username: Option<&str>, password: Option<&str>, workspace: &str)->Table {
    run( "get_geoserver_info", config, username, password, |session| {
        GeoServerInfo::new(session)?.get_info( workspace)
    })
}

/// farm portions within `extent` ([minx, miny, maxx, maxy]), checked for the expected portion columns
pub fn get_farm_portions (config: &TerraClimConfig, username: Option<&str>, password: Option<&str>, extent: &[f64], farm_id: Option<u64>)->Table {
    run( "get_farm_portions", config, username, password, |session| {
        let extent = Extent::from_slice( extent)?;
        let table = FarmPortions::new(session)?.get_farm_portions( &extent, farm_id)?;

        table.validate( &FARM_PORTION_COLUMNS).map_err( |e| {
            error!("{}", e);
            api_error( format!("Invalid farm portions data returned: {}", validation_msg(&e)))
        })?;
        info!("retrieved {} farm portions", table.n_rows());
        Ok(table)
    })
}

/// fields joined with the id, name and farmer of the farm they belong to
pub fn get_farm_fields (config: &TerraClimConfig, username: Option<&str>, password: Option<&str>)->Table {
    run( "get_farm_fields", config, username, password, |session| {
        let farms = farm_table( &Farms::new(session)?.get_farms_value()?);
        info!("retrieved {} farms", farms.n_rows());

        let fields = Fields::new(session)?.get_fields( None, None)?;
        info!("retrieved {} fields", fields.n_rows());

        let join_columns: Vec<&str> = FARM_JOIN_COLUMNS.iter().copied().filter( |c| farms.has_column(c)).collect();
        let farms = farms.select( &join_columns)?;

        let mut table = fields.left_join( &farms, "farm", "farm_id")?;
        table.rename_column( "farm", "farm_id");
        table.reorder_first( &FARM_FIELDS_FIRST_COLUMNS);
        Ok(table)
    })
}

/// version and platform information for troubleshooting
pub fn version_info ()->Table {
    Table::from_records( vec![ vec![
        ("terraclim_version", json!(crate::VERSION)),
        ("os", json!(std::env::consts::OS)),
        ("arch", json!(std::env::consts::ARCH)),
        ("timestamp", json!(Local::now().to_rfc3339())),
    ]])
}

/// farms are either returned as list or as object keyed by farm id. In both cases we want one row per
/// farm with a `farm_id` column, without the (large) `farm_boundary` geometry
pub fn farm_table (value: &Value)->Table {
    let records: Vec<Map<String,Value>> = match value {
        Value::Object(map) if !map.is_empty() && map.values().all( Value::is_object) => {
            map.iter().filter_map( |(id,farm)| {
                farm.as_object().map( |farm| {
                    let mut rec = farm.clone();
                    rec.insert( "farm_id".to_string(), json!(id));
                    rec
                })
            }).collect()
        }
        _ => {
            let table = normalize( value, NormalizeMode::Plain);
            (0..table.n_rows()).filter_map( |i| table.record(i)).map( |mut rec| {
                if !rec.contains_key("farm_id") {
                    if let Some(id) = rec.get("id").cloned() { rec.insert( "farm_id".to_string(), id); }
                }
                rec
            }).collect()
        }
    };

    Table::from_records( records.into_iter().map( |rec| {
        rec.into_iter().filter( |(k,_)| k != "farm_boundary").collect::<Vec<(String,Value)>>()
    }))
}

/// the common login / fetch / error conversion
fn run<F> (name: &str, config: &TerraClimConfig, username: Option<&str>, password: Option<&str>, f: F)->Table
    where F: FnOnce(&Session)->Result<Table>
{
    info!("{} started", name);
    match login( config, username, password).and_then( |session| f(&session)) {
        Ok(table) => table,
        Err(e) => {
            error!("{} failed: {}", name, e);
            error_table( &e)
        }
    }
}

fn login (config: &TerraClimConfig, username: Option<&str>, password: Option<&str>)->Result<Session> {
    let mut session = Session::live( config.clone())?;
    if session.login( username, password)? {
        Ok(session)
    } else {
        Err( auth_error( session.last_error().unwrap_or("Failed to authenticate with provided credentials")))
    }
}

/// map errors to the messages BI users get to see
pub fn error_table (e: &TerraClimError)->Table {
    match e {
        TerraClimError::AuthError(_) | TerraClimError::NotAuthenticated => Table::error_table( AUTH_FAILED_MSG),
        TerraClimError::ApiError(msg) => Table::error_table( format!("API Error: {msg}")),
        TerraClimError::NetError(_) => Table::error_table( NETWORK_ERROR_MSG),
        other => Table::error_table( format!("Unexpected error: {other}"))
    }
}

fn validation_msg (e: &TerraClimError)->String {
    match e {
        TerraClimError::DataValidationError(msg) => msg.clone(),
        other => other.to_string()
    }
}
