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

use crate::client::{Query, ResourceClient};
use crate::errors::Result;
use crate::session::Session;
use crate::table::{NormalizeMode, Table};

pub struct Farms<'a> {
    client: ResourceClient<'a>
}

impl<'a> Farms<'a> {
    pub fn new (session: &'a Session)->Result<Self> {
        Ok( Farms { client: ResourceClient::new( session)? })
    }

    pub fn get_farms (&self)->Result<Table> {
        self.client.get_table( "farms/", &Query::new(), NormalizeMode::Plain)
    }

    /// the raw JSON payload of `farms/`, which is needed to unpack farms that are returned keyed by id
    pub fn get_farms_value (&self)->Result<serde_json::Value> {
        self.client.get_value( "farms/", &Query::new())
    }

    pub fn get_farm (&self, farm_id: u64)->Result<Table> {
        self.client.get_table( &format!("farms/{farm_id}/"), &Query::new(), NormalizeMode::Plain)
    }

    /// statistics with nested values flattened into dotted columns
    pub fn get_farm_statistics (&self, farm_id: u64, start_date: Option<&str>, end_date: Option<&str>)->Result<Table> {
        let query = Query::new()
            .date_param( "start_date", start_date)?
            .date_param( "end_date", end_date)?;
        self.client.get_table( &format!("farms/{farm_id}/statistics/"), &query, NormalizeMode::Flatten)
    }
}
