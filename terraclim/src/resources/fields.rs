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

pub struct Fields<'a> {
    client: ResourceClient<'a>
}

impl<'a> Fields<'a> {
    pub fn new (session: &'a Session)->Result<Self> {
        Ok( Fields { client: ResourceClient::new( session)? })
    }

    /// all fields, optionally restricted to a farm and/or farm portion
    pub fn get_fields (&self, farm_id: Option<u64>, portion_id: Option<u64>)->Result<Table> {
        let query = Query::new()
            .opt_param( "farm_id", farm_id)
            .opt_param( "portion_id", portion_id);
        self.client.get_table( "fields/", &query, NormalizeMode::Plain)
    }

    pub fn get_field (&self, field_id: u64)->Result<Table> {
        self.client.get_table( &format!("fields/{field_id}/"), &Query::new(), NormalizeMode::Plain)
    }

    pub fn get_field_statistics (&self, field_id: u64, start_date: Option<&str>, end_date: Option<&str>)->Result<Table> {
        let query = Query::new()
            .date_param( "start_date", start_date)?
            .date_param( "end_date", end_date)?;
        self.client.get_table( &format!("fields/{field_id}/statistics/"), &query, NormalizeMode::Flatten)
    }
}
