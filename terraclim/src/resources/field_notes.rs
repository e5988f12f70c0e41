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

pub struct FieldNotes<'a> {
    client: ResourceClient<'a>
}

impl<'a> FieldNotes<'a> {
    pub fn new (session: &'a Session)->Result<Self> {
        Ok( FieldNotes { client: ResourceClient::new( session)? })
    }

    /// notes of all fields or a specific one, optionally within a date range
    pub fn get_field_notes (&self, field_id: Option<u64>, start_date: Option<&str>, end_date: Option<&str>)->Result<Table> {
        let query = Query::new()
            .opt_param( "field_id", field_id)
            .date_param( "start_date", start_date)?
            .date_param( "end_date", end_date)?;
        self.client.get_table( "field-notes/", &query, NormalizeMode::Plain)
    }

    pub fn get_field_note (&self, note_id: u64)->Result<Table> {
        self.client.get_table( &format!("field-notes/{note_id}/"), &Query::new(), NormalizeMode::Plain)
    }
}
