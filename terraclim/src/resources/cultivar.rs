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

pub struct Cultivar<'a> {
    client: ResourceClient<'a>
}

impl<'a> Cultivar<'a> {
    pub fn new (session: &'a Session)->Result<Self> {
        Ok( Cultivar { client: ResourceClient::new( session)? })
    }

    pub fn get_cultivars (&self, crop_type_id: Option<u64>)->Result<Table> {
        let query = Query::new().opt_param( "crop_type_id", crop_type_id);
        self.client.get_table( "cultivar/", &query, NormalizeMode::Plain)
    }

    pub fn get_cultivar (&self, cultivar_id: u64)->Result<Table> {
        self.client.get_table( &format!("cultivar/{cultivar_id}/"), &Query::new(), NormalizeMode::Plain)
    }
}
