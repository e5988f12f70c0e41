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

pub struct CropType<'a> {
    client: ResourceClient<'a>
}

impl<'a> CropType<'a> {
    pub fn new (session: &'a Session)->Result<Self> {
        Ok( CropType { client: ResourceClient::new( session)? })
    }

    pub fn get_crop_types (&self)->Result<Table> {
        self.client.get_table( "cropType/", &Query::new(), NormalizeMode::Plain)
    }

    pub fn get_crop_type (&self, crop_type_id: u64)->Result<Table> {
        self.client.get_table( &format!("cropType/{crop_type_id}/"), &Query::new(), NormalizeMode::Plain)
    }
}
