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

//! farm portions within a bounding box, returned as GeoJSON FeatureCollection (EPSG:3857 geometries)

use std::{fmt, str::FromStr};

use crate::client::{Query, ResourceClient};
use crate::errors::{Result, TerraClimError, api_error, invalid_argument};
use crate::response::ApiResponse;
use crate::session::Session;
use crate::table::{NormalizeMode, Table, normalize};

/// bounding box `[minx, miny, maxx, maxy]` in the coordinate system of the server (Web Mercator)
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Extent {
    pub fn new (min_x: f64, min_y: f64, max_x: f64, max_y: f64)->Result<Self> {
        if [min_x, min_y, max_x, max_y].iter().all( |x| x.is_finite()) {
            Ok( Extent { min_x, min_y, max_x, max_y })
        } else {
            Err( invalid_argument("All extent coordinates must be numbers"))
        }
    }

    pub fn from_slice (coords: &[f64])->Result<Self> {
        match coords {
            [min_x, min_y, max_x, max_y] => Extent::new( *min_x, *min_y, *max_x, *max_y),
            _ => Err( invalid_argument("Extent must be a list of 4 coordinates [minx, miny, maxx, maxy]"))
        }
    }
}

/// the query parameter format, e.g. "[2086038.1755925221, -4033790.723493586, 2112561.824407478, -4007477.276506414]"
impl fmt::Display for Extent {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        write!(f, "[{:?}, {:?}, {:?}, {:?}]", self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

/// parses "minx,miny,maxx,maxy" (optionally enclosed in brackets)
impl FromStr for Extent {
    type Err = TerraClimError;

    fn from_str (s: &str)->Result<Self> {
        let s = s.trim().trim_start_matches('[').trim_end_matches(']');
        let coords = s.split(',')
            .map( |c| c.trim().parse::<f64>().map_err( |_| invalid_argument( format!("invalid extent coordinate '{}'", c.trim()))))
            .collect::<Result<Vec<f64>>>()?;
        Extent::from_slice( &coords)
    }
}

pub struct FarmPortions<'a> {
    client: ResourceClient<'a>
}

impl<'a> FarmPortions<'a> {
    pub fn new (session: &'a Session)->Result<Self> {
        Ok( FarmPortions { client: ResourceClient::new( session)? })
    }

    /// portions within `extent`, optionally restricted to one farm. The table has the feature `id`, `type`
    /// and `geometry` columns followed by the portion properties
    pub fn get_farm_portions (&self, extent: &Extent, farm_id: Option<u64>)->Result<Table> {
        let query = Query::new()
            .opt_param( "farm_id", farm_id)
            .param( "extent", extent);

        let value = self.client.get_value( "farms/portions/", &query)?;
        match ApiResponse::classify( &value) {
            Ok(ApiResponse::FeatureCollection(_)) => Ok( normalize( &value, NormalizeMode::Plain)),
            _ => Err( api_error("Invalid response format: Expected GeoJSON FeatureCollection"))
        }
    }
}
