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

//! GeoServer related endpoints: workspace/layer metadata, auth keys, the climate WMS and feature info

use serde_json::{Value, json};
use terraclim_common::net::HttpResponse;

use crate::client::{Query, ResourceClient};
use crate::errors::{Result, invalid_argument};
use crate::session::Session;
use crate::table::{NormalizeMode, Table};

const CLIMATE_WMS: &str = "geoserver/climate/wms";
const WMS_VERSION: &str = "1.3.0";

fn required<'s> (name: &str, value: &'s str)->Result<&'s str> {
    let value = value.trim();
    if value.is_empty() {
        Err( invalid_argument( format!("{name} is required")))
    } else {
        Ok(value)
    }
}

fn opt_str (v: Option<&str>)->Value {
    v.map( |s| Value::String(s.to_string())).unwrap_or(Value::Null)
}

/* #region info ************************************************************************************/

pub struct GeoServerInfo<'a> {
    client: ResourceClient<'a>
}

impl<'a> GeoServerInfo<'a> {
    pub fn new (session: &'a Session)->Result<Self> {
        Ok( GeoServerInfo { client: ResourceClient::new( session)? })
    }

    pub fn get_info (&self, workspace: &str)->Result<Table> {
        let query = Query::new().param( "workspace", required( "workspace", workspace)?);
        self.client.get_table( "geoserver-info/get_info/", &query, NormalizeMode::Plain)
    }

    pub fn get_layer_info (&self, layer_name: &str, workspace: &str)->Result<Table> {
        let layer_name = required( "layer name", layer_name)?;
        let query = Query::new().param( "workspace", required( "workspace", workspace)?);
        self.client.get_table( &format!("geoserver-info/get_info/{layer_name}/"), &query, NormalizeMode::Plain)
    }
}

/* #endregion info */

/* #region auth ************************************************************************************/

pub struct GeoServerAuth<'a> {
    client: ResourceClient<'a>
}

impl<'a> GeoServerAuth<'a> {
    pub fn new (session: &'a Session)->Result<Self> {
        Ok( GeoServerAuth { client: ResourceClient::new( session)? })
    }

    /// the key to use for direct GeoServer requests
    pub fn get_auth_key (&self)->Result<Table> {
        self.client.get_table( "geoserver/authkey", &Query::new(), NormalizeMode::Plain)
    }
}

/* #endregion auth */

/* #region climate WMS *****************************************************************************/

/// optional parameters of a WMS GetMap request
#[derive(Debug,Clone,Default)]
pub struct WmsMapRequest {
    /// YYYY-MM-DD
    pub date: Option<String>,
    /// climate variable, sent as WMS `layers`
    pub variable: Option<String>,
    /// "minx,miny,maxx,maxy"
    pub bbox: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

pub struct GeoServerClimate<'a> {
    client: ResourceClient<'a>
}

impl<'a> GeoServerClimate<'a> {
    pub fn new (session: &'a Session)->Result<Self> {
        Ok( GeoServerClimate { client: ResourceClient::new( session)? })
    }

    /// issue a GetMap request. The image itself is not kept, the result is a single row with the
    /// response content type/length and the request parameters
    pub fn get_climate_wms (&self, req: &WmsMapRequest)->Result<Table> {
        let query = Query::new()
            .param( "service", "WMS")
            .param( "version", WMS_VERSION)
            .param( "request", "GetMap")
            .param( "format", "image/png")
            .date_param( "time", req.date.as_deref())?
            .opt_param( "layers", req.variable.as_deref())
            .opt_param( "bbox", req.bbox.as_deref())
            .opt_param( "width", req.width)
            .opt_param( "height", req.height);

        let response = self.client.get_raw( CLIMATE_WMS, &query)?;

        Ok( Table::from_records( vec![ vec![
            ("content_type", opt_str( response.content_type())),
            ("content_length", opt_str( response.content_length())),
            ("date", opt_str( req.date.as_deref())),
            ("variable", opt_str( req.variable.as_deref())),
            ("bbox", opt_str( req.bbox.as_deref())),
            ("width", req.width.map( |w| json!(w)).unwrap_or(Value::Null)),
            ("height", req.height.map( |h| json!(h)).unwrap_or(Value::Null)),
        ]]))
    }

    /// the WMS capabilities document (XML) as `raw_content` column
    pub fn get_capabilities (&self)->Result<Table> {
        let query = Query::new()
            .param( "service", "WMS")
            .param( "version", WMS_VERSION)
            .param( "request", "GetCapabilities");

        let response: HttpResponse = self.client.get_raw( CLIMATE_WMS, &query)?;

        Ok( Table::from_records( vec![ vec![
            ("content_type", opt_str( response.content_type())),
            ("content_length", opt_str( response.content_length())),
            ("raw_content", Value::String( response.text().into_owned())),
        ]]))
    }
}

/* #endregion climate WMS */

/* #region feature info ****************************************************************************/

/// a WMS GetFeatureInfo style query for the pixel (x,y) of a map with the given bbox and size
#[derive(Debug,Clone)]
pub struct FeatureInfoRequest {
    pub x: u32,
    pub y: u32,
    pub bbox: String,
    pub width: u32,
    pub height: u32,
    /// comma separated layer names
    pub layers: String,
    /// defaults to `layers`
    pub query_layers: Option<String>,
    pub date: Option<String>,
}

pub struct GeoServerFeature<'a> {
    client: ResourceClient<'a>
}

impl<'a> GeoServerFeature<'a> {
    pub fn new (session: &'a Session)->Result<Self> {
        Ok( GeoServerFeature { client: ResourceClient::new( session)? })
    }

    pub fn get_feature_info (&self, req: &FeatureInfoRequest)->Result<Table> {
        let layers = required( "layers", &req.layers)?;
        let query_layers = req.query_layers.as_deref().filter( |s| !s.trim().is_empty()).unwrap_or( layers);

        let query = Query::new()
            .param( "x", req.x)
            .param( "y", req.y)
            .param( "bbox", required( "bbox", &req.bbox)?)
            .param( "width", req.width)
            .param( "height", req.height)
            .param( "layers", layers)
            .param( "query_layers", query_layers)
            .date_param( "time", req.date.as_deref())?;

        self.client.get_table( "geoserver/featureinfo/", &query, NormalizeMode::Plain)
    }
}

/* #endregion feature info */
