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

//! interpretation of raw HTTP responses and classification of their JSON payloads

use serde_json::{Map, Value};
use terraclim_common::net::HttpResponse;

use crate::errors::{Result, TerraClimError, api_error};

pub const HTML_RESPONSE_MSG: &str = "Received HTML response instead of JSON";
pub const INVALID_JSON_MSG: &str = "Invalid JSON response";
pub const AUTH_SERVICE_UNAVAILABLE_MSG: &str = "Authentication service unavailable";

/// the server occasionally leaks a serialized python exception instead of a token response
const SERVER_DEFECT_SIGNATURE: &str = "AttributeError";

/* #region interpreter ******************************************************************************/

/// decide if a response is a usable JSON payload. Returns the parsed body on success, an `ApiError`
/// with a human readable message otherwise
pub fn interpret_response (response: &HttpResponse)->Result<Value> {
    if response.is_html() {
        return Err( api_error( HTML_RESPONSE_MSG))
    }

    let value = response.parse_json().map_err( |_| api_error( INVALID_JSON_MSG))?;

    if has_server_defect_signature( &value) {
        return Err( api_error( AUTH_SERVICE_UNAVAILABLE_MSG))
    }

    if response.is_success() && (value.is_object() || value.is_array()) {
        Ok(value)
    } else {
        Err( api_error( error_message( &value)))
    }
}

/// status check for endpoints that do not return JSON (WMS images, capability documents).
/// Error messages are extracted the same way as in [`interpret_response`]
pub fn check_status (response: &HttpResponse)->Result<()> {
    if response.is_html() {
        return Err( api_error( HTML_RESPONSE_MSG))
    }
    if response.is_success() {
        return Ok(())
    }

    let msg = match response.parse_json() {
        Ok(value) => error_message( &value),
        Err(_) => {
            let text = response.text();
            if text.trim().is_empty() { format!("HTTP {}", response.status().as_u16()) } else { text.into_owned() }
        }
    };
    Err( api_error(msg))
}

/// `detail`, else `message`, else the whole body as a string
pub fn error_message (value: &Value)->String {
    if let Value::Object(map) = value {
        for key in ["detail", "message"] {
            if let Some(v) = map.get(key) {
                return value_to_string(v)
            }
        }
    }
    value_to_string(value)
}

fn value_to_string (v: &Value)->String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string()
    }
}

fn has_server_defect_signature (value: &Value)->bool {
    match value {
        Value::Object(map) => map.keys().any( |k| k.contains( SERVER_DEFECT_SIGNATURE)),
        _ => false
    }
}

/* #endregion interpreter */

/* #region payload classification *******************************************************************/

/// the shapes of JSON payloads we know how to turn into tables. The classification is done once
/// when entering the normalizer, everything downstream dispatches on this
#[derive(Debug,Clone,Copy,PartialEq)]
pub enum ApiResponse<'a> {
    /// null, false, 0, "", {} or []
    Empty,
    Object(&'a Map<String,Value>),
    Array(&'a [Value]),
    /// the `features` of a GeoJSON FeatureCollection
    FeatureCollection(&'a [Value]),
}

impl<'a> ApiResponse<'a> {
    pub fn classify (value: &'a Value)->Result<ApiResponse<'a>> {
        if is_falsy(value) {
            return Ok(ApiResponse::Empty)
        }

        match value {
            Value::Object(map) => {
                if map.get("type").and_then(Value::as_str) == Some("FeatureCollection") {
                    match map.get("features") {
                        Some(Value::Array(features)) => Ok( ApiResponse::FeatureCollection( features)),
                        Some(other) => Err( conversion_error( format!("FeatureCollection 'features' is {}", json_kind(other)))),
                        None => Err( conversion_error("FeatureCollection without 'features'"))
                    }
                } else {
                    Ok( ApiResponse::Object(map))
                }
            }
            Value::Array(elems) => Ok( ApiResponse::Array(elems)),
            other => Err( conversion_error( format!("cannot convert {} into table", json_kind(other))))
        }
    }

    pub fn is_empty (&self)->bool {
        matches!( self, ApiResponse::Empty)
    }
}

pub fn is_falsy (value: &Value)->bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map( |x| x == 0.0).unwrap_or(false),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

pub fn json_kind (value: &Value)->&'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub(crate) fn conversion_error (msg: impl ToString)->TerraClimError {
    TerraClimError::JsonError( msg.to_string())
}

/* #endregion payload classification */
