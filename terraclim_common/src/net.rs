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

//! common utility types for (blocking) network operations

use std::{borrow::Cow, time::Duration};
use reqwest::{blocking::Client, header::{HeaderMap, HeaderValue, CONTENT_TYPE}, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::define_error;

define_error!{ pub NetError =
    HttpError(#[from] reqwest::Error) : "http error: {0}",
    OpFailed(String) : "operation failed: {0}"
}

pub type Result<T> = std::result::Result<T, NetError>;

/// a fully received HTTP response. We read the body eagerly since all our responses are small
/// and we need to inspect both headers and body before deciding how to interpret them
#[derive(Debug,Clone)]
pub struct HttpResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl HttpResponse {
    pub fn new (status: StatusCode, headers: HeaderMap, body: impl Into<Vec<u8>>)->Self {
        HttpResponse { status, headers, body: body.into() }
    }

    /// a response with a JSON body and respective content-type header
    pub fn from_json (status: StatusCode, value: &Value)->Self {
        let mut headers = HeaderMap::new();
        headers.insert( CONTENT_TYPE, HeaderValue::from_static("application/json"));
        HttpResponse::new( status, headers, value.to_string())
    }

    /// a response with given content type and raw body text
    pub fn from_text (status: StatusCode, content_type: &str, text: &str)->Self {
        let mut headers = HeaderMap::new();
        if let Ok(hv) = HeaderValue::from_str( content_type) {
            headers.insert( CONTENT_TYPE, hv);
        }
        HttpResponse::new( status, headers, text)
    }

    pub fn status (&self)->StatusCode { self.status }

    pub fn is_success (&self)->bool { self.status.is_success() }

    pub fn headers (&self)->&HeaderMap { &self.headers }

    pub fn header (&self, name: &str)->Option<&str> {
        self.headers.get(name).and_then( |v| v.to_str().ok())
    }

    pub fn content_type (&self)->Option<&str> { self.header( CONTENT_TYPE.as_str()) }

    pub fn content_length (&self)->Option<&str> { self.header("content-length") }

    pub fn is_html (&self)->bool {
        self.content_type().map( |ct| ct.to_ascii_lowercase().contains("text/html")).unwrap_or(false)
    }

    pub fn body (&self)->&[u8] { &self.body }

    pub fn text (&self)->Cow<'_,str> { String::from_utf8_lossy( &self.body) }

    pub fn parse_json (&self)->serde_json::Result<Value> { serde_json::from_slice( &self.body) }
}

/// the abstraction over how we talk to the server. The live implementation uses a blocking reqwest client,
/// tests use canned responses
pub trait HttpConnector {
    fn get (&self, url: &str, headers: &HeaderMap, query: &[(String,String)])->Result<HttpResponse>;
    fn post_json (&self, url: &str, headers: &HeaderMap, body: &Value)->Result<HttpResponse>;
}

pub struct LiveHttpConnector {
    client: Client
}

impl LiveHttpConnector {
    pub fn new ()->Result<Self> {
        Ok( LiveHttpConnector { client: Client::builder().build()? } )
    }

    pub fn with_timeout (timeout: Duration)->Result<Self> {
        Ok( LiveHttpConnector { client: Client::builder().timeout( timeout).build()? } )
    }

    fn receive (response: reqwest::blocking::Response)->Result<HttpResponse> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes()?.to_vec();
        Ok( HttpResponse { status, headers, body } )
    }
}

impl HttpConnector for LiveHttpConnector {
    fn get (&self, url: &str, headers: &HeaderMap, query: &[(String,String)])->Result<HttpResponse> {
        debug!("GET {} {:?}", url, query);
        let response = self.client.get(url)
            .headers( headers.clone())
            .query( query)
            .send()?;
        Self::receive( response)
    }

    fn post_json (&self, url: &str, headers: &HeaderMap, body: &Value)->Result<HttpResponse> {
        debug!("POST {}", url);
        let response = self.client.post(url)
            .headers( headers.clone())
            .json( body)
            .send()?;
        Self::receive( response)
    }
}
