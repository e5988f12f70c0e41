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

//! an in-memory `HttpConnector` that replays canned responses and records requests (unit tests only)

use std::{cell::RefCell, collections::VecDeque, rc::Rc};
use reqwest::{header::HeaderMap, StatusCode};
use serde_json::Value;
use terraclim_common::net::{HttpConnector, HttpResponse, NetError, Result};

#[derive(Debug,Clone)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub headers: HeaderMap,
    pub query: Vec<(String,String)>,
    pub body: Option<Value>,
}

impl RecordedRequest {
    pub fn query_value (&self, key: &str)->Option<&str> {
        self.query.iter().find( |(k,_)| k == key).map( |(_,v)| v.as_str())
    }
}

#[derive(Default)]
struct MockState {
    responses: VecDeque<Result<HttpResponse>>,
    requests: Vec<RecordedRequest>,
}

/// clones share the same state so that tests can keep a handle after moving a clone into a `Session`
#[derive(Clone,Default)]
pub struct MockConnector {
    state: Rc<RefCell<MockState>>
}

impl MockConnector {
    pub fn new ()->Self { MockConnector::default() }

    pub fn respond (&self, response: HttpResponse) {
        self.state.borrow_mut().responses.push_back( Ok(response));
    }

    pub fn respond_json (&self, status: u16, body: &Value) {
        let status = StatusCode::from_u16(status).unwrap();
        self.respond( HttpResponse::from_json( status, body));
    }

    pub fn fail (&self, msg: &str) {
        self.state.borrow_mut().responses.push_back( Err( NetError::OpFailed( msg.to_string())));
    }

    pub fn requests (&self)->Vec<RecordedRequest> {
        self.state.borrow().requests.clone()
    }

    pub fn n_requests (&self)->usize {
        self.state.borrow().requests.len()
    }

    pub fn last_request (&self)->Option<RecordedRequest> {
        self.state.borrow().requests.last().cloned()
    }

    fn next_response (&self, req: RecordedRequest)->Result<HttpResponse> {
        let mut state = self.state.borrow_mut();
        state.requests.push( req);
        state.responses.pop_front().unwrap_or_else( || Err( NetError::OpFailed("connection refused".to_string())))
    }
}

impl HttpConnector for MockConnector {
    fn get (&self, url: &str, headers: &HeaderMap, query: &[(String,String)])->Result<HttpResponse> {
        self.next_response( RecordedRequest {
            method: "GET", url: url.to_string(), headers: headers.clone(), query: query.to_vec(), body: None
        })
    }

    fn post_json (&self, url: &str, headers: &HeaderMap, body: &Value)->Result<HttpResponse> {
        self.next_response( RecordedRequest {
            method: "POST", url: url.to_string(), headers: headers.clone(), query: Vec::new(), body: Some(body.clone())
        })
    }
}
