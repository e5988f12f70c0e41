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

//! authentication against the TerraCLIM token endpoints. A `Session` holds the access/refresh token pair
//! and the request headers that resource clients attach to every request

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde_json::{json, Value};
use terraclim_common::{abbreviate, net::{HttpConnector, HttpResponse, LiveHttpConnector}};
use tracing::{debug, info, warn, error};

use crate::config::TerraClimConfig;
use crate::errors::{Result, config_error};
use crate::response::error_message;

/// number of token chars we show in diagnostics
const TOKEN_DISPLAY_CHARS: usize = 20;

pub struct Session {
    config: TerraClimConfig,
    connector: Box<dyn HttpConnector>,

    access_token: Option<String>,
    refresh_token: Option<String>,
    headers: HeaderMap,

    last_error: Option<String>,
}

impl Session {
    /// a new, unauthenticated session that uses the given connector for all requests.
    /// [`Session::login`] falls back to the credentials stored in `config`, which only include the
    /// `TERRACLIM_USERNAME`/`TERRACLIM_PASSWORD` environment values if the config was created with
    /// [`TerraClimConfig::from_env`] (or overlaid through [`TerraClimConfig::with_overrides`])
    pub fn new (config: TerraClimConfig, connector: Box<dyn HttpConnector>)->Self {
        Session {
            config,
            connector,
            access_token: None,
            refresh_token: None,
            headers: content_headers(),
            last_error: None,
        }
    }

    /// a new, unauthenticated session that talks to the configured server. See [`Session::new`] for the
    /// login credential fallback
    pub fn live (config: TerraClimConfig)->Result<Self> {
        let connector = match config.timeout() {
            Some(timeout) => LiveHttpConnector::with_timeout( timeout)?,
            None => LiveHttpConnector::new()?
        };
        Ok( Session::new( config, Box::new(connector)))
    }

    pub fn config (&self)->&TerraClimConfig { &self.config }

    pub fn connector (&self)->&dyn HttpConnector { self.connector.as_ref() }

    /// exchange credentials for an access/refresh token pair. Missing (or empty) arguments fall back to the
    /// configured credentials. Returns a `ConfigError` if we still don't have both username and password,
    /// `Ok(false)` if the server did not accept them or could not be reached
    pub fn login (&mut self, username: Option<&str>, password: Option<&str>)->Result<bool> {
        let username = non_empty(username).or( non_empty( self.config.username.as_deref())).map( str::to_string);
        let password = non_empty(password).or( non_empty( self.config.password.as_deref())).map( str::to_string);

        let (Some(username), Some(password)) = (username, password) else {
            return Err( config_error("Username and password must be provided either as arguments or environment variables"))
        };

        let url = self.config.token_url();
        debug!("requesting token for user {} from {}", username, url);

        let response = match self.connector.post_json( &url, &content_headers(), &json!({"username": username, "password": password})) {
            Ok(response) => response,
            Err(e) => return Ok( self.fail( format!("Login failed: {e}")))
        };

        let data = match response.parse_json() {
            Ok(data) => data,
            Err(_) => return Ok( self.fail( format!("Invalid JSON response: {}", response.text())))
        };

        if !response.is_success() {
            return Ok( self.fail( format!("Login failed: {}", login_error_message(&data))))
        }

        match token_pair( &data) {
            Some((access, refresh)) => {
                let accepted = self.set_tokens( access, refresh);
                if accepted { info!("logged in as {}", username) }
                Ok(accepted)
            }
            None => Ok( self.fail("No access token in response"))
        }
    }

    /// obtain a new access token with the refresh token we got from the last login. Returns false
    /// without changing the session state if there is no refresh token or the server rejects it
    pub fn refresh_tokens (&mut self)->bool {
        let Some(refresh) = self.refresh_token.clone() else {
            warn!("no refresh token available, please login first");
            self.last_error = Some("No refresh token available. Please login first.".to_string());
            return false
        };

        let url = self.config.refresh_url();
        debug!("refreshing access token from {}", url);

        let response = match self.connector.post_json( &url, &content_headers(), &json!({"refresh": refresh})) {
            Ok(response) => response,
            Err(e) => return self.fail( format!("Token refresh failed: {e}"))
        };

        if !response.is_success() {
            let msg = refresh_error_message( &response);
            return self.fail( format!("Token refresh failed: {msg}"))
        }

        match response.parse_json().ok().as_ref().and_then( token_pair) {
            Some((access, new_refresh)) => {
                let accepted = self.set_tokens( access, new_refresh.or(Some(refresh)));
                if accepted { info!("access token refreshed") }
                accepted
            }
            None => self.fail("Token refresh failed: no access token in response")
        }
    }

    /// the headers to use for API requests. `Authorization` is only present after a successful login/refresh
    pub fn get_headers (&self)->&HeaderMap { &self.headers }

    pub fn is_authenticated (&self)->bool { self.access_token.is_some() }

    pub fn access_token (&self)->Option<&str> { self.access_token.as_deref() }

    pub fn refresh_token (&self)->Option<&str> { self.refresh_token.as_deref() }

    /// the diagnostic of the last failed login or refresh
    pub fn last_error (&self)->Option<&str> { self.last_error.as_deref() }

    fn set_tokens (&mut self, access: String, refresh: Option<String>)->bool {
        let hv = match HeaderValue::from_str( &format!("Bearer {access}")) {
            Ok(mut hv) => { hv.set_sensitive(true); hv }
            Err(_) => return self.fail("Invalid access token in response")
        };

        self.headers.insert( AUTHORIZATION, hv);
        self.access_token = Some(access);
        self.refresh_token = refresh;
        self.last_error = None;
        true
    }

    fn fail (&mut self, msg: impl ToString)->bool {
        let msg = msg.to_string();
        error!("{}", msg);
        self.last_error = Some(msg);
        false
    }
}

/// abbreviated token for display purposes, e.g. "eyJhbGciOiJIUzI1NiIs..."
pub fn format_token (token: Option<&str>)->String {
    abbreviate( token, TOKEN_DISPLAY_CHARS)
}

fn content_headers ()->HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert( CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert( ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

fn non_empty (s: Option<&str>)->Option<&str> {
    s.filter( |s| !s.is_empty())
}

/// the `access` (required) and `refresh` (optional) tokens of a token endpoint response
fn token_pair (data: &Value)->Option<(String,Option<String>)> {
    let access = data.get("access")?.as_str().filter( |s| !s.is_empty())?.to_string();
    let refresh = data.get("refresh").and_then( Value::as_str).filter( |s| !s.is_empty()).map( str::to_string);
    Some( (access, refresh) )
}

fn login_error_message (data: &Value)->String {
    match data.get("detail") {
        Some(Value::String(s)) => s.clone(),
        Some(v) => v.to_string(),
        None => data.to_string()
    }
}

fn refresh_error_message (response: &HttpResponse)->String {
    match response.parse_json() {
        Ok(data) => error_message( &data),
        Err(_) => format!("HTTP {}", response.status().as_u16())
    }
}
