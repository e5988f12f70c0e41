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

//! client configuration. A `TerraClimConfig` is an explicit value that gets passed into `Session::new()`,
//! it can be loaded from a RON file and/or overlaid with `TERRACLIM_*` environment variables

use std::{fmt, fs, path::Path, time::Duration};
use serde::Deserialize;
use url::Url;
use tracing::debug;

use crate::errors::{Result, config_error};
use crate::{DEFAULT_BASE_URL, DEFAULT_API_VERSION};

pub const ENV_USERNAME: &str = "TERRACLIM_USERNAME";
pub const ENV_PASSWORD: &str = "TERRACLIM_PASSWORD";
pub const ENV_BASE_URL: &str = "TERRACLIM_BASE_URL";
pub const ENV_API_VERSION: &str = "TERRACLIM_API_VERSION";

#[derive(Deserialize,Clone)]
#[serde(default)]
pub struct TerraClimConfig {
    /// host root of the API server, e.g. "https://dashboard.staging.terraclim.co.za"
    pub base_url: String,
    pub api_version: String,

    /// fallback credentials for `Session::login()`
    pub username: Option<String>,
    pub password: Option<String>,

    /// request timeout in seconds. If not set we use the HTTP client default
    pub timeout_secs: Option<u64>,
}

impl Default for TerraClimConfig {
    fn default ()->Self {
        TerraClimConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            username: None,
            password: None,
            timeout_secs: None,
        }
    }
}

// we don't want passwords to show up in logs
impl fmt::Debug for TerraClimConfig {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        f.debug_struct("TerraClimConfig")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl TerraClimConfig {
    /// default configuration overlaid with the process environment
    pub fn from_env ()->Result<Self> {
        TerraClimConfig::default().with_overrides( |key| std::env::var(key).ok())
    }

    /// load from RON file and overlay with the process environment
    pub fn from_ron_file (path: impl AsRef<Path>)->Result<Self> {
        let path = path.as_ref();
        let input = fs::read_to_string(path).map_err( |e| config_error( format!("cannot read {}: {e}", path.display())))?;
        let config: TerraClimConfig = ron::from_str( &input)?;
        debug!("loaded config from {}", path.display());
        config.with_overrides( |key| std::env::var(key).ok())
    }

    /// overlay with values obtained from `lookup` (normally the process environment). Empty values are ignored.
    /// The result has a normalized base URL
    pub fn with_overrides<F> (mut self, lookup: F)->Result<Self> where F: Fn(&str)->Option<String> {
        let lookup = |key: &str| lookup(key).filter( |v| !v.trim().is_empty());

        if let Some(base_url) = lookup(ENV_BASE_URL) { self.base_url = base_url }
        if let Some(api_version) = lookup(ENV_API_VERSION) { self.api_version = api_version }
        if let Some(username) = lookup(ENV_USERNAME) { self.username = Some(username) }
        if let Some(password) = lookup(ENV_PASSWORD) { self.password = Some(password) }

        self.base_url = normalize_base_url( &self.base_url)?;
        Ok(self)
    }

    /// explicit credentials take precedence over the configured ones
    pub fn with_credentials (mut self, username: impl ToString, password: impl ToString)->Self {
        self.username = Some(username.to_string());
        self.password = Some(password.to_string());
        self
    }

    pub fn timeout (&self)->Option<Duration> {
        self.timeout_secs.map( Duration::from_secs)
    }

    /// `<base>/api/token/`
    pub fn token_url (&self)->String {
        format!("{}/api/token/", self.base_url)
    }

    /// `<base>/api/token/refresh/`
    pub fn refresh_url (&self)->String {
        format!("{}/api/token/refresh/", self.base_url)
    }

    /// `<base>/api/<version>/<endpoint>` for versioned resource endpoints
    pub fn api_url (&self, endpoint: &str)->String {
        format!("{}/api/{}/{}", self.base_url, self.api_version, endpoint.trim_start_matches('/'))
    }
}

/// turn a user provided base URL into the host root we append endpoint paths to. A trailing slash,
/// query and fragment are removed and an `/api/..` path suffix is stripped
pub fn normalize_base_url (s: &str)->Result<String> {
    let mut url = Url::parse( s.trim())?;

    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err( config_error( format!("not a valid base URL: {s}")))
    }
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err( config_error( format!("unsupported URL scheme: {}", url.scheme())))
    }

    let segments: Vec<String> = url.path_segments()
        .map( |segs| segs.take_while( |seg| *seg != "api").map( str::to_string).collect())
        .unwrap_or_default();
    url.set_path( &segments.join("/"));
    url.set_query(None);
    url.set_fragment(None);

    Ok( url.as_str().trim_end_matches('/').to_string())
}
