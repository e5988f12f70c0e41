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

//! shared mock server setup for the integration tests. Note that blocking reqwest clients must not be created,
//! used or dropped on async runtime threads, hence all `Session` related code runs inside `blocking(..)`
#![allow(unused)]

use serde_json::json;
use wiremock::{Mock, MockServer, ResponseTemplate, matchers::{method, path, body_json}};
use terraclim::{Session, TerraClimConfig, config::ENV_BASE_URL};

pub const ACCESS_TOKEN: &str = "AAA";
pub const REFRESH_TOKEN: &str = "RRR";

pub async fn blocking<T,F> (f: F)->T where T: Send + 'static, F: FnOnce()->T + Send + 'static {
    tokio::task::spawn_blocking(f).await.expect("blocking task panicked")
}

pub fn test_config (base_url: &str)->TerraClimConfig {
    let base_url = base_url.to_string();
    TerraClimConfig::default()
        .with_overrides( |key| if key == ENV_BASE_URL { Some(base_url.clone()) } else { None })
        .unwrap()
        .with_credentials( "u", "p")
}

/// token endpoint that accepts "u"/"p"
pub async fn mount_token_endpoint (server: &MockServer) {
    Mock::given( method("POST"))
        .and( path("/api/token/"))
        .and( body_json( json!({"username": "u", "password": "p"})))
        .respond_with( ResponseTemplate::new(200).set_body_json( json!({"access": ACCESS_TOKEN, "refresh": REFRESH_TOKEN})))
        .mount( server)
        .await;
}

/// a logged in session for the mock server (only call from within `blocking(..)`)
pub fn login (base_url: &str)->Session {
    let mut session = Session::live( test_config( base_url)).unwrap();
    assert!( session.login( None, None).unwrap(), "login failed: {:?}", session.last_error());
    session
}
