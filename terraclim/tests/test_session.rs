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
#![allow(unused)]

mod common;

use serde_json::json;
use wiremock::{Mock, MockServer, ResponseTemplate, matchers::{method, path, body_json}};
use terraclim::{Session, TerraClimError};
use common::*;

// run with "cargo test test_login -- --nocapture"

#[tokio::test(flavor = "multi_thread")]
async fn test_login_success() {
    let server = MockServer::start().await;
    Mock::given( method("POST"))
        .and( path("/api/token/"))
        .and( body_json( json!({"username": "u", "password": "p"})))
        .respond_with( ResponseTemplate::new(200).set_body_json( json!({"access": "AAA", "refresh": "RRR"})))
        .expect(1)
        .mount( &server)
        .await;

    let uri = server.uri();
    let (ok, auth, refresh) = blocking( move || {
        let mut session = Session::live( test_config( &uri)).unwrap();
        let ok = session.login( None, None).unwrap();
        let auth = session.get_headers().get("authorization").and_then( |v| v.to_str().ok()).map( str::to_string);
        (ok, auth, session.refresh_token().map( str::to_string))
    }).await;

    assert!( ok);
    assert_eq!( auth.as_deref(), Some("Bearer AAA"));
    assert_eq!( refresh.as_deref(), Some("RRR"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_rejected() {
    let server = MockServer::start().await;
    Mock::given( method("POST"))
        .and( path("/api/token/"))
        .respond_with( ResponseTemplate::new(401).set_body_json( json!({"detail": "No active account found with the given credentials"})))
        .mount( &server)
        .await;

    let uri = server.uri();
    let (ok, authenticated, last_error) = blocking( move || {
        let mut session = Session::live( test_config( &uri)).unwrap();
        let ok = session.login( Some("u"), Some("wrong")).unwrap();
        (ok, session.is_authenticated(), session.last_error().map( str::to_string))
    }).await;

    assert!( !ok);
    assert!( !authenticated);
    assert_eq!( last_error.as_deref(), Some("Login failed: No active account found with the given credentials"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_html_response() {
    let server = MockServer::start().await;
    Mock::given( method("POST"))
        .and( path("/api/token/"))
        .respond_with( ResponseTemplate::new(200).set_body_raw( "<html><body>maintenance</body></html>", "text/html"))
        .mount( &server)
        .await;

    let uri = server.uri();
    let (ok, last_error) = blocking( move || {
        let mut session = Session::live( test_config( &uri)).unwrap();
        let ok = session.login( None, None).unwrap();
        (ok, session.last_error().map( str::to_string))
    }).await;

    assert!( !ok);
    assert!( last_error.unwrap().starts_with("Invalid JSON response"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_without_credentials() {
    let server = MockServer::start().await;
    Mock::given( method("POST"))
        .and( path("/api/token/"))
        .respond_with( ResponseTemplate::new(200).set_body_json( json!({"access": "AAA"})))
        .expect(0)
        .mount( &server)
        .await;

    let uri = server.uri();
    let res = blocking( move || {
        let mut config = test_config( &uri);
        config.username = None;
        config.password = None;
        let mut session = Session::live( config).unwrap();
        session.login( Some("u"), None)
    }).await;

    assert!( matches!( res, Err(TerraClimError::ConfigError(_))));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_refresh_tokens() {
    let server = MockServer::start().await;
    mount_token_endpoint( &server).await;
    Mock::given( method("POST"))
        .and( path("/api/token/refresh/"))
        .and( body_json( json!({"refresh": REFRESH_TOKEN})))
        .respond_with( ResponseTemplate::new(200).set_body_json( json!({"access": "BBB"})))
        .expect(1)
        .mount( &server)
        .await;

    let uri = server.uri();
    let (ok, access, refresh) = blocking( move || {
        let mut session = login( &uri);
        let ok = session.refresh_tokens();
        (ok, session.access_token().map( str::to_string), session.refresh_token().map( str::to_string))
    }).await;

    assert!( ok);
    assert_eq!( access.as_deref(), Some("BBB"));
    assert_eq!( refresh.as_deref(), Some(REFRESH_TOKEN)); // server did not rotate it
}

#[tokio::test(flavor = "multi_thread")]
async fn test_refresh_rejected() {
    let server = MockServer::start().await;
    mount_token_endpoint( &server).await;
    Mock::given( method("POST"))
        .and( path("/api/token/refresh/"))
        .respond_with( ResponseTemplate::new(401).set_body_json( json!({"detail": "Token is invalid or expired"})))
        .mount( &server)
        .await;

    let uri = server.uri();
    let (ok, access, last_error) = blocking( move || {
        let mut session = login( &uri);
        let ok = session.refresh_tokens();
        (ok, session.access_token().map( str::to_string), session.last_error().map( str::to_string))
    }).await;

    assert!( !ok);
    assert_eq!( access.as_deref(), Some(ACCESS_TOKEN));
    assert_eq!( last_error.as_deref(), Some("Token refresh failed: Token is invalid or expired"));
}
