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

//! the request plumbing shared by all resource clients

use serde_json::Value;
use terraclim_common::{datetime::format_iso_date, net::HttpResponse};
use tracing::{debug, warn};

use crate::errors::{Result, TerraClimError, invalid_argument};
use crate::response::{check_status, interpret_response};
use crate::session::Session;
use crate::table::{NormalizeMode, Table, normalize};

/// ordered query parameters. Absent and empty values are skipped
#[derive(Debug,Clone,Default,PartialEq)]
pub struct Query {
    params: Vec<(String,String)>
}

impl Query {
    pub fn new ()->Self { Query::default() }

    pub fn param (mut self, key: &str, value: impl ToString)->Self {
        let value = value.to_string();
        if !value.is_empty() {
            self.params.push( (key.to_string(), value));
        }
        self
    }

    pub fn opt_param<T: ToString> (self, key: &str, value: Option<T>)->Self {
        match value {
            Some(v) => self.param( key, v),
            None => self
        }
    }

    /// a date or datetime parameter that is sent in ISO-8601 format. Unparsable dates are rejected
    pub fn date_param (self, key: &str, value: Option<&str>)->Result<Self> {
        match value.filter( |s| !s.is_empty()) {
            Some(s) => {
                let iso = format_iso_date(s).ok_or_else( || {
                    invalid_argument( format!("{key} '{s}' is not a valid date (expected YYYY-MM-DD or YYYY-MM-DD HH:MM:SS)"))
                })?;
                Ok( self.param( key, iso))
            }
            None => Ok(self)
        }
    }

    pub fn get (&self, key: &str)->Option<&str> {
        self.params.iter().find( |(k,_)| k == key).map( |(_,v)| v.as_str())
    }

    pub fn pairs (&self)->&[(String,String)] { &self.params }

    pub fn is_empty (&self)->bool { self.params.is_empty() }
}

/// authenticated GET access to versioned API endpoints. All resource clients are built on top of this
pub struct ResourceClient<'a> {
    session: &'a Session
}

impl<'a> ResourceClient<'a> {
    /// fails with `NotAuthenticated` if the session does not hold an access token
    pub fn new (session: &'a Session)->Result<Self> {
        if session.is_authenticated() {
            Ok( ResourceClient { session })
        } else {
            Err( TerraClimError::NotAuthenticated)
        }
    }

    pub fn session (&self)->&'a Session { self.session }

    pub fn url (&self, endpoint: &str)->String {
        self.session.config().api_url( endpoint)
    }

    /// the raw response, for endpoints that don't return JSON
    pub fn get_raw (&self, endpoint: &str, query: &Query)->Result<HttpResponse> {
        let url = self.url( endpoint);
        debug!("GET {} {:?}", url, query.pairs());

        let response = self.session.connector().get( &url, self.session.get_headers(), query.pairs())?;
        if let Err(e) = check_status( &response) {
            warn!("request to {} failed: {}", endpoint, e);
            return Err(e)
        }
        Ok(response)
    }

    /// the interpreted JSON payload
    pub fn get_value (&self, endpoint: &str, query: &Query)->Result<Value> {
        let url = self.url( endpoint);
        debug!("GET {} {:?}", url, query.pairs());

        let response = self.session.connector().get( &url, self.session.get_headers(), query.pairs())?;
        interpret_response( &response).inspect_err( |e| warn!("request to {} failed: {}", endpoint, e))
    }

    /// the normalized JSON payload
    pub fn get_table (&self, endpoint: &str, query: &Query, mode: NormalizeMode)->Result<Table> {
        let value = self.get_value( endpoint, query)?;
        let table = normalize( &value, mode);
        debug!("{} -> {} rows x {} columns", endpoint, table.n_rows(), table.n_columns());
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use crate::{config::TerraClimConfig, mock_connector::MockConnector};

    #[test]
    fn test_query() {
        let q = Query::new()
            .param( "service", "WMS")
            .opt_param( "farm_id", Some(3))
            .opt_param::<u64>( "portion_id", None)
            .opt_param( "variable", Some(""))
            .date_param( "start_date", Some("2025-01-01")).unwrap()
            .date_param( "end_date", None).unwrap();

        assert_eq!( q.pairs().len(), 3);
        assert_eq!( q.get("farm_id"), Some("3"));
        assert_eq!( q.get("start_date"), Some("2025-01-01T00:00:00"));
        assert!( q.get("variable").is_none());

        let res = Query::new().date_param( "start_date", Some("01/02/2025"));
        assert!( matches!( res, Err(TerraClimError::InvalidArgument(_))));
    }

    #[test]
    fn test_not_authenticated() {
        let session = Session::new( TerraClimConfig::default(), Box::new( MockConnector::new()));
        assert!( matches!( ResourceClient::new( &session), Err(TerraClimError::NotAuthenticated)));
    }

    #[test]
    fn test_get_table() {
        let mock = MockConnector::new();
        mock.respond_json( 200, &json!({"access": "AAA"}));
        mock.respond_json( 200, &json!([{"id": 1}, {"id": 2}]));
        mock.respond_json( 404, &json!({"detail": "Not found."}));
        mock.fail("connection refused");

        let mut config = TerraClimConfig::default();
        config.base_url = "http://tc.test".to_string();
        let mut session = Session::new( config, Box::new( mock.clone()));
        assert!( session.login( Some("u"), Some("p")).unwrap());

        let client = ResourceClient::new( &session).unwrap();
        let t = client.get_table( "farms/", &Query::new(), NormalizeMode::Plain).unwrap();
        assert_eq!( t.n_rows(), 2);

        let req = mock.last_request().unwrap();
        assert_eq!( req.url, "http://tc.test/api/v0/farms/");
        assert_eq!( req.headers.get("authorization").unwrap(), "Bearer AAA");

        let res = client.get_table( "farms/99/", &Query::new(), NormalizeMode::Plain);
        assert_eq!( res, Err( TerraClimError::ApiError("Not found.".to_string())));

        let res = client.get_table( "farms/", &Query::new(), NormalizeMode::Plain);
        assert!( matches!( res, Err(TerraClimError::NetError(_))));
    }
}
