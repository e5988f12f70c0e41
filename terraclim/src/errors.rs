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

use thiserror::Error;
use terraclim_common::{map_to_opaque_error, net::NetError};

pub type Result<T> = std::result::Result<T, TerraClimError>;

/// terraclim specific error type. Variants only store opaque messages so that errors can be cloned
/// into error tables and diagnostics
#[derive(Error,Debug,Clone,PartialEq)]
pub enum TerraClimError {
    #[error("config error: {0}")]
    ConfigError(String),

    #[error("authentication error: {0}")]
    AuthError(String),

    #[error("authentication required, please login first")]
    NotAuthenticated,

    #[error("{0}")]
    ApiError(String),

    #[error("data validation error: {0}")]
    DataValidationError(String),

    #[error("network error: {0}")]
    NetError(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("JSON error: {0}")]
    JsonError(String),

    #[error("IO error: {0}")]
    IOError(String),

    #[error("table error: {0}")]
    TableError(String),
}

map_to_opaque_error!{ std::io::Error => TerraClimError::IOError }
map_to_opaque_error!{ serde_json::Error => TerraClimError::JsonError }
map_to_opaque_error!{ polars::error::PolarsError => TerraClimError::TableError }
map_to_opaque_error!{ ron::error::SpannedError => TerraClimError::ConfigError }
map_to_opaque_error!{ url::ParseError => TerraClimError::ConfigError }
map_to_opaque_error!{ reqwest::Error => TerraClimError::NetError }

impl From<NetError> for TerraClimError {
    fn from (e: NetError)->Self {
        match e {
            NetError::HttpError(e) => TerraClimError::NetError( e.to_string()),
            NetError::OpFailed(msg) => TerraClimError::NetError( msg),
        }
    }
}

pub fn config_error (msg: impl ToString)->TerraClimError {
    TerraClimError::ConfigError(msg.to_string())
}

pub fn auth_error (msg: impl ToString)->TerraClimError {
    TerraClimError::AuthError(msg.to_string())
}

pub fn api_error (msg: impl ToString)->TerraClimError {
    TerraClimError::ApiError(msg.to_string())
}

pub fn validation_error (msg: impl ToString)->TerraClimError {
    TerraClimError::DataValidationError(msg.to_string())
}

pub fn invalid_argument (msg: impl ToString)->TerraClimError {
    TerraClimError::InvalidArgument(msg.to_string())
}
