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

//! one client type per API resource. All clients borrow an authenticated [`Session`](crate::Session),
//! build the endpoint path and query and return the response as a [`Table`](crate::Table)

pub mod farms;
pub use farms::Farms;

pub mod fields;
pub use fields::Fields;

pub mod farm_portions;
pub use farm_portions::{FarmPortions, Extent};

pub mod cultivar;
pub use cultivar::Cultivar;

pub mod crop_type;
pub use crop_type::CropType;

pub mod irrigation;
pub use irrigation::Irrigation;

pub mod stats;
pub use stats::{OverviewStats, AnalysisStats, ANALYSIS_WINDOW_DAYS};

pub mod field_notes;
pub use field_notes::FieldNotes;

pub mod geoserver;
pub use geoserver::{GeoServerInfo, GeoServerAuth, GeoServerClimate, GeoServerFeature, WmsMapRequest, FeatureInfoRequest};

pub mod clone;
pub use clone::CloneClient;

pub mod climate_filter;
pub use climate_filter::ClimateFilter;
