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

//! overview and analysis statistics

use terraclim_common::datetime::{ISO_DATETIME_FMT, trailing_window};

use crate::client::{Query, ResourceClient};
use crate::errors::{Result, invalid_argument};
use crate::session::Session;
use crate::table::{NormalizeMode, Table};

/// default analysis period if no start date is given
pub const ANALYSIS_WINDOW_DAYS: i64 = 60;

pub struct OverviewStats<'a> {
    client: ResourceClient<'a>
}

impl<'a> OverviewStats<'a> {
    pub fn new (session: &'a Session)->Result<Self> {
        Ok( OverviewStats { client: ResourceClient::new( session)? })
    }

    /// overview for a farm or a field (which should be within the farm if both are given).
    /// At least one of them is required
    pub fn get_overview_stats (&self, farm_id: Option<u64>, field_id: Option<u64>)->Result<Table> {
        if farm_id.is_none() && field_id.is_none() {
            return Err( invalid_argument("Either farm_id or field_id must be provided"))
        }

        let query = Query::new()
            .opt_param( "fieldID", field_id)
            .opt_param( "farm_id", farm_id);
        self.client.get_table( "overview-stats/", &query, NormalizeMode::Plain)
    }
}

pub struct AnalysisStats<'a> {
    client: ResourceClient<'a>
}

impl<'a> AnalysisStats<'a> {
    pub fn new (session: &'a Session)->Result<Self> {
        Ok( AnalysisStats { client: ResourceClient::new( session)? })
    }

    /// analysis statistics for the given period, which defaults to the last 60 days up to today.
    /// Field ids are sent as comma separated list
    pub fn get_analysis_stats (&self, start_date: Option<&str>, end_date: Option<&str>, field_ids: &[u64])->Result<Table> {
        let (start, end) = trailing_window( start_date, end_date, ANALYSIS_WINDOW_DAYS).ok_or_else( || {
            invalid_argument( format!("invalid analysis period {start_date:?} - {end_date:?}, expected YYYY-MM-DD dates"))
        })?;

        let field_id = field_ids.iter().map( |id| id.to_string()).collect::<Vec<String>>().join(",");
        let query = Query::new()
            .param( "start_date", start.format( ISO_DATETIME_FMT))
            .param( "end_date", end.format( ISO_DATETIME_FMT))
            .param( "field_id", field_id);

        self.client.get_table( "analysis-stats/", &query, NormalizeMode::Flatten)
    }
}
