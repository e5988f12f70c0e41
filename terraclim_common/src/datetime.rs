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

//! date parsing and ISO-8601 normalization for query parameters

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

/// accepted input formats, tried in this order
pub const DATE_FMT: &str = "%Y-%m-%d";
pub const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

/// what we send to the server (no fractional seconds, no timezone)
pub const ISO_DATETIME_FMT: &str = "%Y-%m-%dT%H:%M:%S";

/// parse either a plain `YYYY-MM-DD` date (at midnight) or a `YYYY-MM-DD HH:MM:SS` datetime
pub fn parse_date_or_datetime (s: &str)->Option<NaiveDateTime> {
    if let Ok(date) = NaiveDate::parse_from_str( s, DATE_FMT) {
        Some( date.and_time( NaiveTime::MIN))
    } else {
        NaiveDateTime::parse_from_str( s, DATETIME_FMT).ok()
    }
}

/// normalize a date string into ISO format, e.g. "2025-01-01" -> "2025-01-01T00:00:00".
/// Returns None for empty or unparsable input
pub fn format_iso_date (s: &str)->Option<String> {
    if s.is_empty() { return None }
    parse_date_or_datetime(s).map( |dt| dt.format( ISO_DATETIME_FMT).to_string())
}

#[inline]
pub fn local_today ()->NaiveDate {
    Local::now().date_naive()
}

/// the date `n_days` before `date`, None if that is out of the representable date range
pub fn days_before (date: NaiveDate, n_days: i64)->Option<NaiveDate> {
    date.checked_sub_signed( TimeDelta::try_days(n_days)?)
}

/// resolve an optional (start,end) date range. A missing or empty end defaults to today (midnight), a missing
/// start to `n_days` before the end. Returns None if a given date cannot be parsed or the window start is out of range
pub fn trailing_window (start: Option<&str>, end: Option<&str>, n_days: i64)->Option<(NaiveDateTime,NaiveDateTime)> {
    let end = match end.filter( |s| !s.is_empty()) {
        Some(s) => parse_date_or_datetime(s)?,
        None => local_today().and_time( NaiveTime::MIN)
    };

    let start = match start.filter( |s| !s.is_empty()) {
        Some(s) => parse_date_or_datetime(s)?,
        None => days_before( end.date(), n_days)?.and_time( NaiveTime::MIN)
    };

    Some( (start, end) )
}
