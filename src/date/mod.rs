// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Second-resolution instants used to stamp track snaps and output records.
*/

#[cfg(test)]
mod test;

use std::fmt;
use std::ops::{Add, Sub};

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::atcf::error::AtcfError;

/// A second-resolution instant. Wraps a naive UTC datetime; storm tracks do
/// not carry timezone information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StormDate {
    datetime: NaiveDateTime,
}

impl StormDate {
    /// Creates a new StormDate from calendar components
    ///
    /// # Arguments
    ///
    /// * `year`, `month`, `day`, `hour`, `minute`, `second` - UTC calendar
    ///   components
    ///
    ///
    /// # Returns
    ///
    /// * A populated StormDate, or an error when the components do not form
    ///   a valid date
    ///
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self, AtcfError> {
        let datetime = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, minute, second))
            .ok_or(AtcfError::InvalidDateComponents {
                year,
                month,
                day,
                hour,
                minute,
                second,
            })?;
        Ok(StormDate { datetime })
    }

    /// Parses a `YYYYMMDDHH` date token as found in best-track files
    pub fn parse_atcf(token: &str) -> Result<Self, AtcfError> {
        let datetime = NaiveDateTime::parse_from_str(&format!("{}0000", token.trim()), "%Y%m%d%H%M%S")
            .map_err(|_| AtcfError::MalformedDateToken(token.to_string()))?;
        Ok(StormDate { datetime })
    }

    /// Creates a StormDate from seconds since the Unix epoch
    pub fn from_seconds(seconds: i64) -> Self {
        StormDate {
            datetime: chrono::DateTime::from_timestamp(seconds, 0)
                .map(|d| d.naive_utc())
                .unwrap_or_default(),
        }
    }

    /// Seconds since the Unix epoch
    pub fn to_seconds(&self) -> i64 {
        self.datetime.and_utc().timestamp()
    }

    /// Returns a new date offset by a signed number of seconds
    pub fn add_seconds(&self, seconds: i64) -> Self {
        StormDate {
            datetime: self.datetime + Duration::seconds(seconds),
        }
    }

    /// Returns a new date offset by a signed number of hours
    pub fn add_hours(&self, hours: i64) -> Self {
        self.add_seconds(hours * 3600)
    }

    pub fn year(&self) -> i32 {
        use chrono::Datelike;
        self.datetime.year()
    }

    pub fn month(&self) -> u32 {
        use chrono::Datelike;
        self.datetime.month()
    }

    pub fn day(&self) -> u32 {
        use chrono::Datelike;
        self.datetime.day()
    }

    pub fn hour(&self) -> u32 {
        use chrono::Timelike;
        self.datetime.hour()
    }

    pub fn minute(&self) -> u32 {
        use chrono::Timelike;
        self.datetime.minute()
    }

    pub fn second(&self) -> u32 {
        use chrono::Timelike;
        self.datetime.second()
    }

    /// Formats the date as `YYYYMMDDHH`, the form used in file headers
    pub fn format_header(&self) -> String {
        self.datetime.format("%Y%m%d%H").to_string()
    }

    /// Formats the date as `YYYYMMDDHHMI`, the form used in record headers
    pub fn format_record(&self) -> String {
        self.datetime.format("%Y%m%d%H%M").to_string()
    }
}

impl Sub for StormDate {
    type Output = i64;

    /// Difference between two dates in seconds
    fn sub(self, rhs: Self) -> i64 {
        self.to_seconds() - rhs.to_seconds()
    }
}

impl Add<i64> for StormDate {
    type Output = StormDate;

    /// Adds a signed number of seconds
    fn add(self, rhs: i64) -> StormDate {
        self.add_seconds(rhs)
    }
}

impl fmt::Display for StormDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.datetime.format("%Y-%m-%d %H:%M:%S"))
    }
}
