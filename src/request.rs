//! Builds ASOS download requests from an observation window.

use anyhow::{anyhow, bail, Context, Result};
use chrono::{NaiveDate, NaiveDateTime};

/// Observation window sent to the download service, hour resolution.
/// The service interprets the timestamps as `Etc/UTC`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    /// A window from `start` to `end`, or a single instant when `end` is `None`.
    pub fn new(start: NaiveDateTime, end: Option<NaiveDateTime>) -> Self {
        Self {
            start,
            end: end.unwrap_or(start),
        }
    }
}

/// Parses a date given as space-separated integers: year month day [hour].
pub fn parse_date(tokens: &str) -> Result<NaiveDateTime> {
    let values = tokens
        .split_whitespace()
        .map(|token| token.parse::<i32>())
        .collect::<Result<Vec<i32>, _>>()
        .with_context(|| format!("`{}` is not space-separated integers", tokens.trim()))?;

    let (year, month, day, hour) = match values[..] {
        [y, m, d] => (y, m, d, 0),
        [y, m, d, h] => (y, m, d, h),
        _ => bail!(
            "expected year, month, day and an optional hour, got `{}`",
            tokens.trim()
        ),
    };

    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
        .and_then(|date| date.and_hms_opt(hour as u32, 0, 0))
        .ok_or_else(|| anyhow!("`{}` is not a calendar date", tokens.trim()))
}

/// Timestamp in the compact `YYYYMMDDHHMM` form used in file names.
pub fn compact(timestamp: NaiveDateTime) -> String {
    timestamp.format("%Y%m%d%H%M").to_string()
}

/// Query shared by every station in a run: endpoint, fixed parameters and
/// the date fields.
pub fn service_url(data_url: &str, range: &DateRange) -> String {
    let mut service = format!("{}data=all&tz=Etc/UTC&format=comma&latlon=yes&", data_url);
    service.push_str(&range.start.format("year1=%Y&month1=%m&day1=%d&").to_string());
    service.push_str(&range.end.format("year2=%Y&month2=%m&day2=%d&").to_string());

    service
}

/// Request URI for one station. The shared query already ends in `&`, so the
/// suffix produces a doubled separator; the service accepts it.
pub fn station_url(service: &str, station: &str) -> String {
    format!("{}&station={}", service, station)
}

// -- Tests -------------------------------------------------------------------
