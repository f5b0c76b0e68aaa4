use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use thiserror::Error;

use crate::domain::position::model::TimeWindow;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeWindowError {
    #[error("empty query parameter \"st\" and/or \"et\"")]
    MissingParameter,

    #[error("invalid query parameter \"st\" and/or \"et\"")]
    InvalidParameter,
}

/// Naive layouts accepted besides RFC 3339 / RFC 2822. Read as local time in `tz`.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
];

const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Builds the `[st, et)` window. Both ends are required; their order is not checked.
pub fn parse_time_window(
    st: Option<&str>,
    et: Option<&str>,
    tz: Tz,
) -> Result<TimeWindow, TimeWindowError> {
    let (st, et) = match (non_empty(st), non_empty(et)) {
        (Some(st), Some(et)) => (st, et),
        _ => return Err(TimeWindowError::MissingParameter),
    };

    let start = parse_datetime(st, tz).ok_or(TimeWindowError::InvalidParameter)?;
    let end = parse_datetime(et, tz).ok_or(TimeWindowError::InvalidParameter)?;

    Ok(TimeWindow { start, end })
}

/// Parses a free-form timestamp and converts it into `tz`.
pub fn parse_datetime(raw: &str, tz: Tz) -> Option<DateTime<Tz>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&tz));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&tz));
    }

    let naive = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NAIVE_DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    // earliest() resolves DST folds; gaps yield None
    tz.from_local_datetime(&naive).earliest()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
