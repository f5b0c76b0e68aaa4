use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use indexmap::IndexMap;

use crate::core::client::historical_dto::HistoricalValue;
use crate::core::util::value_util::ValueUtil;
use crate::domain::position::model::{Axis, PositionRecord};
use crate::domain::position::position_error::PositionError;

/// Independently fetched series, one per pose attribute.
#[derive(Debug, Clone, Default)]
pub struct AttributeSeries {
    pub x: Vec<HistoricalValue>,
    pub y: Vec<HistoricalValue>,
    pub z: Vec<HistoricalValue>,
    pub theta: Vec<HistoricalValue>,
}

/// Joins the four series on their timestamps.
///
/// `x` decides which timestamps exist and in which order. `y`, `z` and
/// `theta` only fill in entries `x` created; their samples at any other
/// timestamp are dropped.
pub fn merge_attribute_series(
    series: AttributeSeries,
    tz: Tz,
) -> Result<Vec<PositionRecord>, PositionError> {
    let mut merged: IndexMap<DateTime<Utc>, PositionRecord> = IndexMap::new();

    for sample in &series.x {
        let time = parse_recv_time(&sample.recv_time)?;
        let value = coerce(Axis::X, sample)?;
        merged
            .entry(time)
            .or_insert_with(|| PositionRecord::at(time, tz))
            .set(Axis::X, value);
    }

    for (axis, samples) in [
        (Axis::Y, &series.y),
        (Axis::Z, &series.z),
        (Axis::Theta, &series.theta),
    ] {
        for sample in samples {
            let time = parse_recv_time(&sample.recv_time)?;
            if let Some(record) = merged.get_mut(&time) {
                record.set(axis, coerce(axis, sample)?);
            }
        }
    }

    Ok(merged.into_values().collect())
}

fn parse_recv_time(raw: &str) -> Result<DateTime<Utc>, PositionError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| PositionError::InvalidTimestamp(raw.to_string()))
}

fn coerce(axis: Axis, sample: &HistoricalValue) -> Result<f64, PositionError> {
    ValueUtil::to_decimal(&sample.attr_value).ok_or_else(|| PositionError::NumericCoercion {
        attr: axis.as_str().to_string(),
        value: ValueUtil::describe(&sample.attr_value),
    })
}
