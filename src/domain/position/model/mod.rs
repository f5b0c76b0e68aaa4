//! Position domain types (TimeWindow, Axis, PositionRecord)

use chrono::{DateTime, SecondsFormat, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Half-open `[start, end)` interval, both ends in the configured timezone.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeWindow {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl TimeWindow {
    pub fn start_utc(&self) -> DateTime<Utc> {
        self.start.with_timezone(&Utc)
    }

    pub fn end_utc(&self) -> DateTime<Utc> {
        self.end.with_timezone(&Utc)
    }

    pub fn start_iso(&self) -> String {
        to_iso8601(&self.start)
    }

    pub fn end_iso(&self) -> String {
        to_iso8601(&self.end)
    }
}

/// The four pose attributes a robot reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
    Theta,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::X, Axis::Y, Axis::Z, Axis::Theta];

    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
            Axis::Theta => "theta",
        }
    }

    /// Maps an attribute name to an axis; anything else is not part of a pose.
    pub fn from_attr_name(name: &str) -> Option<Self> {
        match name {
            "x" => Some(Axis::X),
            "y" => Some(Axis::Y),
            "z" => Some(Axis::Z),
            "theta" => Some(Axis::Theta),
            _ => None,
        }
    }
}

/// One output sample. Axes missing upstream stay absent in the JSON body.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub time: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub theta: Option<f64>,
}

impl PositionRecord {
    pub fn at(time: DateTime<Utc>, tz: Tz) -> Self {
        Self {
            time: to_iso8601(&time.with_timezone(&tz)),
            ..Default::default()
        }
    }

    pub fn set(&mut self, axis: Axis, value: f64) {
        let slot = match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
            Axis::Theta => &mut self.theta,
        };
        *slot = Some(value);
    }
}

/// ISO-8601 with a numeric offset (`+09:00`, never `Z`). A fraction, when
/// present, is always six digits (`.250000`).
pub fn to_iso8601<T: TimeZone>(time: &DateTime<T>) -> String {
    let format = if time.nanosecond() == 0 {
        SecondsFormat::Secs
    } else {
        SecondsFormat::Micros
    };
    time.fixed_offset().to_rfc3339_opts(format, false)
}
