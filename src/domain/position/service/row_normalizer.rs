use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use indexmap::IndexMap;

use crate::core::persistence::position::attribute_row_entity::AttributeRowEntity;
use crate::core::util::value_util::ValueUtil;
use crate::domain::position::model::{Axis, PositionRecord};
use crate::domain::position::position_error::PositionError;

/// Folds single-attribute rows into one record per distinct timestamp.
///
/// Rows are expected in ascending time order; records come out in the order
/// their timestamp was first seen. A timestamp whose rows carry only unknown
/// attribute names still yields a record holding just `time`.
pub fn normalize_rows<I>(rows: I, tz: Tz) -> Result<Vec<PositionRecord>, PositionError>
where
    I: IntoIterator<Item = AttributeRowEntity>,
{
    let mut records: IndexMap<DateTime<Utc>, PositionRecord> = IndexMap::new();

    for row in rows {
        let record = records
            .entry(row.time)
            .or_insert_with(|| PositionRecord::at(row.time, tz));

        let Some(axis) = Axis::from_attr_name(&row.attr_name) else {
            continue;
        };

        let value = ValueUtil::to_decimal(&row.attr_value).ok_or_else(|| {
            PositionError::NumericCoercion {
                attr: row.attr_name.clone(),
                value: ValueUtil::describe(&row.attr_value),
            }
        })?;
        record.set(axis, value);
    }

    Ok(records.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Asia::Tokyo;
    use serde_json::json;

    fn t(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn folds_rows_per_timestamp_in_first_seen_order() {
        let t0 = t("2018-01-03T03:04:05+09:00");
        let t1 = t("2018-01-04T03:04:05+09:00");
        let t2 = t("2018-01-05T03:04:05+09:00");
        let rows = vec![
            AttributeRowEntity::new(t0, "x", json!(0.0)),
            AttributeRowEntity::new(t0, "y", json!(0.1)),
            AttributeRowEntity::new(t0, "z", json!(0.2)),
            AttributeRowEntity::new(t0, "theta", json!(0.3)),
            AttributeRowEntity::new(t0, "dummy", json!("dummy0")),
            AttributeRowEntity::new(t1, "dummy", json!("dummy1")),
            AttributeRowEntity::new(t2, "x", json!(2.0)),
            AttributeRowEntity::new(t2, "y", json!(2.1)),
        ];

        let records = normalize_rows(rows, Tokyo).unwrap();

        assert_eq!(
            serde_json::to_value(&records).unwrap(),
            json!([
                { "time": "2018-01-03T03:04:05+09:00", "x": 0.0, "y": 0.1, "z": 0.2, "theta": 0.3 },
                { "time": "2018-01-04T03:04:05+09:00" },
                { "time": "2018-01-05T03:04:05+09:00", "x": 2.0, "y": 2.1 },
            ])
        );
    }

    #[test]
    fn decimal_strings_are_coerced() {
        let t0 = t("2018-01-03T03:04:05Z");
        let rows = vec![AttributeRowEntity::new(t0, "theta", json!("1.5"))];

        let records = normalize_rows(rows, Tokyo).unwrap();
        assert_eq!(records[0].theta, Some(1.5));
    }

    #[test]
    fn later_rows_overwrite_the_same_axis() {
        let t0 = t("2018-01-03T03:04:05Z");
        let rows = vec![
            AttributeRowEntity::new(t0, "x", json!(1.0)),
            AttributeRowEntity::new(t0, "x", json!(4.0)),
        ];

        let records = normalize_rows(rows, Tokyo).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].x, Some(4.0));
    }

    #[test]
    fn non_numeric_pose_value_fails_the_whole_batch() {
        let t0 = t("2018-01-03T03:04:05Z");
        let rows = vec![
            AttributeRowEntity::new(t0, "x", json!(1.0)),
            AttributeRowEntity::new(t0, "y", json!("north")),
        ];

        let err = normalize_rows(rows, Tokyo).unwrap_err();
        assert_eq!(
            err,
            PositionError::NumericCoercion {
                attr: "y".into(),
                value: "\"north\"".into()
            }
        );
    }

    #[test]
    fn no_rows_no_records() {
        assert!(normalize_rows(Vec::new(), Tokyo).unwrap().is_empty());
    }
}
