use chrono_tz::Tz;

use crate::core::persistence::position::position_column_entity::PositionColumnEntity;
use crate::core::util::value_util::ValueUtil;
use crate::domain::position::model::{Axis, PositionRecord};
use crate::domain::position::position_error::PositionError;

/// Maps each stored column document to exactly one record.
///
/// The column layout already holds one document per timestamp, so nothing
/// is accumulated across rows. Unknown fields are dropped.
pub fn normalize_columns<I>(rows: I, tz: Tz) -> Result<Vec<PositionRecord>, PositionError>
where
    I: IntoIterator<Item = PositionColumnEntity>,
{
    rows.into_iter()
        .map(|row| {
            let mut record = PositionRecord::at(row.time, tz);
            for axis in Axis::ALL {
                let Some(raw) = row.fields.get(axis.as_str()) else {
                    continue;
                };
                let value = ValueUtil::to_decimal(raw).ok_or_else(|| {
                    PositionError::NumericCoercion {
                        attr: axis.as_str().to_string(),
                        value: ValueUtil::describe(raw),
                    }
                })?;
                record.set(axis, value);
            }
            Ok(record)
        })
        .collect()
}
