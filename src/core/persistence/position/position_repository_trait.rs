use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::core::persistence::position::attribute_row_entity::AttributeRowEntity;
use crate::core::persistence::position::position_column_entity::PositionColumnEntity;

/// Reads row-oriented attribute samples.
#[async_trait]
pub trait AttributeRowRepository: Send + Sync {
    /// Samples with `start <= time < end`, ascending by time.
    async fn get_rows_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AttributeRowEntity>>;
}

/// Reads column-oriented position documents.
#[async_trait]
pub trait PositionColumnRepository: Send + Sync {
    /// Documents with `start <= time < end`, ascending by time.
    async fn get_columns_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<PositionColumnEntity>>;
}
