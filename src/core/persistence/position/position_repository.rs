use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::error;

use crate::core::persistence::position::attribute_row_entity::AttributeRowEntity;
use crate::core::persistence::position::position_column_entity::PositionColumnEntity;
use crate::core::persistence::position::position_mongo_adapter::PositionMongoAdapter;
use crate::core::persistence::position::position_repository_trait::{
    AttributeRowRepository, PositionColumnRepository,
};

/// Repository for stored robot positions that bridges the traits and the Mongo adapter.
pub struct PositionRepository {
    adapter: PositionMongoAdapter,
}

impl PositionRepository {
    pub fn new(adapter: PositionMongoAdapter) -> Self {
        Self { adapter }
    }
}

#[async_trait]
impl AttributeRowRepository for PositionRepository {
    async fn get_rows_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AttributeRowEntity>> {
        let docs = self.adapter.find_between(start, end).await.map_err(|err| {
            error!(error = %err, %start, %end, "Failed to read attribute rows");
            err
        })?;

        docs.iter().map(AttributeRowEntity::from_document).collect()
    }
}

#[async_trait]
impl PositionColumnRepository for PositionRepository {
    async fn get_columns_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<PositionColumnEntity>> {
        let docs = self.adapter.find_between(start, end).await.map_err(|err| {
            error!(error = %err, %start, %end, "Failed to read position columns");
            err
        })?;

        docs.iter().map(PositionColumnEntity::from_document).collect()
    }
}
