use anyhow::Result;
use async_trait::async_trait;
use chrono_tz::Tz;
use tracing::debug;

use crate::core::persistence::position::position_repository_trait::{
    AttributeRowRepository, PositionColumnRepository,
};
use crate::domain::position::model::{PositionRecord, TimeWindow};
use crate::domain::position::service::column_normalizer::normalize_columns;
use crate::domain::position::service::position_source::PositionSource;
use crate::domain::position::service::row_normalizer::normalize_rows;

/// Positions from a store holding one document per attribute sample.
pub struct RowStorePositionSource<R: AttributeRowRepository> {
    repo: R,
    tz: Tz,
}

impl<R: AttributeRowRepository> RowStorePositionSource<R> {
    pub fn new(repo: R, tz: Tz) -> Self {
        Self { repo, tz }
    }
}

#[async_trait]
impl<R: AttributeRowRepository> PositionSource for RowStorePositionSource<R> {
    fn name(&self) -> &'static str {
        "row-store"
    }

    async fn fetch(&self, window: &TimeWindow) -> Result<Vec<PositionRecord>> {
        let rows = self
            .repo
            .get_rows_between(window.start_utc(), window.end_utc())
            .await?;
        debug!(rows = rows.len(), "Normalizing attribute rows");

        Ok(normalize_rows(rows, self.tz)?)
    }
}

/// Positions from a store holding one document per timestamp.
pub struct ColumnStorePositionSource<R: PositionColumnRepository> {
    repo: R,
    tz: Tz,
}

impl<R: PositionColumnRepository> ColumnStorePositionSource<R> {
    pub fn new(repo: R, tz: Tz) -> Self {
        Self { repo, tz }
    }
}

#[async_trait]
impl<R: PositionColumnRepository> PositionSource for ColumnStorePositionSource<R> {
    fn name(&self) -> &'static str {
        "column-store"
    }

    async fn fetch(&self, window: &TimeWindow) -> Result<Vec<PositionRecord>> {
        let rows = self
            .repo
            .get_columns_between(window.start_utc(), window.end_utc())
            .await?;
        debug!(rows = rows.len(), "Normalizing position columns");

        Ok(normalize_columns(rows, self.tz)?)
    }
}
