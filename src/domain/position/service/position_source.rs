use anyhow::Result;
use async_trait::async_trait;

use crate::domain::position::model::{PositionRecord, TimeWindow};

/// A backend able to produce the ordered positions inside a window.
///
/// Implementations: [`RowStorePositionSource`], [`ColumnStorePositionSource`]
/// and [`RemoteHistoricalPositionSource`]. The HTTP layer only sees this trait.
///
/// [`RowStorePositionSource`]: crate::domain::position::service::store_position_source::RowStorePositionSource
/// [`ColumnStorePositionSource`]: crate::domain::position::service::store_position_source::ColumnStorePositionSource
/// [`RemoteHistoricalPositionSource`]: crate::domain::position::service::remote_position_source::RemoteHistoricalPositionSource
#[async_trait]
pub trait PositionSource: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    async fn fetch(&self, window: &TimeWindow) -> Result<Vec<PositionRecord>>;
}
