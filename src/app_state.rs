use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono_tz::Tz;
use tracing::info;

use crate::config::{AppConfig, BackendMode};
use crate::core::client::historical_client::HistoricalClient;
use crate::core::persistence::position::position_mongo_adapter::PositionMongoAdapter;
use crate::core::persistence::position::position_repository::PositionRepository;
use crate::domain::position::service::position_source::PositionSource;
use crate::domain::position::service::remote_position_source::RemoteHistoricalPositionSource;
use crate::domain::position::service::store_position_source::{
    ColumnStorePositionSource, RowStorePositionSource,
};

#[derive(Clone)]
pub struct AppState {
    pub position_source: Arc<dyn PositionSource>,
    pub timezone: Tz,
}

impl AppState {
    pub fn new(position_source: Arc<dyn PositionSource>, timezone: Tz) -> Self {
        Self {
            position_source,
            timezone,
        }
    }
}

/// Wires the backend selected by `config.mode`.
pub async fn build_app_state(config: &AppConfig) -> Result<AppState> {
    let tz = config.timezone;

    let source: Arc<dyn PositionSource> = match config.mode {
        BackendMode::RowStore | BackendMode::ColumnStore => {
            let mongo = config
                .mongo
                .as_ref()
                .ok_or_else(|| anyhow!("MongoDB configuration missing"))?;
            let repo = PositionRepository::new(PositionMongoAdapter::connect(mongo).await?);

            if config.mode == BackendMode::RowStore {
                Arc::new(RowStorePositionSource::new(repo, tz))
            } else {
                Arc::new(ColumnStorePositionSource::new(repo, tz))
            }
        }
        BackendMode::RemoteHistorical => {
            let history = config
                .history
                .clone()
                .ok_or_else(|| anyhow!("historical API configuration missing"))?;
            Arc::new(RemoteHistoricalPositionSource::new(HistoricalClient::new(history)?, tz))
        }
    };

    info!(backend = source.name(), timezone = %tz, "Position source ready");
    Ok(AppState::new(source, tz))
}
