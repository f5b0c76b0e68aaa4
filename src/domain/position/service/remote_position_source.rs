use anyhow::Result;
use async_trait::async_trait;
use chrono_tz::Tz;
use tracing::{error, info};

use crate::core::client::historical_client::{HistoricalClient, RemoteFetchError};
use crate::core::client::historical_dto::HistoricalValue;
use crate::domain::position::model::{Axis, PositionRecord, TimeWindow};
use crate::domain::position::service::position_merge::{merge_attribute_series, AttributeSeries};
use crate::domain::position::service::position_source::PositionSource;

/// Positions from the paginated historical API, one series per axis.
pub struct RemoteHistoricalPositionSource {
    client: HistoricalClient,
    tz: Tz,
}

impl RemoteHistoricalPositionSource {
    pub fn new(client: HistoricalClient, tz: Tz) -> Self {
        Self { client, tz }
    }

    /// Fetches one axis. A degraded fetch is logged and becomes an empty series,
    /// so it looks the same to the merge as an axis with no samples.
    async fn fetch_series(&self, axis: Axis, date_from: &str, date_to: &str) -> Vec<HistoricalValue> {
        match self.client.fetch_attribute(axis.as_str(), date_from, date_to).await {
            Ok(values) => values,
            Err(err) => {
                log_degraded(axis, &err);
                Vec::new()
            }
        }
    }
}

fn log_degraded(axis: Axis, err: &RemoteFetchError) {
    match err {
        RemoteFetchError::Status { status, body } => error!(
            attr = axis.as_str(),
            %status,
            body = %body,
            "Historical API rejected attribute fetch; using empty series"
        ),
        other => error!(
            attr = axis.as_str(),
            error = %other,
            "Historical attribute fetch failed; using empty series"
        ),
    }
}

#[async_trait]
impl PositionSource for RemoteHistoricalPositionSource {
    fn name(&self) -> &'static str {
        "remote-historical"
    }

    async fn fetch(&self, window: &TimeWindow) -> Result<Vec<PositionRecord>> {
        let date_from = window.start_iso();
        let date_to = window.end_iso();

        // pagination within an axis is sequential, the axes themselves are not
        let (x, y, z, theta) = futures::join!(
            self.fetch_series(Axis::X, &date_from, &date_to),
            self.fetch_series(Axis::Y, &date_from, &date_to),
            self.fetch_series(Axis::Z, &date_from, &date_to),
            self.fetch_series(Axis::Theta, &date_from, &date_to),
        );
        info!(
            x = x.len(),
            y = y.len(),
            z = z.len(),
            theta = theta.len(),
            page_size = self.client.fetch_limit(),
            "Fetched historical series"
        );

        Ok(merge_attribute_series(AttributeSeries { x, y, z, theta }, self.tz)?)
    }
}
