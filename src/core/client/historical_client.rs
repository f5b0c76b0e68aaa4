use anyhow::{anyhow, Result};
use http::{HeaderMap, StatusCode};
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use crate::config::HistoryConfig;
use crate::core::client::historical_dto::{HistoricalResponseDto, HistoricalValue};

pub const TOTAL_COUNT_HEADER: &str = "fiware-total-count";
pub const FIWARE_SERVICE_HEADER: &str = "Fiware-Service";
pub const FIWARE_SERVICE_PATH_HEADER: &str = "Fiware-ServicePath";

/// Why an attribute fetch degraded. Callers log it and fall back to an empty series.
#[derive(Debug, Error)]
pub enum RemoteFetchError {
    #[error("historical API returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("unparsable fiware-total-count header: {0:?}")]
    InvalidTotalCount(Option<String>),

    #[error("historical API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("undecodable historical API body: {0}")]
    Decode(String),
}

/// One response of the paginated endpoint.
#[derive(Debug)]
pub struct HistoricalPage {
    pub total_count: usize,
    pub values: Vec<HistoricalValue>,
}

/// Client for the historical attribute endpoint
/// `<base>/type/<entityType>/id/<entityId>/attributes/<attr>`.
#[derive(Debug, Clone)]
pub struct HistoricalClient {
    client: Client,
    config: HistoryConfig,
}

impl HistoricalClient {
    pub fn new(config: HistoryConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self { client, config })
    }

    pub fn fetch_limit(&self) -> usize {
        self.config.fetch_limit
    }

    pub fn attribute_url(&self, attr_name: &str) -> String {
        format!(
            "{}/type/{}/id/{}/attributes/{}",
            self.config.endpoint.trim_end_matches('/'),
            urlencoding::encode(&self.config.entity_type),
            urlencoding::encode(&self.config.entity_id),
            urlencoding::encode(attr_name),
        )
    }

    /// Pages through every sample of `attr_name` between `date_from` and `date_to`.
    ///
    /// The loop stops once the offset reaches the total announced by the
    /// first-or-latest page; a total of zero ends it after a single call.
    pub async fn fetch_attribute(
        &self,
        attr_name: &str,
        date_from: &str,
        date_to: &str,
    ) -> Result<Vec<HistoricalValue>, RemoteFetchError> {
        let limit = self.config.fetch_limit;
        let mut values = Vec::new();
        let mut offset = 0usize;

        loop {
            let page = self.fetch_page(attr_name, offset, date_from, date_to).await?;
            debug!(
                attr = attr_name,
                offset,
                received = page.values.len(),
                total = page.total_count,
                "Fetched historical page"
            );
            values.extend(page.values);

            offset += limit;
            if offset >= page.total_count {
                break;
            }
        }

        Ok(values)
    }

    pub async fn fetch_page(
        &self,
        attr_name: &str,
        offset: usize,
        date_from: &str,
        date_to: &str,
    ) -> Result<HistoricalPage, RemoteFetchError> {
        let limit = self.config.fetch_limit.to_string();
        let offset = offset.to_string();

        let mut request = self
            .client
            .get(self.attribute_url(attr_name))
            .header(FIWARE_SERVICE_HEADER, &self.config.fiware_service)
            .header(FIWARE_SERVICE_PATH_HEADER, &self.config.fiware_service_path)
            .query(&[
                ("hLimit", limit.as_str()),
                ("hOffset", offset.as_str()),
                ("dateFrom", date_from),
                ("dateTo", date_to),
                ("count", "true"),
            ]);
        if let Some(token) = &self.config.bearer_token {
            request = request.bearer_auth(token);
        }

        let resp = request.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RemoteFetchError::Status { status, body });
        }

        let total_count = parse_total_count(resp.headers())?;
        if total_count == 0 {
            return Ok(HistoricalPage {
                total_count,
                values: Vec::new(),
            });
        }

        let body = resp.text().await?;
        let page: HistoricalResponseDto =
            serde_json::from_str(&body).map_err(|e| RemoteFetchError::Decode(e.to_string()))?;

        Ok(HistoricalPage {
            total_count,
            values: page.into_values(),
        })
    }
}

/// Reads the announced total. Missing or non-numeric headers are an error.
pub fn parse_total_count(headers: &HeaderMap) -> Result<usize, RemoteFetchError> {
    let raw = headers
        .get(TOTAL_COUNT_HEADER)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());

    match raw.as_deref().and_then(|v| v.trim().parse::<usize>().ok()) {
        Some(total) => Ok(total),
        None => Err(RemoteFetchError::InvalidTotalCount(raw)),
    }
}
