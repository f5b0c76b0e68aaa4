#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use robot_positions::config::HistoryConfig;
use robot_positions::core::persistence::position::attribute_row_entity::AttributeRowEntity;
use robot_positions::core::persistence::position::position_column_entity::PositionColumnEntity;
use robot_positions::core::persistence::position::position_repository_trait::{
    AttributeRowRepository, PositionColumnRepository,
};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

pub fn t(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

/// In-memory row store honouring `[start, end)`.
#[derive(Default)]
pub struct MemoryRowRepository {
    pub rows: Vec<AttributeRowEntity>,
    pub calls: Mutex<usize>,
}

#[async_trait]
impl AttributeRowRepository for MemoryRowRepository {
    async fn get_rows_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AttributeRowEntity>> {
        *self.calls.lock().unwrap() += 1;
        Ok(self
            .rows
            .iter()
            .filter(|r| r.time >= start && r.time < end)
            .cloned()
            .collect())
    }
}

/// Counts calls through a shared handle so tests can inspect it after handing
/// the repository over to the app state.
#[derive(Clone, Default)]
pub struct SharedRowRepository(pub Arc<MemoryRowRepository>);

#[async_trait]
impl AttributeRowRepository for SharedRowRepository {
    async fn get_rows_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AttributeRowEntity>> {
        self.0.get_rows_between(start, end).await
    }
}

/// In-memory column store honouring `[start, end)`.
#[derive(Default)]
pub struct MemoryColumnRepository {
    pub rows: Vec<PositionColumnEntity>,
}

#[async_trait]
impl PositionColumnRepository for MemoryColumnRepository {
    async fn get_columns_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<PositionColumnEntity>> {
        Ok(self
            .rows
            .iter()
            .filter(|r| r.time >= start && r.time < end)
            .cloned()
            .collect())
    }
}

/// One request seen by the fake historical service.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub attr: String,
    pub limit: usize,
    pub offset: usize,
    pub query: HashMap<String, String>,
    pub fiware_service: Option<String>,
    pub fiware_service_path: Option<String>,
}

/// How a page at or past a given offset goes wrong.
#[derive(Debug, Clone)]
pub enum PageFault {
    Status(StatusCode),
    TotalCount(String),
}

/// Fake historical API: serves `series[attr]` in pages of `hLimit`.
#[derive(Default)]
pub struct FakeHistory {
    pub series: HashMap<String, Vec<Value>>,
    /// Overrides the `fiware-total-count` header (per attribute); default is the series length.
    pub total_override: HashMap<String, String>,
    /// Attributes answered with this status instead of data.
    pub failures: HashMap<String, StatusCode>,
    /// Attributes whose pages from the given offset on are faulty.
    pub faults_from_offset: HashMap<String, (usize, PageFault)>,
    pub calls: Mutex<Vec<RecordedCall>>,
}

impl FakeHistory {
    pub fn calls_for(&self, attr: &str) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.attr == attr)
            .cloned()
            .collect()
    }
}

async fn serve_attribute(
    State(fake): State<Arc<FakeHistory>>,
    Path((_entity_type, _entity_id, attr)): Path<(String, String, String)>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let limit: usize = query.get("hLimit").and_then(|v| v.parse().ok()).unwrap_or(0);
    let offset: usize = query.get("hOffset").and_then(|v| v.parse().ok()).unwrap_or(0);
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    fake.calls.lock().unwrap().push(RecordedCall {
        attr: attr.clone(),
        limit,
        offset,
        query: query.clone(),
        fiware_service: header("fiware-service"),
        fiware_service_path: header("fiware-servicepath"),
    });

    if let Some(status) = fake.failures.get(&attr) {
        return (*status, "upstream exploded").into_response();
    }

    let series = fake.series.get(&attr).cloned().unwrap_or_default();
    let page: Vec<Value> = series.iter().skip(offset).take(limit).cloned().collect();
    let mut total = fake
        .total_override
        .get(&attr)
        .cloned()
        .unwrap_or_else(|| series.len().to_string());

    match fake.faults_from_offset.get(&attr) {
        Some((from, PageFault::Status(status))) if offset >= *from => {
            return (*status, "upstream exploded").into_response();
        }
        Some((from, PageFault::TotalCount(raw))) if offset >= *from => total = raw.clone(),
        _ => {}
    }

    let body = json!({
        "contextResponses": [{
            "contextElement": {
                "attributes": [{ "name": attr, "values": page }],
                "id": "robot01",
                "isPattern": false,
                "type": "robot"
            },
            "statusCode": { "code": "200", "reasonPhrase": "OK" }
        }]
    });

    ([("fiware-total-count", total)], Json(body)).into_response()
}

/// Starts the fake on an ephemeral local port and returns its base URL.
pub async fn spawn_fake_history(fake: Arc<FakeHistory>) -> String {
    let app = Router::new()
        .route(
            "/STH/v1/contextEntities/type/{entity_type}/id/{entity_id}/attributes/{attr}",
            get(serve_attribute),
        )
        .with_state(fake);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/STH/v1/contextEntities", addr)
}

pub fn history_config(endpoint: &str, fetch_limit: usize) -> HistoryConfig {
    HistoryConfig {
        endpoint: endpoint.to_string(),
        entity_type: "robot".to_string(),
        entity_id: "robot01".to_string(),
        fiware_service: "tenant".to_string(),
        fiware_service_path: "/robots".to_string(),
        bearer_token: None,
        fetch_limit,
        request_timeout_secs: 5,
    }
}

/// A historical sample entry as the service returns it.
pub fn sample(recv_time: &str, value: Value) -> Value {
    json!({ "_id": "id", "recvTime": recv_time, "attrType": "float", "attrValue": value })
}
