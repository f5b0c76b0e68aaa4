//! Process configuration, read once at startup and injected into the app state.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use chrono_tz::Tz;
use validator::Validate;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_TIMEZONE: &str = "Asia/Tokyo";
pub const DEFAULT_FETCH_LIMIT: usize = 100;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Which backend serves `/positions/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendMode {
    /// Mongo collection with one document per attribute sample.
    RowStore,
    /// Mongo collection with one document per timestamp.
    ColumnStore,
    /// Paginated historical context-broker API.
    RemoteHistorical,
}

#[derive(Debug, Clone, Validate)]
pub struct MongoConfig {
    #[validate(length(min = 1))]
    pub endpoint: String,
    pub replica_set: Option<String>,
    #[validate(length(min = 1, message = "MONGODB_DATABASE is required"))]
    pub database: String,
    #[validate(length(min = 1, message = "MONGODB_COLLECTION is required"))]
    pub collection: String,
}

#[derive(Debug, Clone, Validate)]
pub struct HistoryConfig {
    #[validate(url(message = "HISTORY_ENDPOINT must be an absolute URL"))]
    pub endpoint: String,
    #[validate(length(min = 1, message = "HISTORY_ENTITY_TYPE is required"))]
    pub entity_type: String,
    #[validate(length(min = 1, message = "HISTORY_ENTITY_ID is required"))]
    pub entity_id: String,
    pub fiware_service: String,
    pub fiware_service_path: String,
    pub bearer_token: Option<String>,
    #[validate(range(min = 1, message = "HISTORY_FETCH_LIMIT must be positive"))]
    pub fetch_limit: usize,
    #[validate(range(min = 1, message = "HISTORY_REQUEST_TIMEOUT_SECS must be positive"))]
    pub request_timeout_secs: u64,
}

impl HistoryConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    /// Filter directive, e.g. `debug` or `robot_positions=debug,info`.
    pub level: Option<String>,
    /// When set, logs go to a daily rolling file here instead of stdout.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub timezone: Tz,
    pub mode: BackendMode,
    pub mongo: Option<MongoConfig>,
    pub history: Option<HistoryConfig>,
    pub log: LogConfig,
}

impl AppConfig {
    /// Reads the process environment (call `dotenvy::dotenv()` first to pick up `.env`).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests never touch process state.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = parse_port(get("LISTEN_PORT").as_deref());

        let tz_name = get("TIMEZONE").unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        let timezone: Tz = tz_name
            .parse()
            .map_err(|e| anyhow!("invalid TIMEZONE {:?}: {}", tz_name, e))?;

        let mode = select_mode(
            get("API_VERSION").as_deref(),
            get("CYGNUS_MONGO_ATTR_PERSISTENCE").as_deref(),
        );

        let (mongo, history) = match mode {
            BackendMode::RowStore | BackendMode::ColumnStore => {
                let mongo = MongoConfig {
                    endpoint: mongo_uri(
                        get("MONGODB_ENDPOINT").as_deref().unwrap_or("localhost:27017"),
                    ),
                    replica_set: get("MONGODB_REPLICASET"),
                    database: get("MONGODB_DATABASE").unwrap_or_default(),
                    collection: get("MONGODB_COLLECTION").unwrap_or_default(),
                };
                mongo.validate().context("invalid MongoDB configuration")?;
                (Some(mongo), None)
            }
            BackendMode::RemoteHistorical => {
                let history = HistoryConfig {
                    endpoint: get("HISTORY_ENDPOINT").unwrap_or_default(),
                    entity_type: get("HISTORY_ENTITY_TYPE").unwrap_or_default(),
                    entity_id: get("HISTORY_ENTITY_ID").unwrap_or_default(),
                    fiware_service: get("FIWARE_SERVICE").unwrap_or_default(),
                    fiware_service_path: get("FIWARE_SERVICEPATH").unwrap_or_else(|| "/".to_string()),
                    bearer_token: get("HISTORY_BEARER_TOKEN"),
                    fetch_limit: parse_number("HISTORY_FETCH_LIMIT", get("HISTORY_FETCH_LIMIT"))?
                        .unwrap_or(DEFAULT_FETCH_LIMIT),
                    request_timeout_secs: parse_number(
                        "HISTORY_REQUEST_TIMEOUT_SECS",
                        get("HISTORY_REQUEST_TIMEOUT_SECS"),
                    )?
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
                };
                history.validate().context("invalid historical API configuration")?;
                (None, Some(history))
            }
        };

        let log = LogConfig {
            level: get("LOG_LEVEL")
                .map(|level| normalize_log_level(&level))
                .or_else(|| get("RUST_LOG")),
            dir: get("LOG_DIR").map(PathBuf::from),
        };

        Ok(Self {
            port,
            timezone,
            mode,
            mongo,
            history,
            log,
        })
    }
}

/// `v2` picks the remote API; otherwise `row` picks the row layout and
/// anything else (unset, empty, `column`, typos) the column layout.
pub fn select_mode(api_version: Option<&str>, persistence: Option<&str>) -> BackendMode {
    if api_version == Some("v2") {
        BackendMode::RemoteHistorical
    } else if persistence == Some("row") {
        BackendMode::RowStore
    } else {
        BackendMode::ColumnStore
    }
}

/// Falls back to the default port on anything outside 1..=65535.
pub fn parse_port(raw: Option<&str>) -> u16 {
    raw.and_then(|v| v.parse::<u32>().ok())
        .filter(|p| (1..=65535).contains(p))
        .and_then(|p| u16::try_from(p).ok())
        .unwrap_or(DEFAULT_PORT)
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: Option<String>) -> Result<Option<T>> {
    raw.map(|v| {
        v.parse::<T>()
            .map_err(|_| anyhow!("{} must be a positive integer, got {:?}", key, v))
    })
    .transpose()
}

fn mongo_uri(endpoint: &str) -> String {
    if endpoint.starts_with("mongodb://") || endpoint.starts_with("mongodb+srv://") {
        endpoint.to_string()
    } else {
        format!("mongodb://{}", endpoint)
    }
}

/// Accepts the classic level names (`WARNING`, `CRITICAL`) next to tracing's.
fn normalize_log_level(level: &str) -> String {
    match level.to_ascii_lowercase().as_str() {
        "warning" => "warn".to_string(),
        "critical" => "error".to_string(),
        other => other.to_string(),
    }
}
