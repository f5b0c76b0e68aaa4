//! Position controller: connects routes to the position use cases

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, RawQuery, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::api::dto::position_query_dto::PositionQueryDto;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::domain::position::model::PositionRecord;
use crate::domain::position::service::time_window_service::{parse_time_window, TimeWindowError};
use crate::errors::AppError;

pub struct PositionController;

impl PositionController {
    pub async fn get_positions(
        State(state): State<AppState>,
        query: Result<Query<Vec<(String, String)>>, QueryRejection>,
    ) -> Result<Json<Vec<PositionRecord>>, AppError> {
        let q = match query {
            Ok(Query(pairs)) => PositionQueryDto::from_pairs(pairs),
            Err(rejection) => {
                warn!("Rejected positions query string: {}", rejection);
                return Err(TimeWindowError::InvalidParameter.into());
            }
        };

        let span = info_span!(
            "positions",
            request_id = %Uuid::new_v4(),
            backend = state.position_source.name()
        );

        async move {
            let window = parse_time_window(q.st.as_deref(), q.et.as_deref(), state.timezone)
                .map_err(|err| {
                    warn!(st = ?q.st, et = ?q.et, "Rejected positions query: {}", err);
                    AppError::from(err)
                })?;

            let result = state.position_source.fetch(&window).await;
            if let Ok(records) = &result {
                info!(
                    count = records.len(),
                    start = %window.start_iso(),
                    end = %window.end_iso(),
                    "Served positions"
                );
            }
            to_json(result)
        }
        .instrument(span)
        .await
    }

    /// `/positions` → `/positions/` with a 301, keeping the query string.
    pub async fn redirect_to_positions(RawQuery(query): RawQuery) -> impl IntoResponse {
        let location = match query {
            Some(q) if !q.is_empty() => format!("/positions/?{}", q),
            _ => "/positions/".to_string(),
        };
        (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)])
    }
}
