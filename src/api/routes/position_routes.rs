//! Position routes (e.g., /positions/)

use axum::{routing::get, Router};

use crate::api::controller::position::PositionController;
use crate::app_state::AppState;

pub fn position_routes() -> Router<AppState> {
    Router::new()
        .route("/positions/", get(PositionController::get_positions))
        .route("/positions", get(PositionController::redirect_to_positions))
}
