pub mod participants;
pub mod trips;

use axum::Router;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::{error::AppError, state::AppState};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/trips", trips::router())
        .nest("/participants", participants::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub(crate) fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest("uuid invalid".to_string()))
}
