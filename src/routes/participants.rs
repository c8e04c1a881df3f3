use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::patch,
    Router,
};

use crate::{error::AppError, routes::parse_id, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/:id/confirm", patch(confirm_participant))
}

/// Confirmation happens exactly once; a repeat confirm is a user error, not
/// an idempotent no-op.
async fn confirm_participant(
    State(state): State<AppState>,
    Path(participant_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&participant_id)?;

    let participant = state
        .store
        .get_participant(id)
        .await?
        .ok_or_else(|| AppError::NotFound("participant not found".to_string()))?;

    if participant.is_confirmed {
        return Err(AppError::BadRequest(
            "participant already confirmed".to_string(),
        ));
    }

    state.store.confirm_participant(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
