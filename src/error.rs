use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    MailAddress(#[from] lettre::address::AddressError),
    #[error(transparent)]
    MailCompose(#[from] lettre::error::Error),
    #[error(transparent)]
    MailTransport(#[from] lettre::transport::smtp::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("not implemented")]
    NotImplemented,
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Not-found stays a 400 with its domain message; the original API
        // never answered 404 and clients depend on that.
        let (status, message) = match self {
            AppError::BadRequest(message) | AppError::NotFound(message) => {
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::NotImplemented => {
                (StatusCode::NOT_IMPLEMENTED, "not implemented".to_string())
            }
            err => {
                error!("request failed: {err:?}");
                (
                    StatusCode::BAD_REQUEST,
                    "something went wrong, try again".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}
