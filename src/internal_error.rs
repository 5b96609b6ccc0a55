use rocket::http::Status;
use rocket::response::{self, status, Responder};
use rocket::serde::json::Json;
use rocket::{catch, Request};
use serde::Serialize;
use thiserror::Error;

use std::sync::PoisonError;

#[derive(Debug, Error)]
pub enum InternalError {
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("{what} {id} not found")]
    NotFound { what: &'static str, id: String },

    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl InternalError {
    pub fn validation(what: impl Into<String>) -> InternalError {
        InternalError::Validation(what.into())
    }

    pub fn not_found(what: &'static str, id: &str) -> InternalError {
        InternalError::NotFound {
            what,
            id: id.to_string(),
        }
    }

    pub fn status(&self) -> Status {
        match self {
            InternalError::Validation(_) => Status::BadRequest,
            InternalError::NotFound { .. } => Status::NotFound,
            InternalError::StorageUnavailable(_) => Status::InternalServerError,
        }
    }
}

impl<T> From<PoisonError<T>> for InternalError {
    fn from(e: PoisonError<T>) -> InternalError {
        InternalError::StorageUnavailable(e.to_string())
    }
}

impl From<rusqlite::Error> for InternalError {
    fn from(e: rusqlite::Error) -> InternalError {
        InternalError::StorageUnavailable(e.to_string())
    }
}

#[derive(Serialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

impl<'r> Responder<'r, 'static> for InternalError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        if status == Status::InternalServerError {
            tracing::error!(error = %self, uri = %request.uri(), "request failed");
        } else {
            tracing::debug!(error = %self, uri = %request.uri(), "request rejected");
        }

        status::Custom(
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
        .respond_to(request)
    }
}

/// Answers requests rocket rejects before a handler runs, such as a body that
/// does not deserialize or an unknown route, in the same shape as `InternalError`.
#[catch(default)]
pub fn json_catcher(status: Status, request: &Request<'_>) -> status::Custom<Json<ErrorResponse>> {
    tracing::debug!(status = status.code, uri = %request.uri(), "request rejected by rocket");

    status::Custom(
        status,
        Json(ErrorResponse {
            error: status.reason().unwrap_or("request failed").to_lowercase(),
        }),
    )
}

pub type InternalResult<T> = Result<T, InternalError>;
