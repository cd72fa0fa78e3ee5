use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::JsonResponse;

// Extended SQLite result codes reported by the driver.
const SQLITE_MISMATCH: &str = "20";
const SQLITE_CONSTRAINT_NOTNULL: &str = "1299";
const SQLITE_CONSTRAINT_FOREIGNKEY: &str = "787";

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("bad request")]
    BadRequest,
    #[error("not found")]
    NotFound,
    #[error("path not found")]
    PathNotFound,
    #[error("internal server error")]
    ServerError,
    #[error("database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// How a driver error should surface to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseFailure {
    InvalidInput,
    MissingReference,
    Unexpected,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct RequestErrorJson {
    pub message: String,
}

impl RequestErrorJson {
    pub fn new(message: &str) -> RequestErrorJson {
        RequestErrorJson {
            message: message.to_string(),
        }
    }
}

pub fn classify_database_error(code: Option<&str>, message: &str) -> DatabaseFailure {
    match code {
        Some(SQLITE_MISMATCH) | Some(SQLITE_CONSTRAINT_NOTNULL) => DatabaseFailure::InvalidInput,
        Some(SQLITE_CONSTRAINT_FOREIGNKEY) => DatabaseFailure::MissingReference,
        _ if message.contains("NOT NULL constraint failed")
            || message.contains("datatype mismatch") =>
        {
            DatabaseFailure::InvalidInput
        }
        _ if message.contains("FOREIGN KEY constraint failed") => {
            DatabaseFailure::MissingReference
        }
        _ => DatabaseFailure::Unexpected,
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> axum::response::Response {
        self.to_json_response().into_response()
    }
}

impl RequestError {
    pub fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            RequestError::BadRequest => (StatusCode::BAD_REQUEST, "bad request"),
            RequestError::NotFound => (StatusCode::NOT_FOUND, "not found"),
            RequestError::PathNotFound => (StatusCode::NOT_FOUND, "path not found"),
            RequestError::ServerError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
            RequestError::DatabaseError(sqlx::Error::Database(e)) => {
                match classify_database_error(e.code().as_deref(), e.message()) {
                    DatabaseFailure::InvalidInput => (StatusCode::BAD_REQUEST, "bad request"),
                    DatabaseFailure::MissingReference => (StatusCode::NOT_FOUND, "not found"),
                    DatabaseFailure::Unexpected => {
                        tracing::error!("Database error: {}", e);
                        (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
                    }
                }
            }
            RequestError::DatabaseError(e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        }
    }

    pub fn to_json_response(&self) -> JsonResponse<RequestErrorJson> {
        let (status_code, message) = self.status_and_message();
        (status_code, Json(RequestErrorJson::new(message)))
    }
}
