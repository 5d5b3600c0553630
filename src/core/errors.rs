use spin_sdk::http::Response;
use std::fmt;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized,
    InvalidToken,
    NotFound(String),
    Conflict(String),
    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::Unauthorized => write!(f, "Unauthorized"),
            ApiError::InvalidToken => write!(f, "Invalid token"),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal Error: {}", msg),
        }
    }
}

fn error_response(status: u16, detail: &str) -> Response {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(
            serde_json::to_vec(&serde_json::json!({ "detail": detail }))
                .unwrap_or_default(),
        )
        .build()
}

impl From<ApiError> for Response {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::BadRequest(msg) => error_response(400, &msg),
            ApiError::Unauthorized => error_response(401, "Invalid credentials"),
            ApiError::InvalidToken => error_response(401, "Invalid token"),
            ApiError::NotFound(msg) => error_response(404, &msg),
            ApiError::Conflict(msg) => error_response(409, &msg),
            ApiError::InternalError(msg) => {
                // Storage and other unexpected failures must not leak detail.
                tracing::error!("internal error: {}", msg);
                error_response(500, "Internal server error")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}
