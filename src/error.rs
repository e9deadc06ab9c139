use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use derive_more::Display;
use serde_json::json;

/// Request-terminal error taxonomy. Every variant maps to exactly one
/// HTTP status; nothing is retried or recovered locally.
#[derive(Debug, Display)]
pub enum ApiError {
    #[display(fmt = "{}: {}", field, message)]
    Validation { field: String, message: String },

    #[display(fmt = "{}", message)]
    Conflict { message: String },

    #[display(fmt = "{}", message)]
    NotFound { message: String },

    #[display(fmt = "{}", message)]
    Database { message: String },
}

impl ApiError {
    pub fn validation(field: &str, message: &str) -> Self {
        ApiError::Validation {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    pub fn conflict(message: String) -> Self {
        ApiError::Conflict { message }
    }

    pub fn not_found(message: String) -> Self {
        ApiError::NotFound { message }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Validation { field, message } => json!({
                "detail": message,
                "field": field
            }),
            ApiError::Conflict { message } | ApiError::NotFound { message } => json!({
                "detail": message
            }),
            // Database details stay in the logs
            ApiError::Database { .. } => json!({
                "detail": "Internal Server Error"
            }),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        // Two racing inserts for the same key: the UNIQUE constraint lets
        // exactly one through, the loser surfaces as a conflict.
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return ApiError::Conflict {
                    message: "Record already exists".to_string(),
                };
            }
        }

        ApiError::Database {
            message: e.to_string(),
        }
    }
}
