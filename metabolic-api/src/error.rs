use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use log::error;
use metabolic_model::{UnknownFood, ValidationErrors};
use metabolic_store::StoreError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid input data")]
    Validation(#[from] ValidationErrors),
    #[error("Invalid input data: {0}")]
    InvalidPayload(String),
    #[error(transparent)]
    UnknownFood(#[from] UnknownFood),
    #[error("Not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidPayload(_) | ApiError::UnknownFood(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::Serialization(_)) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Validation(errors) => json!({ "error": self.to_string(), "fields": errors }),
            ApiError::Store(e) if self.status_code().is_server_error() => {
                error!("Store failure: {}", e);
                json!({ "error": "Internal server error" })
            }
            _ => json!({ "error": self.to_string() }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
