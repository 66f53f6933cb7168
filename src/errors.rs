use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Not found")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Could not place order: {0}")]
    PlacementFailed(String),
}

impl AppError {
    /// Placement outcome: store failures become `PlacementFailed`, the rest
    /// map as usual.
    pub fn placement(e: DomainError) -> Self {
        if e.is_storage_failure() {
            AppError::PlacementFailed(e.to_string())
        } else {
            AppError::from(e)
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::InvalidInput(msg) => AppError::BadRequest(msg),
            DomainError::InvalidSize(size) => AppError::BadRequest(format!("Invalid size '{}'", size)),
            DomainError::InvalidQuantity(msg) => AppError::BadRequest(msg),
            DomainError::NotFound => AppError::NotFound,
            e @ (DomainError::NoTransitionAvailable(_) | DomainError::ConcurrentModification(_)) => {
                AppError::Conflict(e.to_string())
            }
            e @ (DomainError::StorageUnavailable(_)
            | DomainError::AllocationFailed(_)
            | DomainError::CommitFailed(_)
            | DomainError::CorruptRecord(_)) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<actix_web::error::BlockingError> for AppError {
    fn from(e: actix_web::error::BlockingError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::BadRequest(msg) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": msg
            })),
            AppError::NotFound => HttpResponse::NotFound().json(serde_json::json!({
                "error": self.to_string()
            })),
            AppError::Conflict(msg) => HttpResponse::Conflict().json(serde_json::json!({
                "error": msg
            })),
            AppError::Internal(detail) => {
                log::error!("Request failed: {}", detail);
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "Internal server error"
                }))
            }
            AppError::PlacementFailed(detail) => {
                log::error!("Placement failed: {}", detail);
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "Could not place order"
                }))
            }
        }
    }
}
