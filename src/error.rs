use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use diesel::r2d2::PoolError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum CatalogError {
    /// A write named a row (e.g. its restaurant) that does not exist.
    #[error("{entity} {id} not found")]
    ReferenceNotFound { entity: &'static str, id: i32 },

    /// The addressed resource does not exist.
    #[error("{entity} {id} not found")]
    ResourceNotFound { entity: &'static str, id: i32 },

    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("failed to acquire a database connection: {0}")]
    Pool(#[from] PoolError),
}

impl CatalogError {
    pub(crate) fn unknown_restaurant(id: i32) -> Self {
        CatalogError::ReferenceNotFound {
            entity: "restaurant",
            id,
        }
    }

    pub(crate) fn not_found(entity: &'static str, id: i32) -> Self {
        CatalogError::ResourceNotFound { entity, id }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl ResponseError for CatalogError {
    fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::ReferenceNotFound { .. } => StatusCode::BAD_REQUEST,
            CatalogError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            CatalogError::Database(_) | CatalogError::Pool(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let detail = if status.is_server_error() {
            log::error!("request failed: {}", self);
            "internal server error".to_string()
        } else {
            self.to_string()
        };
        detail_response(status, detail)
    }
}

/// Builds the `{"detail": ...}` body used for every error response.
pub(crate) fn detail_response(status: StatusCode, detail: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorBody {
        detail: detail.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_client_statuses() {
        assert_eq!(
            CatalogError::unknown_restaurant(3).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CatalogError::not_found("pizza", 3).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            CatalogError::not_found("pizza", 3).to_string(),
            "pizza 3 not found"
        );
    }

    #[test]
    fn database_failures_are_server_errors() {
        let err = CatalogError::from(diesel::result::Error::RollbackTransaction);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
