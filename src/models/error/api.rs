use actix_web::{HttpResponse, ResponseError};
use eyre::Report;
use thiserror::Error;

use crate::models::{ApiResponse, RelayerError, RepositoryError};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Internal Server Error: {0}")]
    InternalEyreError(#[from] Report),

    #[error("Internal Server Error: {0}")]
    InternalError(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Bad Gateway: {0}")]
    BadGateway(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::InternalError(msg) => {
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error(msg))
            }
            ApiError::NotFound(msg) => HttpResponse::NotFound().json(ApiResponse::<()>::error(msg)),
            ApiError::BadRequest(msg) => {
                HttpResponse::BadRequest().json(ApiResponse::<()>::error(msg))
            }
            ApiError::ServiceUnavailable(msg) => {
                HttpResponse::ServiceUnavailable().json(ApiResponse::<()>::error(msg))
            }
            ApiError::BadGateway(msg) => {
                HttpResponse::BadGateway().json(ApiResponse::<()>::error(msg))
            }
            ApiError::Conflict(msg) => HttpResponse::Conflict().json(ApiResponse::<()>::error(msg)),
            ApiError::InternalEyreError(msg) => {
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error(msg.to_string()))
            }
        }
    }
}

impl From<RelayerError> for ApiError {
    fn from(error: RelayerError) -> Self {
        match error {
            RelayerError::InvalidRequest(msg) => ApiError::BadRequest(msg),
            RelayerError::LedgerUnavailable(msg) => ApiError::ServiceUnavailable(msg),
            RelayerError::SubmissionFailed(msg) => ApiError::BadGateway(msg),
            RelayerError::NonceConflict { address, reason } => {
                ApiError::Conflict(format!("nonce conflict for {}: {}", address, reason))
            }
            RelayerError::Repository(err) => err.into(),
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound(msg) => ApiError::NotFound(msg),
            RepositoryError::AlreadyExists(msg) | RepositoryError::InvalidData(msg) => {
                ApiError::InternalError(msg)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_relayer_error_status_mapping() {
        let cases = [
            (
                ApiError::from(RelayerError::InvalidRequest("bad".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(RelayerError::LedgerUnavailable("down".into())),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ApiError::from(RelayerError::SubmissionFailed("rejected".into())),
                StatusCode::BAD_GATEWAY,
            ),
            (
                ApiError::from(RelayerError::NonceConflict {
                    address: "0xabc".into(),
                    reason: "nonce too low".into(),
                }),
                StatusCode::CONFLICT,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.error_response().status(), expected);
        }
    }

    #[test]
    fn test_repository_not_found_maps_to_404() {
        let err = ApiError::from(RepositoryError::NotFound("event".into()));
        assert_eq!(err.error_response().status(), StatusCode::NOT_FOUND);
    }
}
