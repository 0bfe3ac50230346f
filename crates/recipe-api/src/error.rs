//! HTTP error mapping.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub error: String,
    /// Required fields absent from a submission (validation errors only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<Vec<String>>,
}

#[derive(Debug)]
pub enum ApiError {
    StoreUnavailable(String),
    Internal(recipe_core::Error),
    NotFound(String),
    BadRequest(String),
    /// Request could not be extracted (path, query or body).
    Rejected {
        status: StatusCode,
        message: String,
    },
    Validation {
        message: String,
        missing: Vec<&'static str>,
    },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::StoreUnavailable(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) | ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Rejected { status, .. } => *status,
        }
    }
}

impl From<recipe_core::Error> for ApiError {
    fn from(err: recipe_core::Error) -> Self {
        match err {
            recipe_core::Error::StoreUnavailable(msg) => ApiError::StoreUnavailable(msg),
            recipe_core::Error::NotFound(msg) => ApiError::NotFound(msg),
            recipe_core::Error::InvalidIdentifier(msg) => ApiError::BadRequest(msg),
            recipe_core::Error::ValidationFailed { message, missing } => {
                ApiError::Validation { message, missing }
            }
            other => ApiError::Internal(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        // Oversized bodies keep their 413; every other body problem is a 400.
        let status = match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        };
        ApiError::Rejected {
            status,
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::StoreUnavailable(msg) => {
                error!(subsystem = "api", error = %msg, "Recipe store unavailable");
                ErrorBody {
                    error: format!("Recipe store unavailable: {}", msg),
                    missing: None,
                }
            }
            ApiError::Internal(err) => {
                error!(subsystem = "api", error = %err, "Internal error");
                ErrorBody {
                    error: err.to_string(),
                    missing: None,
                }
            }
            ApiError::NotFound(msg)
            | ApiError::BadRequest(msg)
            | ApiError::Rejected { message: msg, .. } => ErrorBody {
                error: msg,
                missing: None,
            },
            ApiError::Validation { message, missing } => ErrorBody {
                error: message,
                missing: Some(missing.into_iter().map(String::from).collect()),
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_statuses() {
        let cases = [
            (
                recipe_core::Error::StoreUnavailable("down".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                recipe_core::Error::NotFound("gone".into()),
                StatusCode::NOT_FOUND,
            ),
            (
                recipe_core::Error::InvalidIdentifier("bad".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                recipe_core::Error::ValidationFailed {
                    message: "required".into(),
                    missing: vec!["name"],
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                recipe_core::Error::Serialization("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let api: ApiError = err.into();
            assert_eq!(api.status(), expected, "{:?}", api);
        }
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::NotFound("Recipe x not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_rejection_keeps_its_status() {
        let err = ApiError::Rejected {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            message: "length limit exceeded".into(),
        };
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            err.into_response().status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[test]
    fn test_validation_body_lists_missing_fields() {
        let body = ErrorBody {
            error: "required".into(),
            missing: Some(vec!["name".into()]),
        };
        let json = serde_json::to_value(body).unwrap();
        assert_eq!(json["missing"][0], "name");

        let body = ErrorBody {
            error: "nope".into(),
            missing: None,
        };
        let json = serde_json::to_value(body).unwrap();
        assert!(json.get("missing").is_none());
    }
}
