use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::ml::forecast::ForecastError;
use crate::ml::model::ModelError;

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub body: ApiError,
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ApiError {
                code: "VALIDATION_ERROR".into(),
                message: msg.into(),
                details: None,
            },
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body: ApiError {
                code: "NOT_FOUND".into(),
                message: format!("{resource} with id '{id}' not found"),
                details: None,
            },
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ApiError {
                code: "INTERNAL_ERROR".into(),
                message: msg.into(),
                details: None,
            },
        }
    }

    pub fn service_unavailable(service: &str) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: ApiError {
                code: "SERVICE_UNAVAILABLE".into(),
                message: format!("{service} is currently unavailable"),
                details: None,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {:?}", err);
        match err {
            sqlx::Error::RowNotFound => Self::not_found("Resource", "unknown"),
            _ => Self::internal("Database error"),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        tracing::error!("Internal error: {:?}", err);
        Self::internal(err.to_string())
    }
}

/// Engine errors surface untouched: a bad horizon is the caller's mistake,
/// anything from the model is a deployment or runtime fault. Neither is
/// retried here since the computation is deterministic.
impl From<ForecastError> for AppError {
    fn from(err: ForecastError) -> Self {
        match err {
            ForecastError::InvalidHorizon(_) => Self::bad_request(err.to_string()),
            ForecastError::Model(ref model_err) => {
                tracing::error!("Model error: {:?}", model_err);
                match model_err {
                    ModelError::SchemaMismatch { .. } => Self {
                        status: StatusCode::INTERNAL_SERVER_ERROR,
                        body: ApiError {
                            code: "MODEL_SCHEMA_MISMATCH".into(),
                            message: err.to_string(),
                            details: None,
                        },
                    },
                    _ => Self::internal(err.to_string()),
                }
            }
        }
    }
}
