//! Error responses returned by the HTTP API.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use delivery_core::ProductId;
use serde::{Deserialize, Serialize};

/// JSON body sent with every error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine readable error kind
    pub error: String,
    /// Human readable description
    pub message: String,
    /// Extra context, such as the products nobody stocks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Failures surfaced to API callers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request used a method other than POST (405)
    #[error("Only POST method is allowed")]
    MethodNotAllowed,

    /// Body was not a product to quantity JSON object (400)
    #[error("Invalid request body: {0}")]
    BadRequest(String),

    /// Order names products no facility stocks (422)
    #[error("Order cannot be fulfilled, no facility stocks: {}", .0.join(", "))]
    UnsatisfiableOrder(Vec<ProductId>),

    /// Search could not be completed (500)
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::UnsatisfiableOrder(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::MethodNotAllowed => "method_not_allowed",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::UnsatisfiableOrder(_) => "unsatisfiable_order",
            ApiError::Internal(_) => "internal_error",
        }
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        let details = match self {
            ApiError::UnsatisfiableOrder(products) => {
                Some(serde_json::json!({ "unstocked_products": products }))
            },
            _ => None,
        };

        ErrorResponse {
            error: self.kind().to_string(),
            message: self.to_string(),
            details,
        }
    }
}

impl From<delivery_core::Error> for ApiError {
    fn from(err: delivery_core::Error) -> Self {
        match err {
            delivery_core::Error::InvalidOrder(msg) => ApiError::BadRequest(msg),
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_error_response());

        if let ApiError::MethodNotAllowed = self {
            return (status, [(header::ALLOW, "POST")], body).into_response();
        }
        (status, body).into_response()
    }
}
