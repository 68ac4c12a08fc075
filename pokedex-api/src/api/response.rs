//! JSON envelope shared by every endpoint
//!
//! Success: `{ "success": true, "data": ..., "total"?: n }`
//! Failure: `{ "success": false, "error": "...", "suggestion"?: "..." }`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

/// Message returned for InternalFailure; the cause is only logged
pub const INTERNAL_ERROR_MESSAGE: &str = "服务器内部错误";

/// Message for a failed detail lookup
pub const ENTITY_NOT_FOUND_MESSAGE: &str = "宝可梦未找到，请检查ID或名称是否正确";

/// Hint attached to a failed detail lookup
pub const MULTI_FORM_SUGGESTION: &str = "如果查询多形态宝可梦，建议使用具体的数据库ID而不是图鉴号";

/// Message for a failed simple id lookup
pub const RECORD_NOT_FOUND_MESSAGE: &str = "宝可梦未找到";

/// Successful response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            total: None,
            data,
        })
    }

    pub fn with_total(data: T, total: usize) -> Json<Self> {
        Json(Self {
            success: true,
            total: Some(total),
            data,
        })
    }
}

/// Error body
#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<String>,
}

/// API errors
#[derive(Debug)]
pub enum ApiError {
    /// Non-GET request
    MethodNotAllowed,
    /// Request axum could not extract
    BadRequest(String),
    /// Lookup yielded no record
    NotFound {
        message: String,
        suggestion: Option<String>,
    },
    /// Table load or processing failure; the detail never reaches the client
    Internal(String),
}

impl ApiError {
    /// Not-found for the detail endpoint, with the multi-form hint
    pub fn entity_not_found() -> Self {
        ApiError::NotFound {
            message: ENTITY_NOT_FOUND_MESSAGE.to_string(),
            suggestion: Some(MULTI_FORM_SUGGESTION.to_string()),
        }
    }

    /// Not-found for the simple id lookup
    pub fn record_not_found() -> Self {
        ApiError::NotFound {
            message: RECORD_NOT_FOUND_MESSAGE.to_string(),
            suggestion: None,
        }
    }
}

impl From<pokedex_common::Error> for ApiError {
    fn from(err: pokedex_common::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, suggestion) = match self {
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed".to_string(),
                None,
            ),
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message, None),
            ApiError::NotFound {
                message,
                suggestion,
            } => (StatusCode::NOT_FOUND, message, suggestion),
            ApiError::Internal(cause) => {
                error!("Request failed: {}", cause);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorBody {
            success: false,
            error: message,
            suggestion,
        });

        (status, body).into_response()
    }
}
