//! Response bodies and the rejection taxonomy.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    MissingSignature,
    InvalidSignature,
    InvalidBody,
    BodyTooLarge,
    MissingParams,
    PasswordMismatch,
    VerificationError,
    NotFound,
    MethodNotAllowed,
}

/// JSON body of every response.
#[derive(ToSchema, Serialize, Debug, PartialEq, Eq)]
pub struct Reply {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    errcode: Option<ErrorCode>,
}

impl Reply {
    #[must_use]
    pub const fn success() -> Self {
        Self {
            success: true,
            errcode: None,
        }
    }

    #[must_use]
    pub const fn failure(errcode: ErrorCode) -> Self {
        Self {
            success: false,
            errcode: Some(errcode),
        }
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Every way a request can end before or instead of a verdict.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("missing request signature")]
    MissingSignature,
    #[error("invalid request signature")]
    InvalidSignature,
    #[error("request body is not valid JSON")]
    InvalidBody,
    #[error("request body exceeds the configured limit")]
    BodyTooLarge,
    #[error("request body is missing required parameters")]
    MissingParams,
    #[error("password verification failed")]
    Verification,
    #[error("no route for this path")]
    NotFound,
    #[error("method not allowed on this path")]
    MethodNotAllowed,
}

impl Rejection {
    #[must_use]
    pub const fn status(self) -> StatusCode {
        match self {
            Self::MissingSignature | Self::InvalidSignature => StatusCode::UNAUTHORIZED,
            Self::InvalidBody | Self::MissingParams => StatusCode::BAD_REQUEST,
            Self::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Verification => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    #[must_use]
    pub const fn errcode(self) -> ErrorCode {
        match self {
            Self::MissingSignature => ErrorCode::MissingSignature,
            Self::InvalidSignature => ErrorCode::InvalidSignature,
            Self::InvalidBody => ErrorCode::InvalidBody,
            Self::BodyTooLarge => ErrorCode::BodyTooLarge,
            Self::MissingParams => ErrorCode::MissingParams,
            Self::Verification => ErrorCode::VerificationError,
            Self::NotFound => ErrorCode::NotFound,
            Self::MethodNotAllowed => ErrorCode::MethodNotAllowed,
        }
    }

    /// Coarse category for logs.
    #[must_use]
    pub const fn category(self) -> &'static str {
        match self {
            Self::MissingSignature | Self::InvalidSignature => "authentication",
            Self::InvalidBody | Self::BodyTooLarge | Self::MissingParams => "validation",
            Self::Verification => "operation",
            Self::NotFound | Self::MethodNotAllowed => "routing",
        }
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        (self.status(), Json(Reply::failure(self.errcode()))).into_response()
    }
}
