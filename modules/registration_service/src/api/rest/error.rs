//! HTTP error mapping to RFC-9457 Problem Details

use crate::contract::RegistrationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// RFC-9457 Problem Details for HTTP API errors
#[derive(Debug, Serialize)]
pub struct Problem {
    /// A URI reference that identifies the problem type
    #[serde(rename = "type")]
    pub type_uri: String,

    /// A short, human-readable summary of the problem type
    pub title: String,

    /// The HTTP status code
    pub status: u16,

    /// A human-readable explanation specific to this occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// A URI reference that identifies the specific occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl Problem {
    /// Create a new Problem Details response
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        Self {
            type_uri: format!("https://httpstatuses.io/{}", status.as_u16()),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
        }
    }

    /// Add detail message
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Map domain errors on the view (GET) path
///
/// Token-state errors carry their own status here so the frontend can
/// distinguish a stale link (410) from a reused one (409).
pub fn map_view_error(error: RegistrationError) -> Problem {
    match error {
        RegistrationError::NotFound => {
            Problem::new(StatusCode::NOT_FOUND, "Registration Token Not Found")
                .with_detail("No registration was found for this link")
        }

        RegistrationError::Expired => {
            Problem::new(StatusCode::GONE, "Registration Token Expired").with_detail(
                "This registration link has expired; request a new one from the organizers",
            )
        }

        RegistrationError::AlreadyUsed => {
            Problem::new(StatusCode::CONFLICT, "Registration Token Already Used")
                .with_detail("This registration link has already been redeemed")
        }

        RegistrationError::Validation { message } => {
            Problem::new(StatusCode::BAD_REQUEST, "Validation Error").with_detail(message)
        }

        error => internal_problem(error),
    }
}

/// Map domain errors on the completion (POST) path
///
/// All token-state and validation failures collapse to 400 here; the
/// storage and commit failures stay 500.
pub fn map_completion_error(error: RegistrationError) -> Problem {
    match error {
        RegistrationError::NotFound
        | RegistrationError::Expired
        | RegistrationError::AlreadyUsed => Problem::new(
            StatusCode::BAD_REQUEST,
            "Invalid Registration Token",
        )
        .with_detail(error.to_string()),

        RegistrationError::Validation { message } => {
            Problem::new(StatusCode::BAD_REQUEST, "Validation Error").with_detail(message)
        }

        error => internal_problem(error),
    }
}

/// Storage and commit failures: log the cause, never leak it
fn internal_problem(error: RegistrationError) -> Problem {
    tracing::error!("Internal error: {}", error);
    Problem::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        .with_detail("An unexpected error occurred")
}
