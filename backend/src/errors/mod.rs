//! Global application error types and handlers.
//!
//! This module defines the error type returned by every route handler and its
//! conversion into an HTTP response, so failures are reported consistently.

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::database::DatabaseError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("store query failed: {0}")]
    Query(#[from] DatabaseError),

    #[error("no report data for company `{0}`")]
    NotFound(String),

    #[error("template rendering failed: {0}")]
    Render(#[from] askama::Error),

    #[error("chart data serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Query(_) | AppError::Render(_) | AppError::Serialize(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Text safe to show to the client. Internal causes stay in the logs.
    fn public_message(&self) -> String {
        match self {
            AppError::NotFound(_) => self.to_string(),
            _ => "The report could not be produced.".to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorPage<'a> {
    status: u16,
    reason: &'a str,
    message: &'a str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        let message = self.public_message();
        let page = ErrorPage {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Error"),
            message: &message,
        };
        match page.render() {
            Ok(html) => (status, Html(html)).into_response(),
            Err(err) => {
                warn!(error = %err, "error page failed to render");
                (status, message).into_response()
            }
        }
    }
}
