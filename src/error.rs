//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("unknown profile: {0} (expected dev, prod or default)")]
    UnknownProfile(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("validation: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("persistence: {0}")]
    Persistence(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("template: {0}")]
    Template(#[from] minijinja::Error),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::NotFound(_)
            | AppError::Persistence(_)
            | AppError::Db(_)
            | AppError::Template(_)
            | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short title and user-facing message for the error page. Server-side errors get
    /// static text only. A missing sample is reported like any other unexpected failure;
    /// only unrouted paths produce a 404.
    pub fn page_text(&self) -> (&'static str, String) {
        match self {
            AppError::Validation(msg) | AppError::BadRequest(msg) => {
                ("Invalid request", msg.clone())
            }
            AppError::PayloadTooLarge(_) => (
                "Request too large",
                "The submitted form is larger than the server accepts.".into(),
            ),
            AppError::Persistence(_) | AppError::Db(_) => (
                "Database error",
                "An error occurred while accessing the database. Please try again later.".into(),
            ),
            AppError::Template(_) => (
                "Page rendering error",
                "An error occurred while rendering the page.".into(),
            ),
            AppError::NotFound(_) | AppError::Config(_) => (
                "Internal server error",
                "An unexpected error occurred.".into(),
            ),
        }
    }

    /// Message suitable for a flash notice after a failed form submission.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) | AppError::BadRequest(msg) | AppError::NotFound(msg) => {
                msg.clone()
            }
            other => other.page_text().1,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }
        let (title, message) = self.page_text();
        error_page(status, title, &message)
    }
}

/// Error page for a bare status produced outside the handlers (body limit, extractor
/// rejections that never reached `AppError`).
pub fn status_page(status: StatusCode) -> Response {
    let title = status.canonical_reason().unwrap_or("Error");
    let message = match status {
        StatusCode::PAYLOAD_TOO_LARGE => "The submitted form is larger than the server accepts.",
        s if s.is_server_error() => "An unexpected error occurred.",
        _ => "The request could not be processed.",
    };
    error_page(status, title, message)
}

/// Render the error template; plain text if the template itself fails.
pub fn error_page(status: StatusCode, title: &str, message: &str) -> Response {
    match crate::views::render_error(status, title, message) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "error page failed to render");
            (status, format!("{} {}: {}", status.as_u16(), title, message)).into_response()
        }
    }
}
