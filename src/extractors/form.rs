//! Form body extractor whose rejections render as HTML error pages.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    body::{Body, Bytes},
    extract::{FromRequest, Request},
    http::StatusCode,
    Form,
};
use serde::de::DeserializeOwned;

/// `application/x-www-form-urlencoded` body. Unlike [`axum::Form`], percent-escapes that
/// decode to invalid UTF-8 are refused instead of being replaced with U+FFFD, and every
/// rejection is an [`AppError`].
#[derive(Debug, Clone)]
pub struct PageForm<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for PageForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = req.into_parts();
        let bytes = Bytes::from_request(Request::new(body), state)
            .await
            .map_err(|r| rejected(r.status(), r.body_text()))?;
        check_utf8(&bytes)?;
        let req = Request::from_parts(parts, Body::from(bytes));
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|r| rejected(r.status(), r.body_text()))?;
        Ok(PageForm(value))
    }
}

fn rejected(status: StatusCode, text: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(text)
    } else {
        AppError::BadRequest(text)
    }
}

/// Every `key=value` pair must decode to valid UTF-8.
fn check_utf8(body: &[u8]) -> Result<(), AppError> {
    let invalid = || AppError::Validation("form data must be valid UTF-8".into());
    let raw = std::str::from_utf8(body).map_err(|_| invalid())?;
    for pair in raw.split('&').filter(|p| !p.is_empty()) {
        urlencoding::decode(pair).map_err(|_| invalid())?;
    }
    Ok(())
}
