//! Extract the pending flash message (if any) for this request.

use crate::flash::{clear_cookie, key_from_headers, FlashMessage, FlashStore};
use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, HeaderValue},
    response::AppendHeaders,
};

/// Pending flash message, already removed from the store. `had_cookie` tells the handler
/// to expire the browser's cookie in its response.
#[derive(Clone, Debug, Default)]
pub struct IncomingFlash {
    pub message: Option<FlashMessage>,
    pub had_cookie: bool,
}

impl IncomingFlash {
    /// Headers to attach to the response: clears the cookie when one was sent.
    pub fn response_headers(&self) -> AppendHeaders<Vec<(header::HeaderName, HeaderValue)>> {
        let mut headers = Vec::new();
        if self.had_cookie {
            headers.push((header::SET_COOKIE, clear_cookie()));
        }
        AppendHeaders(headers)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for IncomingFlash
where
    FlashStore: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(key) = key_from_headers(&parts.headers) else {
            return Ok(IncomingFlash::default());
        };
        let store = FlashStore::from_ref(state);
        Ok(IncomingFlash {
            message: store.take(&key),
            had_cookie: true,
        })
    }
}
