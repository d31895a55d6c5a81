//! One-shot status messages carried across a redirect.
//!
//! Messages live server-side keyed by a random id; the browser only holds the id in an
//! `HttpOnly` cookie. Reading a message removes it, and entries older than the TTL are
//! dropped on the next write.

use axum::http::{header, HeaderMap, HeaderValue};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use uuid::Uuid;

pub const FLASH_COOKIE: &str = "flash";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FlashMessage {
    pub message: String,
    pub kind: FlashKind,
}

impl FlashMessage {
    pub fn success(message: impl Into<String>) -> Self {
        FlashMessage {
            message: message.into(),
            kind: FlashKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        FlashMessage {
            message: message.into(),
            kind: FlashKind::Error,
        }
    }
}

#[derive(Clone)]
pub struct FlashStore {
    entries: Arc<Mutex<HashMap<Uuid, (FlashMessage, Instant)>>>,
    ttl: Duration,
}

impl FlashStore {
    pub fn new(ttl: Duration) -> Self {
        FlashStore {
            entries: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    /// Store a message and return the key to hand to the browser.
    pub fn put(&self, msg: FlashMessage) -> Uuid {
        let key = Uuid::new_v4();
        let now = Instant::now();
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.retain(|_, (_, at)| now.duration_since(*at) < self.ttl);
        entries.insert(key, (msg, now));
        key
    }

    /// Remove and return the message for `key`, if present and not expired.
    pub fn take(&self, key: &Uuid) -> Option<FlashMessage> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let (msg, at) = entries.remove(key)?;
        (at.elapsed() < self.ttl).then_some(msg)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `Set-Cookie` value pointing the browser at a stored message.
pub fn set_cookie(key: &Uuid) -> HeaderValue {
    let cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", FLASH_COOKIE, key);
    HeaderValue::from_str(&cookie).unwrap_or_else(|_| HeaderValue::from_static(""))
}

/// `Set-Cookie` value that expires the flash cookie.
pub fn clear_cookie() -> HeaderValue {
    HeaderValue::from_static("flash=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Flash key from the request's `Cookie` headers, if any.
pub fn key_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == FLASH_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_delivered_once() {
        let store = FlashStore::new(Duration::from_secs(60));
        let key = store.put(FlashMessage::success("saved"));
        assert_eq!(store.take(&key), Some(FlashMessage::success("saved")));
        assert_eq!(store.take(&key), None);
        assert!(store.is_empty());
    }

    #[test]
    fn expired_messages_are_dropped() {
        let store = FlashStore::new(Duration::ZERO);
        let key = store.put(FlashMessage::error("late"));
        assert_eq!(store.take(&key), None);
        store.put(FlashMessage::error("a"));
        store.put(FlashMessage::error("b"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn cookie_round_trips_through_headers() {
        let key = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        let value = format!("theme=dark; {}={}", FLASH_COOKIE, key);
        headers.insert(header::COOKIE, HeaderValue::from_str(&value).unwrap());
        assert_eq!(key_from_headers(&headers), Some(key));
        assert!(set_cookie(&key).to_str().unwrap().starts_with("flash="));
    }

    #[test]
    fn malformed_cookie_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("flash=not-a-uuid"));
        assert_eq!(key_from_headers(&headers), None);
    }

    #[test]
    fn kind_renders_lowercase() {
        let value = minijinja::Value::from_serialize(FlashKind::Error);
        assert_eq!(value.to_string(), "error");
    }
}
