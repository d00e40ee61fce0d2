use std::borrow::Cow;

use bytes::Bytes;

/// A completed response: the originating URL plus the bytes received on the
/// connection, exactly as they arrived.
///
/// Produced once per dispatched request, at the moment the peer closes the
/// connection. The body is the entire byte stream (status line, headers and
/// entity together); nothing is parsed out of it.
#[derive(Debug, Clone)]
pub struct Response {
    url: String,
    body: Bytes,
}

impl Response {
    pub fn new(url: impl Into<String>, body: Bytes) -> Self {
        Self {
            url: url.into(),
            body,
        }
    }

    /// The URL the request was dispatched for.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Raw response bytes as received.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Lossy UTF-8 view of the body, for logging.
    pub fn body_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}
