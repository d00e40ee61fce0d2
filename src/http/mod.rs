//! HTTP wire values.
//!
//! The client speaks the smallest possible slice of HTTP/1.1: a literal GET
//! request line with a `Host` header going out, and raw bytes coming back.
//! Response bytes are delivered to handlers verbatim; there is no status
//! line or header parsing, no Content-Length accounting, and no chunked
//! decoding.
//!
//! - **`request`**: serializes the outgoing GET request
//! - **`response`**: the immutable response value handed to handlers

pub mod request;
pub mod response;

pub use response::Response;
