//! Readiness-based socket multiplexing.
//!
//! This module wraps one OS poll context (epoll on Linux, kqueue on macOS,
//! via `mio`) behind a registration table, so a single thread can wait on an
//! arbitrary number of in-flight sockets at once instead of blocking per
//! connection.
//!
//! # Architecture
//!
//! ```text
//!   register(socket, attachment)
//!              │
//!              ▼
//!   ┌─────────────────────────────┐
//!   │        Multiplexer          │
//!   │  ┌────────┐  ┌───────────┐  │
//!   │  │ Poll   │  │ Token →   │  │
//!   │  │ context│  │ connection│  │
//!   │  └───┬────┘  └───────────┘  │
//!   └──────┼──────────────────────┘
//!          │ poll(timeout)
//!          ▼
//!   ready tokens ──▶ caller reads each socket, deregisters on completion
//! ```
//!
//! Each registered socket is paired with a caller-supplied attachment (the
//! request metadata) and identified by an opaque token. Polling reports
//! which tokens have data without touching the sockets; reading, closing
//! and completion stay with the caller.
//!
//! # Example
//!
//! ```ignore
//! use courier::mux::Multiplexer;
//! use std::time::Duration;
//!
//! let mut mux: Multiplexer<String> = Multiplexer::new()?;
//! let token = mux.register(stream, "http://example.com/".to_string())?;
//!
//! // Non-blocking: an empty set just means nothing is ready yet.
//! for token in mux.poll(Some(Duration::ZERO))? {
//!     let (stream, url) = mux.connection_mut(token).unwrap();
//!     // read from stream ...
//! }
//! ```

pub mod poller;

pub use poller::Multiplexer;
