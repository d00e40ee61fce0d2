use std::collections::VecDeque;
use std::io::Write;
use std::net::TcpStream;
use std::time::Duration;

use mio::Token;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::client::connection::{Handler, InFlight, ReadOutcome};
use crate::config::Config;
use crate::error::{ClientError, Result};
use crate::http::request;
use crate::mux::Multiplexer;

struct Pending {
    url: String,
    handler: Handler,
}

/// A single-threaded fetch session: a queue of pending URLs plus the
/// multiplexer holding every connection in flight.
///
/// Requests enter through [`submit`](Session::submit) (queued) or
/// [`dispatch`](Session::dispatch) (immediate); [`run`](Session::run) drives
/// everything to completion. One thread owns all of it; there are no locks
/// and handlers run on the calling thread.
pub struct Session {
    mux: Multiplexer<InFlight>,
    pending: VecDeque<Pending>,
    chunk_size: usize,
    poll_timeout: Duration,
}

impl Session {
    pub fn new(cfg: &Config) -> Result<Self> {
        Ok(Self {
            mux: Multiplexer::new()?,
            pending: VecDeque::new(),
            chunk_size: cfg.chunk_size,
            poll_timeout: cfg.poll_timeout(),
        })
    }

    /// Queues a URL for dispatch by the next [`run`](Session::run) pass.
    pub fn submit(&mut self, url: impl Into<String>, handler: Handler) {
        self.pending.push_back(Pending {
            url: url.into(),
            handler,
        });
    }

    /// Opens a connection for `url`, sends the request, and registers the
    /// socket for completion.
    ///
    /// Everything that can fail here fails synchronously to the caller: URL
    /// parsing, scheme check, connect, the request write, and registration.
    /// On success the handler fires later, from a [`run`](Session::run)
    /// pass, once the server closes the connection.
    pub fn dispatch(&mut self, url: &str, handler: Handler) -> Result<()> {
        let parsed = Url::parse(url).map_err(|e| ClientError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        if parsed.scheme() != "http" {
            return Err(ClientError::InvalidUrl {
                url: url.to_string(),
                reason: format!("unsupported scheme `{}`", parsed.scheme()),
            });
        }

        let host = parsed.host_str().ok_or_else(|| ClientError::InvalidUrl {
            url: url.to_string(),
            reason: "missing host".to_string(),
        })?;
        let port = parsed.port().unwrap_or(80);
        let addr = format!("{}:{}", host, port);

        info!(url = %url, addr = %addr, "dispatching request");

        let mut stream = TcpStream::connect(&addr).map_err(|e| ClientError::Connect {
            addr: addr.clone(),
            source: e,
        })?;

        // Write the whole request while the socket is still blocking, then
        // flip it non-blocking for the read side. A short write can only
        // become a hard error, never a silently truncated request.
        stream.write_all(&request::build_get(host, parsed.path()))?;
        stream.set_nonblocking(true)?;

        let stream = mio::net::TcpStream::from_std(stream);
        let token = self.mux.register(stream, InFlight::new(url, handler))?;
        debug!(url = %url, token = token.0, "connection registered");

        Ok(())
    }

    /// Runs the session until every pending and in-flight request has been
    /// resolved, then returns.
    ///
    /// Each iteration dispatches at most one queued URL, then processes
    /// whatever readiness the multiplexer reports. While URLs are still
    /// queued the poll is non-blocking; once only in-flight connections
    /// remain the poll waits, up to the configured timeout, instead of
    /// spinning.
    ///
    /// A queued URL that fails to dispatch is logged and dropped without
    /// invoking its handler; the session keeps going.
    pub fn run(&mut self) -> Result<()> {
        while !self.pending.is_empty() || !self.mux.is_empty() {
            if let Some(next) = self.pending.pop_front() {
                if let Err(e) = self.dispatch(&next.url, next.handler) {
                    error!(url = %next.url, error = %e, "dispatch failed; request dropped");
                }
            }

            let timeout = if self.pending.is_empty() && !self.mux.is_empty() {
                self.poll_timeout
            } else {
                Duration::ZERO
            };

            for token in self.mux.poll(Some(timeout))? {
                self.process_ready(token);
            }
        }

        Ok(())
    }

    fn process_ready(&mut self, token: Token) {
        let outcome = match self.mux.connection_mut(token) {
            Some((stream, conn)) => conn.read_ready(stream, self.chunk_size),
            // Token already deregistered earlier in this pass.
            None => return,
        };

        match outcome {
            ReadOutcome::Pending => {}
            ReadOutcome::Complete => {
                if let Some((stream, conn)) = self.mux.deregister(token) {
                    drop(stream);
                    info!(url = %conn.url(), bytes = conn.buffered(), "response complete");
                    conn.complete();
                }
            }
            ReadOutcome::Failed(e) => {
                if let Some((stream, conn)) = self.mux.deregister(token) {
                    drop(stream);
                    warn!(url = %conn.url(), error = %e, "read failed; response dropped");
                }
            }
        }
    }

    /// Number of URLs still waiting to be dispatched.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Number of connections currently registered and awaiting a response.
    pub fn in_flight_count(&self) -> usize {
        self.mux.len()
    }

    /// Releases the poll context. Idempotent; undelivered handlers are
    /// dropped without being invoked.
    pub fn close(&mut self) {
        self.mux.close();
    }
}
