use std::io::{self, Read};

use bytes::BytesMut;
use mio::net::TcpStream;

use crate::http::Response;

/// Completion callback, invoked once with the finished [`Response`].
///
/// `FnOnce` makes double delivery unrepresentable: completing a connection
/// consumes the handler.
pub type Handler = Box<dyn FnOnce(Response)>;

/// Outcome of draining a ready socket.
pub enum ReadOutcome {
    /// More data may still arrive; keep the registration.
    Pending,
    /// The peer closed its end; the response is complete.
    Complete,
    /// Hard read error; tear the connection down without delivering.
    Failed(io::Error),
}

/// Per-request state attached to a registered socket: the origin URL, the
/// completion handler, and the bytes accumulated so far.
pub struct InFlight {
    url: String,
    handler: Handler,
    buf: BytesMut,
}

impl InFlight {
    pub fn new(url: impl Into<String>, handler: Handler) -> Self {
        Self {
            url: url.into(),
            handler,
            buf: BytesMut::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Bytes accumulated so far.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Drains the socket in `chunk_size` reads until it has nothing more to
    /// give, accumulating everything read.
    ///
    /// A read of zero bytes is end-of-stream: the peer has closed and the
    /// response is complete. A `WouldBlock` is only "no data right now" and
    /// leaves the connection pending for a later poll cycle.
    pub fn read_ready(&mut self, stream: &mut TcpStream, chunk_size: usize) -> ReadOutcome {
        let mut chunk = vec![0u8; chunk_size];

        loop {
            match stream.read(&mut chunk) {
                Ok(0) => return ReadOutcome::Complete,
                Ok(n) => self.buf.extend_from_slice(&chunk[..n]),
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => return ReadOutcome::Pending,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return ReadOutcome::Failed(e),
            }
        }
    }

    /// Builds the final [`Response`] and invokes the handler with it.
    pub fn complete(self) {
        let InFlight { url, handler, buf } = self;
        handler(Response::new(url, buf.freeze()));
    }
}
