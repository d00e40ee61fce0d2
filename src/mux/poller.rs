use std::collections::HashMap;
use std::io;
use std::time::Duration;

use mio::net::TcpStream;
use mio::{Events, Interest, Poll, Token};

use crate::error::{ClientError, Result};

const EVENT_CAPACITY: usize = 128;

struct Entry<T> {
    stream: TcpStream,
    attachment: T,
}

/// One poll context plus the table of sockets registered with it.
///
/// `T` is whatever per-connection metadata the caller wants handed back with
/// the socket. Each socket is owned by its table entry from registration
/// until [`deregister`](Multiplexer::deregister) returns it; a token never
/// refers to more than one connection.
pub struct Multiplexer<T> {
    poll: Option<Poll>,
    events: Events,
    entries: HashMap<Token, Entry<T>>,
    next_token: usize,
}

impl<T> Multiplexer<T> {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            poll: Some(Poll::new()?),
            events: Events::with_capacity(EVENT_CAPACITY),
            entries: HashMap::new(),
            next_token: 0,
        })
    }

    /// Registers a socket for read readiness and stores `attachment` under a
    /// fresh token.
    ///
    /// Fails with [`ClientError::ContextClosed`] after [`close`](Self::close),
    /// and with [`ClientError::AlreadyRegistered`] if the OS reports the
    /// socket as already present in the poll context.
    pub fn register(&mut self, mut stream: TcpStream, attachment: T) -> Result<Token> {
        let poll = self.poll.as_ref().ok_or(ClientError::ContextClosed)?;

        let token = Token(self.next_token);
        poll.registry()
            .register(&mut stream, token, Interest::READABLE)
            .map_err(|e| {
                if e.kind() == io::ErrorKind::AlreadyExists {
                    ClientError::AlreadyRegistered
                } else {
                    ClientError::Io(e)
                }
            })?;

        self.next_token += 1;
        self.entries.insert(token, Entry { stream, attachment });
        Ok(token)
    }

    /// Waits up to `timeout` and returns the tokens with pending readiness.
    ///
    /// `Some(Duration::ZERO)` makes the call non-blocking: it returns
    /// immediately with whatever is ready, and an empty set is a normal
    /// result, not an error. `None` waits indefinitely for the next event.
    pub fn poll(&mut self, timeout: Option<Duration>) -> Result<Vec<Token>> {
        let poll = self.poll.as_mut().ok_or(ClientError::ContextClosed)?;

        loop {
            match poll.poll(&mut self.events, timeout) {
                Ok(()) => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(ClientError::Io(e)),
            }
        }

        Ok(self.events.iter().map(|event| event.token()).collect())
    }

    /// Mutable access to a registered connection, for reading off the socket.
    ///
    /// Returns `None` for tokens that were never issued or have already been
    /// deregistered; stale tokens from an earlier poll pass land here.
    pub fn connection_mut(&mut self, token: Token) -> Option<(&mut TcpStream, &mut T)> {
        self.entries
            .get_mut(&token)
            .map(|entry| (&mut entry.stream, &mut entry.attachment))
    }

    /// Removes a connection from future poll results and hands it back.
    ///
    /// The socket is not closed here; the caller owns it from this point.
    pub fn deregister(&mut self, token: Token) -> Option<(TcpStream, T)> {
        let mut entry = self.entries.remove(&token)?;

        if let Some(poll) = &self.poll {
            if let Err(e) = poll.registry().deregister(&mut entry.stream) {
                tracing::warn!(error = %e, "failed to deregister socket from poll context");
            }
        }

        Some((entry.stream, entry.attachment))
    }

    /// Releases the poll context and every remaining registration.
    ///
    /// Idempotent. Subsequent [`register`](Self::register) and
    /// [`poll`](Self::poll) calls fail with [`ClientError::ContextClosed`].
    pub fn close(&mut self) {
        if self.poll.take().is_some() {
            self.entries.clear();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.poll.is_none()
    }

    /// Number of connections currently registered.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
