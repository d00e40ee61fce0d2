//! Tests for request dispatch

use std::io::Read;
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;

use courier::client::Session;
use courier::config::Config;
use courier::error::ClientError;

fn new_session() -> Session {
    Session::new(&Config::default()).unwrap()
}

/// Accepts one connection and returns everything up to the end of the
/// request head.
fn capture_request(listener: TcpListener) -> mpsc::Receiver<Vec<u8>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let (mut socket, _) = listener.accept().unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 256];
        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        tx.send(buf).unwrap();
    });
    rx
}

#[test]
fn test_dispatch_writes_well_formed_request() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let rx = capture_request(listener);

    let mut session = new_session();
    let url = format!("http://127.0.0.1:{}/status", port);
    session.dispatch(&url, Box::new(|_| {})).unwrap();

    // Exactly one connection registered, request already on the wire.
    assert_eq!(session.in_flight_count(), 1);

    let received = rx.recv().unwrap();
    assert_eq!(received, b"GET /status HTTP/1.1\r\nHost: 127.0.0.1\r\n\r\n");
}

#[test]
fn test_dispatch_defaults_path_to_root() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let rx = capture_request(listener);

    let mut session = new_session();
    session
        .dispatch(
            &format!("http://127.0.0.1:{}", port),
            Box::new(|_| {}),
        )
        .unwrap();

    let received = rx.recv().unwrap();
    assert!(received.starts_with(b"GET / HTTP/1.1\r\n"));
}

#[test]
fn test_dispatch_rejects_malformed_url() {
    let mut session = new_session();
    let err = session
        .dispatch("not a url at all", Box::new(|_| {}))
        .unwrap_err();

    assert!(matches!(err, ClientError::InvalidUrl { .. }));
    assert_eq!(session.in_flight_count(), 0);
}

#[test]
fn test_dispatch_rejects_https_scheme() {
    let mut session = new_session();
    let err = session
        .dispatch("https://example.com/", Box::new(|_| {}))
        .unwrap_err();

    assert!(matches!(err, ClientError::InvalidUrl { .. }));
    assert_eq!(session.in_flight_count(), 0);
}

#[test]
fn test_dispatch_rejects_other_schemes() {
    let mut session = new_session();
    for url in ["ftp://example.com/", "file:///etc/hosts", "ws://example.com/"] {
        let err = session.dispatch(url, Box::new(|_| {})).unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl { .. }), "{}", url);
    }
    assert_eq!(session.in_flight_count(), 0);
}

#[test]
fn test_dispatch_surfaces_connection_refusal() {
    // Bind a port, then free it so the connect attempt is refused.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let mut session = new_session();
    let err = session
        .dispatch(&format!("http://127.0.0.1:{}/", port), Box::new(|_| {}))
        .unwrap_err();

    assert!(matches!(err, ClientError::Connect { .. }));
    assert_eq!(session.in_flight_count(), 0);
}
