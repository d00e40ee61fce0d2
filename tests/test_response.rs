//! Tests for the response value

use bytes::Bytes;
use courier::http::Response;

#[test]
fn test_response_accessors() {
    let response = Response::new(
        "http://localhost:8080/hello",
        Bytes::from_static(b"HTTP/1.1 200 OK\r\n\r\nhello"),
    );

    assert_eq!(response.url(), "http://localhost:8080/hello");
    assert_eq!(response.body(), b"HTTP/1.1 200 OK\r\n\r\nhello");
    assert_eq!(response.len(), 24);
    assert!(!response.is_empty());
}

#[test]
fn test_response_empty_body() {
    let response = Response::new("http://localhost/", Bytes::new());
    assert!(response.is_empty());
    assert_eq!(response.len(), 0);
    assert_eq!(response.body(), b"");
}

#[test]
fn test_response_body_lossy_utf8() {
    let response = Response::new("http://localhost/", Bytes::from_static(b"hello"));
    assert_eq!(response.body_lossy(), "hello");
}

#[test]
fn test_response_body_lossy_replaces_invalid_utf8() {
    let response = Response::new("http://localhost/", Bytes::from_static(b"\xff\xfehi"));
    assert!(response.body_lossy().contains("hi"));
}

#[test]
fn test_response_clone_preserves_contents() {
    let response = Response::new("http://localhost/a", Bytes::from_static(b"payload"));
    let copy = response.clone();
    assert_eq!(copy.url(), response.url());
    assert_eq!(copy.body(), response.body());
}
