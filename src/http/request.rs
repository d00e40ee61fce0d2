/// Serializes a GET request for `path` against `host`.
///
/// The wire format is fixed: request line, a single `Host` header, and the
/// empty line ending the head. An empty path is sent as `/`.
///
/// # Example
///
/// ```
/// # use courier::http::request::build_get;
/// let bytes = build_get("example.com", "/index.html");
/// assert_eq!(bytes, b"GET /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n");
/// ```
pub fn build_get(host: &str, path: &str) -> Vec<u8> {
    let path = if path.is_empty() { "/" } else { path };
    format!("GET {} HTTP/1.1\r\nHost: {}\r\n\r\n", path, host).into_bytes()
}
