//! HTTP request line parsing
//!
//! Only the request line is decoded; the header fields that follow are never
//! looked at, so stray bytes in them cannot fail a request. A request whose
//! query does not fit is still served, just without its query, which leaves
//! the outputs untouched.

use heapless::String;

/// Longest path that can name one of the panel routes.
pub const MAX_PATH_LEN: usize = 32;
/// Longest accepted query string.
pub const MAX_QUERY_LEN: usize = 63;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    /// Any other token; routed nowhere.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    path: String<MAX_PATH_LEN>,
    query: Option<String<MAX_QUERY_LEN>>,
}

impl Request {
    /// Parse the request line at the start of `head`.
    ///
    /// Returns `None` only when there is no method or no target at all.
    pub fn parse(head: &[u8]) -> Option<Self> {
        let line_end = head
            .windows(2)
            .position(|w| w == b"\r\n")
            .unwrap_or(head.len());
        let mut parts = head[..line_end]
            .split(|&b| b == b' ')
            .filter(|part| !part.is_empty());

        let method = match parts.next()? {
            b"GET" => Method::Get,
            _ => Method::Other,
        };
        let target = parts.next()?;
        let (path, query) = match target.iter().position(|&b| b == b'?') {
            Some(pos) => (&target[..pos], Some(&target[pos + 1..])),
            None => (target, None),
        };

        Some(Self {
            method,
            path: fit(path).unwrap_or_default(),
            query: query.and_then(fit),
        })
    }

    /// Request path without the query. Empty when the path was too long to
    /// be a route.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Raw query string, if present, valid UTF-8 and short enough.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }
}

fn fit<const N: usize>(bytes: &[u8]) -> Option<String<N>> {
    let text = core::str::from_utf8(bytes).ok()?;
    let mut out = String::new();
    out.push_str(text).ok()?;
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(head: &[u8]) -> Request {
        Request::parse(head).unwrap()
    }

    #[test]
    fn splits_path_and_query() {
        let request = parse(b"GET /set?led=2&state=1 HTTP/1.1\r\nHost: 192.168.4.1\r\n\r\n");
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.path(), "/set");
        assert_eq!(request.query(), Some("led=2&state=1"));
    }

    #[test]
    fn target_without_query() {
        let request = parse(b"GET /state HTTP/1.1\r\n\r\n");
        assert_eq!(request.path(), "/state");
        assert_eq!(request.query(), None);

        let request = parse(b"GET / HTTP/1.1\r\n\r\n");
        assert_eq!(request.path(), "/");
    }

    #[test]
    fn empty_query_is_present_but_empty() {
        let request = parse(b"GET /set? HTTP/1.1\r\n\r\n");
        assert_eq!(request.path(), "/set");
        assert_eq!(request.query(), Some(""));
    }

    #[test]
    fn query_does_not_change_the_route() {
        let request = parse(b"GET /state?x=1 HTTP/1.1\r\n\r\n");
        assert_eq!(request.path(), "/state");
        assert_eq!(request.query(), Some("x=1"));
    }

    #[test]
    fn over_long_query_is_dropped() {
        let mut head = b"GET /set?led=2&state=1&pad=".to_vec();
        head.extend(core::iter::repeat_n(b'a', 130));
        head.extend_from_slice(b" HTTP/1.1\r\n\r\n");

        let request = parse(&head);
        assert_eq!(request.path(), "/set");
        assert_eq!(request.query(), None);
    }

    #[test]
    fn query_at_the_limit_is_kept() {
        let query = "a".repeat(MAX_QUERY_LEN);
        let head = format!("GET /all?{query} HTTP/1.1\r\n\r\n");
        assert_eq!(parse(head.as_bytes()).query(), Some(query.as_str()));
    }

    #[test]
    fn over_long_path_matches_no_route() {
        let head = format!("GET /{} HTTP/1.1\r\n\r\n", "x".repeat(MAX_PATH_LEN));
        assert_eq!(parse(head.as_bytes()).path(), "");
    }

    #[test]
    fn header_bytes_are_not_decoded() {
        let request = parse(b"GET /state HTTP/1.1\r\nX-Junk: \xff\xfe\xc3\r\n\r\n");
        assert_eq!(request.path(), "/state");
    }

    #[test]
    fn request_line_cut_mid_character() {
        // Heading buffer filled up inside a multi-byte character
        let request = parse(b"GET /set?led=1&state=1&n=\xc3");
        assert_eq!(request.path(), "/set");
        assert_eq!(request.query(), None);
    }

    #[test]
    fn non_utf8_query_is_dropped() {
        let request = parse(b"GET /all?state=1\xff HTTP/1.1\r\n\r\n");
        assert_eq!(request.path(), "/all");
        assert_eq!(request.query(), None);
    }

    #[test]
    fn other_methods_are_kept_apart() {
        assert_eq!(parse(b"POST /set HTTP/1.1\r\n\r\n").method, Method::Other);
        assert_eq!(parse(b"HEAD / HTTP/1.1\r\n\r\n").method, Method::Other);
    }

    #[test]
    fn missing_target_is_rejected() {
        assert_eq!(Request::parse(b"GET\r\n\r\n"), None);
        assert_eq!(Request::parse(b"\r\n\r\n"), None);
        assert_eq!(Request::parse(b""), None);
    }
}
