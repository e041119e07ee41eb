//! Normalized request/response exchanges.
//!
//! An [`ExchangeRecord`] is the only view of captured traffic the core ever sees.
//! Records are built once by the host (usually through [`ExchangeRecord::from_raw`])
//! and are read-only after they are handed to a [`crate::sequence::SequenceStore`].

/// One captured request paired with its optional response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeRecord {
    /// Position of the exchange in the batch it was imported with.
    pub sequence_position: usize,
    pub method: String,
    pub host: String,
    /// Full URL; this is the alignment key.
    pub url: String,
    /// `None` when no response was captured or its status line is unreadable.
    pub status_code: Option<u16>,
    pub request_bytes: Vec<u8>,
    pub response_bytes: Option<Vec<u8>>,
    /// Byte index where the response body starts, 0 without a response.
    pub body_offset: usize,
}

impl ExchangeRecord {
    /// Builds a record by analysing raw HTTP/1.x messages.
    ///
    /// The method and request target come from the request line and the host from
    /// the `Host` header. Origin-form targets are joined with `scheme` and the host
    /// into an absolute URL; absolute-form targets are kept verbatim. Malformed
    /// requests degrade to empty fields instead of failing.
    pub fn from_raw(
        sequence_position: usize,
        scheme: &str,
        request_bytes: Vec<u8>,
        response_bytes: Option<Vec<u8>>,
    ) -> Self {
        let head = RequestHead::parse(&request_bytes);
        let url = head.url(scheme);
        let status_code = response_bytes.as_deref().and_then(parse_status_code);
        let body_offset = response_bytes.as_deref().map(find_body_offset).unwrap_or(0);

        if head.method.is_empty() {
            tracing::warn!(position = sequence_position, "request line could not be parsed");
        }

        Self {
            sequence_position,
            method: head.method,
            host: head.host,
            url,
            status_code,
            request_bytes,
            response_bytes,
            body_offset,
        }
    }

    /// Response body bytes, empty when there is no response.
    pub fn body(&self) -> &[u8] {
        match &self.response_bytes {
            Some(resp) => &resp[self.body_offset.min(resp.len())..],
            None => &[],
        }
    }

    /// Request length plus response length in bytes.
    pub fn total_len(&self) -> usize {
        self.request_bytes.len() + self.response_bytes.as_ref().map_or(0, Vec::len)
    }

    /// Status code for display: the numeric code or `N/A`.
    pub fn status_label(&self) -> String {
        status_label(self.status_code)
    }
}

/// Formats an optional status code the way every table column shows it.
pub fn status_label(code: Option<u16>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "N/A".to_owned(),
    }
}

struct RequestHead {
    method: String,
    target: String,
    host: String,
}

impl RequestHead {
    fn parse(request: &[u8]) -> Self {
        let head_end = header_terminator(request).map_or(request.len(), |(pos, _)| pos);
        let head = String::from_utf8_lossy(&request[..head_end]);
        let mut lines = head.split('\n').map(|l| l.trim_end_matches('\r'));

        let mut request_line = lines.next().unwrap_or_default().split_whitespace();
        let method = request_line.next().unwrap_or_default().to_owned();
        let target = request_line.next().unwrap_or_default().to_owned();

        let host = lines
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("host"))
            .map(|(_, value)| value.trim().to_owned())
            .unwrap_or_default();

        Self { method, target, host }
    }

    fn url(&self, scheme: &str) -> String {
        if self.target.starts_with("http://") || self.target.starts_with("https://") {
            return self.target.clone();
        }
        if self.host.is_empty() {
            return self.target.clone();
        }
        format!("{scheme}://{}{}", self.host, self.target)
    }
}

/// Position and length of the first blank line separating headers from body.
fn header_terminator(bytes: &[u8]) -> Option<(usize, usize)> {
    let crlf = find(bytes, b"\r\n\r\n").map(|pos| (pos, 4));
    let lf = find(bytes, b"\n\n").map(|pos| (pos, 2));
    match (crlf, lf) {
        (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
        (a, b) => a.or(b),
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn find_body_offset(response: &[u8]) -> usize {
    header_terminator(response).map_or(response.len(), |(pos, len)| pos + len)
}

fn parse_status_code(response: &[u8]) -> Option<u16> {
    let line_end = find(response, b"\n").unwrap_or(response.len());
    let status_line = String::from_utf8_lossy(&response[..line_end]);
    let mut parts = status_line.split_whitespace();
    let version = parts.next()?;
    if !version.starts_with("HTTP/") {
        return None;
    }
    parts.next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_origin_form_request() {
        let req = b"GET /api/items?id=3 HTTP/1.1\r\nHost: shop.test\r\nAccept: */*\r\n\r\n".to_vec();
        let resp = b"HTTP/1.1 404 Not Found\r\nContent-Length: 3\r\n\r\nnope".to_vec();
        let rec = ExchangeRecord::from_raw(2, "https", req, Some(resp));

        assert_eq!(rec.sequence_position, 2);
        assert_eq!(rec.method, "GET");
        assert_eq!(rec.host, "shop.test");
        assert_eq!(rec.url, "https://shop.test/api/items?id=3");
        assert_eq!(rec.status_code, Some(404));
        assert_eq!(rec.body(), b"nope");
    }

    #[test]
    fn keeps_absolute_form_target() {
        let req = b"POST http://proxy.test/login HTTP/1.1\nhost: other\n\nuser=a".to_vec();
        let rec = ExchangeRecord::from_raw(0, "https", req, None);
        assert_eq!(rec.method, "POST");
        assert_eq!(rec.host, "other");
        assert_eq!(rec.url, "http://proxy.test/login");
    }

    #[test]
    fn missing_response_is_empty_body() {
        let rec = ExchangeRecord::from_raw(0, "http", b"GET / HTTP/1.1\r\nHost: a\r\n\r\n".to_vec(), None);
        assert_eq!(rec.status_code, None);
        assert_eq!(rec.status_label(), "N/A");
        assert_eq!(rec.body_offset, 0);
        assert!(rec.body().is_empty());
        assert_eq!(rec.total_len(), rec.request_bytes.len());
    }

    #[test]
    fn response_without_blank_line_has_empty_body() {
        let resp = b"HTTP/1.0 204 No Content".to_vec();
        let rec = ExchangeRecord::from_raw(0, "http", b"GET / HTTP/1.0\n\n".to_vec(), Some(resp));
        assert_eq!(rec.status_code, Some(204));
        assert_eq!(rec.body_offset, 23);
        assert!(rec.body().is_empty());
    }

    #[test]
    fn garbage_degrades_to_empty_fields() {
        let rec = ExchangeRecord::from_raw(0, "http", Vec::new(), Some(b"\xff\xfe".to_vec()));
        assert!(rec.method.is_empty());
        assert!(rec.url.is_empty());
        assert_eq!(rec.status_code, None);
        assert_eq!(rec.body(), b"");
    }
}
