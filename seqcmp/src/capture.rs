//! Capture files: one recorded sequence of HTTP exchanges per TOML file.
//!
//! ```toml
//! name = "checkout, first run"
//! scheme = "https"
//!
//! [[exchange]]
//! request = """
//! GET /cart HTTP/1.1
//! Host: shop.test
//!
//! """
//! response = """
//! HTTP/1.1 200 OK
//! Content-Type: text/plain
//!
//! 3 items"""
//! ```
//!
//! `name` and `scheme` are optional (`scheme` defaults to `http`); an exchange
//! without `response` was never answered.

use std::path::{Path, PathBuf};

use seqcmp_core::ExchangeRecord;
use serde::Deserialize;

/// Errors raised while loading a capture file.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("failed to read capture {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid capture {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CaptureFile {
    name: Option<String>,
    #[serde(default = "default_scheme")]
    scheme: String,
    #[serde(default, rename = "exchange")]
    exchanges: Vec<RawExchange>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawExchange {
    request: String,
    response: Option<String>,
}

fn default_scheme() -> String {
    "http".to_owned()
}

/// A parsed capture, ready for `SyncController::add_sequence`.
#[derive(Debug)]
pub struct Capture {
    pub name: Option<String>,
    pub exchanges: Vec<ExchangeRecord>,
}

/// Reads and analyses every exchange in the capture at `path`.
pub fn load_capture(path: &Path) -> Result<Capture, CaptureError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|source| CaptureError::Read { path: path.to_owned(), source })?;
    let file: CaptureFile = toml::from_str(&raw)
        .map_err(|source| CaptureError::Parse { path: path.to_owned(), source })?;

    let exchanges: Vec<ExchangeRecord> = file
        .exchanges
        .into_iter()
        .enumerate()
        .map(|(pos, ex)| {
            ExchangeRecord::from_raw(
                pos,
                &file.scheme,
                ex.request.into_bytes(),
                ex.response.map(String::into_bytes),
            )
        })
        .collect();

    tracing::debug!(path = %path.display(), exchanges = exchanges.len(), "capture loaded");
    Ok(Capture { name: file.name, exchanges })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_capture(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("run.toml");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn loads_exchanges_in_order() {
        let (_dir, path) = write_capture(
            r#"
name = "first run"
scheme = "https"

[[exchange]]
request = "GET /login HTTP/1.1\r\nHost: shop.test\r\n\r\n"
response = "HTTP/1.1 302 Found\r\nLocation: /home\r\n\r\n"

[[exchange]]
request = "GET /home HTTP/1.1\r\nHost: shop.test\r\n\r\n"
"#,
        );
        let capture = load_capture(&path).unwrap();
        assert_eq!(capture.name.as_deref(), Some("first run"));
        assert_eq!(capture.exchanges.len(), 2);

        let login = &capture.exchanges[0];
        assert_eq!(login.url, "https://shop.test/login");
        assert_eq!(login.status_code, Some(302));

        let home = &capture.exchanges[1];
        assert_eq!(home.sequence_position, 1);
        assert_eq!(home.response_bytes, None);
    }

    #[test]
    fn defaults_apply_to_bare_capture() {
        let (_dir, path) = write_capture(
            "[[exchange]]\nrequest = \"\"\"\nPOST /api HTTP/1.1\nHost: a.test\n\nx=1\"\"\"\n",
        );
        let capture = load_capture(&path).unwrap();
        assert_eq!(capture.name, None);
        assert_eq!(capture.exchanges[0].method, "POST");
        assert_eq!(capture.exchanges[0].url, "http://a.test/api");
    }

    #[test]
    fn empty_capture_is_an_empty_sequence() {
        let (_dir, path) = write_capture("name = \"nothing yet\"\n");
        assert!(load_capture(&path).unwrap().exchanges.is_empty());
    }

    #[test]
    fn errors_carry_the_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("missing.toml");
        let err = load_capture(&missing).unwrap_err();
        assert!(matches!(err, CaptureError::Read { .. }));
        assert!(err.to_string().contains("missing.toml"));

        let (_dir, path) = write_capture("[[exchange]]\nresponse = \"HTTP/1.1 200 OK\"\n");
        assert!(matches!(load_capture(&path), Err(CaptureError::Parse { .. })));
    }
}
