//! Archive download
//!
//! The response body is streamed into a temporary file next to the
//! destination and only renamed into place once it is complete and, when a
//! digest is pinned, verified. A failed download never leaves a file at the
//! destination path.

use crate::error::{BootstrapError, Result};
use crate::output;
use crate::progress::{self, ProgressGuard};
use std::io::{Read, Write};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

use super::{prepare, verify};

/// Environment variable holding an optional transfer timeout in seconds
pub const TIMEOUT_ENV: &str = "LUM_HTTP_TIMEOUT";

/// Parse a timeout in seconds, clamped to 5s-1h. Unset or unparsable means none.
fn parse_timeout(value: Option<&str>) -> Option<Duration> {
    value
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(|secs| Duration::from_secs(secs.clamp(5, 3600)))
}

/// Read the transfer timeout once. Unset means wait indefinitely.
fn http_timeout() -> Option<Duration> {
    static TIMEOUT: OnceLock<Option<Duration>> = OnceLock::new();
    *TIMEOUT.get_or_init(|| parse_timeout(std::env::var(TIMEOUT_ENV).ok().as_deref()))
}

fn agent() -> ureq::Agent {
    let mut builder = ureq::AgentBuilder::new().user_agent("lum-bootstrap");
    if let Some(timeout) = http_timeout() {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// Download `url` to `dest`, replacing any existing file.
///
/// When `expected_sha256` is given the body must match it or the download
/// is discarded. Returns the number of bytes written.
///
/// # Example
/// ```ignore
/// let bytes = fetch(&dep.url, &dep.archive_path(&layout), dep.sha256.as_deref())?;
/// ```
pub fn fetch(url: &str, dest: &Path, expected_sha256: Option<&str>) -> Result<u64> {
    prepare::ensure_parent_dir(dest)?;

    // A stale archive from an aborted run must not survive a failed fetch.
    if dest.exists() {
        std::fs::remove_file(dest).map_err(|e| BootstrapError::io(dest, e))?;
    }

    let filename = dest
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "archive".to_string());

    let pb = progress::create_spinner(&format!("downloading {}", filename));
    let _guard = ProgressGuard::new(&pb);

    let response = agent().get(url).call().map_err(|e| BootstrapError::Http {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    if let Some(len) = response
        .header("content-length")
        .and_then(|s| s.parse().ok())
    {
        progress::upgrade_to_bytes(&pb, len);
    }

    let dir = dest.parent().unwrap_or(Path::new("."));
    let mut part = tempfile::Builder::new()
        .prefix(".download-")
        .suffix(".part")
        .tempfile_in(dir)
        .map_err(|e| BootstrapError::io(dir, e))?;

    let mut reader = response.into_reader();
    let mut buffer = [0u8; 8192];
    let mut total_bytes = 0u64;

    loop {
        let n = reader.read(&mut buffer).map_err(|e| BootstrapError::Http {
            url: url.to_string(),
            message: format!("read error: {}", e),
        })?;
        if n == 0 {
            break;
        }

        part.write_all(&buffer[..n])
            .map_err(|e| BootstrapError::io(part.path(), e))?;

        total_bytes += n as u64;
        pb.set_position(total_bytes);
    }

    part.as_file()
        .sync_all()
        .map_err(|e| BootstrapError::io(part.path(), e))?;

    if let Some(expected) = expected_sha256 {
        let actual = verify::sha256_file(part.path())?;
        verify::check_digest(dest, expected, &actual)?;
        output::detail(&format!("sha256 verified for {}", filename));
    }

    part.persist(dest)
        .map_err(|e| BootstrapError::io(dest, e.error))?;

    Ok(total_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // SHA256 of "hello world"
    const HELLO_SHA256: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

    fn leftover_parts(dir: &Path) -> usize {
        std::fs::read_dir(dir)
            .unwrap()
            .flatten()
            .filter(|e| e.file_name().to_string_lossy().ends_with(".part"))
            .count()
    }

    #[tokio::test]
    async fn test_fetch_writes_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v0.1.0/fmod.zip"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"hello world".to_vec()))
            .mount(&mock_server)
            .await;

        let temp = tempfile::tempdir().unwrap();
        let dest = temp.path().join("external/fmod/fmod.zip");
        let url = format!("{}/v0.1.0/fmod.zip", mock_server.uri());

        let bytes = fetch(&url, &dest, None).unwrap();
        assert_eq!(bytes, 11);
        assert_eq!(std::fs::read(&dest).unwrap(), b"hello world");
        assert_eq!(leftover_parts(dest.parent().unwrap()), 0);
    }

    #[tokio::test]
    async fn test_fetch_overwrites_existing_file() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/glfw.zip"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"new".to_vec()))
            .mount(&mock_server)
            .await;

        let temp = tempfile::tempdir().unwrap();
        let dest = temp.path().join("glfw.zip");
        std::fs::write(&dest, b"old contents").unwrap();

        fetch(&format!("{}/glfw.zip", mock_server.uri()), &dest, None).unwrap();
        assert_eq!(std::fs::read(&dest).unwrap(), b"new");
    }

    #[tokio::test]
    async fn test_fetch_http_error_leaves_no_archive() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing.zip"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let temp = tempfile::tempdir().unwrap();
        let dest = temp.path().join("missing.zip");
        std::fs::write(&dest, b"stale").unwrap();

        let err = fetch(&format!("{}/missing.zip", mock_server.uri()), &dest, None).unwrap_err();
        assert!(matches!(err, BootstrapError::Http { .. }));
        assert!(err.to_string().contains("download failed"));
        assert!(!dest.exists());
        assert_eq!(leftover_parts(temp.path()), 0);
    }

    #[tokio::test]
    async fn test_fetch_verifies_pinned_digest() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fmod.zip"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"hello world".to_vec()))
            .mount(&mock_server)
            .await;

        let temp = tempfile::tempdir().unwrap();
        let dest = temp.path().join("fmod.zip");
        let url = format!("{}/fmod.zip", mock_server.uri());

        fetch(&url, &dest, Some(&HELLO_SHA256.to_uppercase())).unwrap();
        assert!(dest.exists());
    }

    #[tokio::test]
    async fn test_fetch_digest_mismatch_discards_download() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fmod.zip"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"tampered".to_vec()))
            .mount(&mock_server)
            .await;

        let temp = tempfile::tempdir().unwrap();
        let dest = temp.path().join("fmod.zip");
        let url = format!("{}/fmod.zip", mock_server.uri());

        let err = fetch(&url, &dest, Some(HELLO_SHA256)).unwrap_err();
        assert!(matches!(err, BootstrapError::ChecksumMismatch { .. }));
        assert!(!dest.exists());
        assert_eq!(leftover_parts(temp.path()), 0);
    }

    #[test]
    fn test_fetch_truncated_body_leaves_no_archive() {
        use std::net::TcpListener;

        // Announces 100000 bytes, sends a few and hangs up.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = [0u8; 1024];
            let _ = stream.read(&mut request);
            stream
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100000\r\n\r\nPK\x03\x04partial")
                .unwrap();
        });

        let temp = tempfile::tempdir().unwrap();
        let dest = temp.path().join("fmod.zip");
        std::fs::write(&dest, b"stale").unwrap();

        let err = fetch(&format!("http://{}/fmod.zip", addr), &dest, None).unwrap_err();
        server.join().unwrap();

        assert!(matches!(err, BootstrapError::Http { .. }));
        assert!(!dest.exists());
        assert_eq!(leftover_parts(temp.path()), 0);
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout(None), None);
        assert_eq!(parse_timeout(Some("")), None);
        assert_eq!(parse_timeout(Some("soon")), None);
        assert_eq!(parse_timeout(Some("-30")), None);
        assert_eq!(parse_timeout(Some(" 120 ")), Some(Duration::from_secs(120)));
    }

    #[test]
    fn test_timeout_is_clamped() {
        assert_eq!(parse_timeout(Some("0")), Some(Duration::from_secs(5)));
        assert_eq!(parse_timeout(Some("1")), Some(Duration::from_secs(5)));
        assert_eq!(parse_timeout(Some("86400")), Some(Duration::from_secs(3600)));
    }

    #[test]
    fn test_fetch_unreachable_host() {
        let temp = tempfile::tempdir().unwrap();
        let dest = temp.path().join("fmod.zip");

        // Port 9 (discard) on localhost is closed on any sane test machine.
        let err = fetch("http://127.0.0.1:9/fmod.zip", &dest, None).unwrap_err();
        assert!(matches!(err, BootstrapError::Http { .. }));
        assert!(!dest.exists());
    }
}
