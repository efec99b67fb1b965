//! HTTP metadata probe and ranged download
//!
//! The probe is a HEAD request issued before downloading to learn the
//! resource's freshness token (ETag) and effective URL. Transport
//! failures during the probe are non-fatal; the cache degrades to its
//! offline fallback.

use crate::error::{QescopeError, QescopeResult};
use std::io::{Read, Write};
use std::time::Duration;
use tracing::debug;
use ureq::Agent;

const PROBE_TIMEOUT: Duration = Duration::from_secs(10);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const CHUNK_SIZE: usize = 32 * 1024;

/// Freshness metadata learned from a HEAD request
#[derive(Debug, Clone)]
pub struct Probe {
    /// Opaque freshness token; empty when the server sent none
    pub etag: Option<String>,
    /// Effective download URL when the resource redirects
    pub redirect: Option<String>,
}

fn user_agent() -> String {
    format!("qescope/{}", env!("CARGO_PKG_VERSION"))
}

/// Issue a metadata-only HEAD request for `url`.
///
/// Returns `Ok(None)` when the host is unreachable or the request times
/// out, so the caller can fall back to whatever is already cached.
/// Redirects are not followed; a 3xx `Location` is reported back so the
/// download can be pinned to the exact resource the probe saw. The
/// custom `X-Linked-ETag` header takes precedence over `ETag`.
pub fn probe(url: &str) -> QescopeResult<Option<Probe>> {
    let agent: Agent = Agent::config_builder()
        .max_redirects(0)
        .max_redirects_will_error(false)
        .http_status_as_error(false)
        .timeout_global(Some(PROBE_TIMEOUT))
        .user_agent(user_agent())
        .build()
        .into();

    let response = match agent.head(url).call() {
        Ok(response) => response,
        Err(e) => {
            debug!("metadata probe for {} failed: {}", url, e);
            return Ok(None);
        }
    };

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        return Err(QescopeError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let header = |name: &str| {
        response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let etag = header("x-linked-etag").or_else(|| header("etag"));
    let redirect = if status.is_redirection() {
        header("location")
    } else {
        None
    };

    Ok(Some(Probe { etag, redirect }))
}

/// Stream `url` into `dest`, starting at byte offset `resume_from`.
///
/// When resuming, only bytes beyond the offset are requested via a
/// `Range` header. Redirects are followed here; the effective URL was
/// already pinned by the probe. Returns the number of bytes written by
/// this call. `progress` receives the cumulative byte count including
/// the resumed prefix.
pub fn download<W: Write>(
    url: &str,
    dest: &mut W,
    resume_from: u64,
    progress: &mut dyn FnMut(u64),
) -> QescopeResult<u64> {
    let agent: Agent = Agent::config_builder()
        .timeout_connect(Some(CONNECT_TIMEOUT))
        .user_agent(user_agent())
        .build()
        .into();

    let mut request = agent.get(url);
    if resume_from > 0 {
        request = request.header("Range", format!("bytes={}-", resume_from));
    }

    let response = request.call().map_err(|e| match e {
        ureq::Error::StatusCode(status) => QescopeError::HttpStatus {
            url: url.to_string(),
            status,
        },
        other => QescopeError::http(url, other),
    })?;

    let mut reader = response.into_body().into_reader();
    let mut buffer = vec![0u8; CHUNK_SIZE];
    let mut written = 0u64;
    loop {
        let read = reader
            .read(&mut buffer)
            .map_err(|e| QescopeError::io(format!("reading response body from {}", url), e))?;
        if read == 0 {
            break;
        }
        dest.write_all(&buffer[..read])
            .map_err(|e| QescopeError::io("writing download chunk", e))?;
        written += read as u64;
        progress(resume_from + written);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_unreachable_host_degrades() {
        // Reserved TEST-NET-1 address; connection must fail, not error out.
        let result = probe("http://192.0.2.1:9/model.zip").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn download_unreachable_host_errors() {
        let mut sink = Vec::new();
        let result = download("http://192.0.2.1:9/model.zip", &mut sink, 0, &mut |_| {});
        assert!(matches!(result, Err(QescopeError::Http { .. })));
        assert!(sink.is_empty());
    }
}
