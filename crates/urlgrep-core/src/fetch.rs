//! Single-page HTTP GET on top of curl's Easy interface.

use std::time::Duration;
use thiserror::Error;

/// Error from fetching one page (curl failure or HTTP error).
/// Kept separate from anyhow so callers can tell transport failures apart
/// from non-2xx responses.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, DNS, connection, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
}

impl FetchError {
    /// True when the fetch was cut short by the client-side timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Curl(e) if e.is_operation_timedout())
    }
}

/// Fetch `url` with a single GET and return the response body as text.
/// The whole transfer (connect + read) must finish within `timeout`.
pub fn fetch_page(url: &str, timeout: Duration) -> Result<String, FetchError> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(timeout)?;
    easy.timeout(timeout)?;

    let mut body: Vec<u8> = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if code < 200 || code >= 300 {
        return Err(FetchError::Http(code));
    }

    Ok(String::from_utf8_lossy(&body).into_owned())
}
