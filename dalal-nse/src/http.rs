use std::time::Duration;

use dalal_core::DalalError;
use reqwest::{RequestBuilder, Response};

use crate::error::AdapterError;

/// Desktop browser user agent; NSE and Moneycontrol reject obvious bots.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// Per-call timeout used by the default connectors.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Build a client with a cookie store, gzip and the browser user agent.
///
/// # Errors
/// Returns `Other` if the TLS backend cannot be initialized.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, DalalError> {
    reqwest::Client::builder()
        .cookie_store(true)
        .gzip(true)
        .user_agent(BROWSER_USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| DalalError::Other(format!("failed to build http client: {e}")))
}

/// Send the request and reject non-2xx responses.
pub(crate) async fn send_checked(req: RequestBuilder) -> Result<Response, AdapterError> {
    let resp = req.send().await?;
    let status = resp.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(AdapterError::NotFound(resp.url().path().to_string()));
    }
    if !status.is_success() {
        return Err(AdapterError::Status(status));
    }
    Ok(resp)
}

/// Strip trailing slashes so paths can be appended with `format!`.
pub(crate) fn trim_base(base: impl Into<String>) -> String {
    let mut s = base.into();
    while s.ends_with('/') {
        s.pop();
    }
    s
}
