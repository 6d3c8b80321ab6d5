//! Fetching remote parent documents

use std::time::Duration;

use crate::error::{Error, Result};

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// GET a remote document once. Non-2xx responses are errors; nothing is retried.
///
/// Uses the blocking client, so this must not be called from inside an async
/// runtime.
pub fn fetch_document(url: &str) -> Result<String> {
    let fetch_error = |e: reqwest::Error| Error::Fetch {
        url: url.to_string(),
        message: e.to_string(),
    };

    tracing::debug!(url, "fetching remote document");

    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(concat!("ctxbox/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(fetch_error)?;

    client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.text())
        .map_err(fetch_error)
}
