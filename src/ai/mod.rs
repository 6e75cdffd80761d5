pub mod dataforseo;
pub mod gemini;
pub mod perplexity;
pub mod prompts;
pub mod stability;

use std::time::Duration;

use crate::error::Error;

/// Blocking HTTP client with an explicit timeout. Outbound provider calls
/// are the only blocking operations in a request and are never retried.
pub(crate) fn http_client(timeout_secs: u64) -> Result<reqwest::blocking::Client, Error> {
    reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| Error::Provider(format!("HTTP client error: {}", e)))
}
