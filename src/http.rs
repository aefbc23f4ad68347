//! Shared HTTP plumbing for the outbound API clients

use reqwest::{Client, Response};
use std::time::Duration;

use crate::errors::{Result, TenderError};

/// Build the reqwest client shared by every external API handle
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(TenderError::HttpError)
}

/// Turn a non-2xx response into a readable message, pass others through
pub(crate) async fn check_status(response: Response) -> std::result::Result<Response, String> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(format!("HTTP {}: {}", status, error_text))
}

/// Join a base URL and an endpoint path without doubling slashes
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
