use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::{ApiConfig, TextContent, get_api_config, sanitize_error_message};

const MAX_IDLE_PER_HOST: usize = 5;

const SECURITY_HEADERS: [(&str, &str); 3] = [
  ("x-content-type-options", "nosniff"),
  ("x-frame-options", "DENY"),
  ("x-xss-protection", "1; mode=block"),
];

fn security_headers() -> HeaderMap {
  SECURITY_HEADERS
    .iter()
    .map(|(name, value)| (HeaderName::from_static(name), HeaderValue::from_static(value)))
    .collect()
}

/// Builds an HTTP client honoring the timeout and TLS settings of `config`.
pub fn http_client(config: &ApiConfig) -> reqwest::Result<reqwest::Client> {
  reqwest::Client::builder()
    .timeout(config.timeout)
    .danger_accept_invalid_certs(!config.verify_ssl)
    .pool_max_idle_per_host(MAX_IDLE_PER_HOST)
    .default_headers(security_headers())
    .build()
}

/// Builds an HTTP client from the environment configuration.
pub fn get_http_client() -> reqwest::Result<reqwest::Client> {
  http_client(&get_api_config())
}

/// Converts a failed request into the diagnostic a tool returns to its caller.
#[must_use]
pub fn transport_failure(err: &reqwest::Error) -> Vec<TextContent> {
  let message = if err.is_status() {
    sanitize_error_message(&err.to_string())
  } else {
    sanitize_error_message(&format!("Request failed: {err}"))
  };
  vec![TextContent::text(message)]
}

/// Renders a successful response body as tool output.
///
/// JSON bodies are re-serialized compactly; anything else, including an empty
/// body, is returned as received.
#[must_use]
pub fn response_content(body: &str) -> Vec<TextContent> {
  let text = match serde_json::from_str::<serde_json::Value>(body) {
    Ok(result) => result.to_string(),
    Err(_) => body.to_string(),
  };
  vec![TextContent::text(text)]
}
