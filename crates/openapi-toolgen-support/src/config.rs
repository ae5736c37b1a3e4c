use std::{collections::BTreeMap, ffi::OsString, time::Duration};

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_RETRIES: u32 = 3;
const API_URL_SUFFIX: &str = "_API_URL";

/// Runtime settings shared by every generated tool.
///
/// Per-service base URLs come from `<SERVICE>_API_URL` variables; a tool falls back to the
/// base URL declared in its specification when no override exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
  base_urls: BTreeMap<String, String>,
  pub timeout: Duration,
  pub max_retries: u32,
  pub verify_ssl: bool,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      base_urls: BTreeMap::new(),
      timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
      max_retries: DEFAULT_MAX_RETRIES,
      verify_ssl: true,
    }
  }
}

impl ApiConfig {
  /// Builds a configuration from `(name, value)` pairs, usually the process environment.
  pub fn from_vars<I, K, V>(vars: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
  {
    let mut config = Self::default();

    for (key, value) in vars {
      let key = key.as_ref();
      let value = value.into();
      match key {
        "API_TIMEOUT" => {
          if let Ok(secs) = value.trim().parse::<u64>() {
            config.timeout = Duration::from_secs(secs);
          }
        }
        "API_MAX_RETRIES" => {
          if let Ok(retries) = value.trim().parse::<u32>() {
            config.max_retries = retries;
          }
        }
        "VERIFY_SSL" => config.verify_ssl = value.trim().eq_ignore_ascii_case("true"),
        _ => {
          if let Some(service) = key.strip_suffix(API_URL_SUFFIX)
            && !service.is_empty()
          {
            config.base_urls.insert(service.to_ascii_lowercase(), value);
          }
        }
      }
    }

    config
  }

  /// Base URL for `service`, or `default` when the environment does not override it.
  #[must_use]
  pub fn base_url(&self, service: &str, default: &str) -> String {
    self
      .base_urls
      .get(&service.to_ascii_lowercase())
      .cloned()
      .unwrap_or_else(|| default.to_string())
  }

  #[must_use]
  pub fn with_base_url(mut self, service: &str, url: impl Into<String>) -> Self {
    self.base_urls.insert(service.to_ascii_lowercase(), url.into());
    self
  }
}

/// Reads the API configuration from the process environment.
#[must_use]
pub fn get_api_config() -> ApiConfig {
  ApiConfig::from_vars(utf8_vars(std::env::vars_os()))
}

/// Drops variables whose name or value is not valid UTF-8.
fn utf8_vars(vars: impl IntoIterator<Item = (OsString, OsString)>) -> impl Iterator<Item = (String, String)> {
  vars
    .into_iter()
    .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let config = ApiConfig::from_vars(Vec::<(String, String)>::new());
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.max_retries, 3);
    assert!(config.verify_ssl);
    assert_eq!(config.base_url("xsiam", "https://fallback"), "https://fallback");
  }

  #[test]
  fn test_service_base_url_override() {
    let config = ApiConfig::from_vars([("XSIAM_API_URL", "https://api-tenant.example")]);
    assert_eq!(config.base_url("xsiam", "https://fallback"), "https://api-tenant.example");
    assert_eq!(config.base_url("XSIAM", "https://fallback"), "https://api-tenant.example");
    assert_eq!(config.base_url("xsoar", "https://fallback"), "https://fallback");
  }

  #[test]
  fn test_numeric_and_flag_parsing() {
    let config = ApiConfig::from_vars([
      ("API_TIMEOUT", "5"),
      ("API_MAX_RETRIES", "not-a-number"),
      ("VERIFY_SSL", "False"),
    ]);
    assert_eq!(config.timeout, Duration::from_secs(5));
    assert_eq!(config.max_retries, 3);
    assert!(!config.verify_ssl);

    let config = ApiConfig::from_vars([("VERIFY_SSL", "TRUE")]);
    assert!(config.verify_ssl);
  }

  #[test]
  fn test_bare_suffix_is_not_a_service() {
    let config = ApiConfig::from_vars([("_API_URL", "https://nowhere")]);
    assert_eq!(config.base_url("", "https://fallback"), "https://fallback");
  }

  #[cfg(unix)]
  #[test]
  fn test_non_utf8_variables_are_skipped() {
    use std::os::unix::ffi::OsStringExt;

    let vars = [
      (OsString::from_vec(vec![0x58, 0xff]), OsString::from("ignored")),
      (OsString::from("XSIAM_API_URL"), OsString::from_vec(vec![0x68, 0xfe])),
      (OsString::from("API_TIMEOUT"), OsString::from("7")),
    ];

    let config = ApiConfig::from_vars(utf8_vars(vars));
    assert_eq!(config.timeout, Duration::from_secs(7));
    assert_eq!(config.base_url("xsiam", "https://fallback"), "https://fallback");
  }
}
