use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::ToolError;

pub const MAX_SANITIZED_LEN: usize = 1000;
pub const MAX_INPUT_LEN: usize = 10_000;
pub const MAX_ERROR_LEN: usize = 500;

const MALICIOUS_PATTERNS: [&str; 3] = ["<script", "javascript:", "onerror="];

static DISALLOWED_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s\-_.@,:/]").unwrap());

static REDACTIONS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
  [
    (r"(?i)api[_-]?key[=:]?\s?[\w-]+", "API_KEY_REDACTED"),
    (r"(?i)token[=:]?\s?[\w-]+", "TOKEN_REDACTED"),
    (r"(?i)password[=:]?\s?[\w-]+", "PASSWORD_REDACTED"),
    (r"(?i)secret[=:]?\s?[\w-]+", "SECRET_REDACTED"),
    (r"/[\w/]+/", "/PATH_REDACTED/"),
    (r"[A-Z]:\\[\w\\]+\\", r"PATH_REDACTED\"),
  ]
  .into_iter()
  .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), replacement))
  .collect()
});

fn truncate_chars(input: &str, limit: usize) -> String {
  input.chars().take(limit).collect()
}

/// Strips characters outside the allow-list (word characters, whitespace, `-_.@,:/`) and
/// truncates the result.
#[must_use]
pub fn sanitize_input(value: &str) -> String {
  let sanitized = DISALLOWED_CHARS_RE.replace_all(value, "");
  truncate_chars(&sanitized, MAX_SANITIZED_LEN)
}

/// Renders a parameter value for a URL, query string or header.
///
/// Strings go through [`sanitize_input`]; every other JSON value is rendered verbatim.
#[must_use]
pub fn sanitize_param<T: Serialize + ?Sized>(value: &T) -> String {
  match serde_json::to_value(value) {
    Ok(serde_json::Value::String(s)) => sanitize_input(&s),
    Ok(serde_json::Value::Null) | Err(_) => String::new(),
    Ok(other) => other.to_string(),
  }
}

/// Rejects oversized or script-bearing string inputs before any request is built.
///
/// `params` is the JSON object of a tool's arguments; non-string values are not inspected.
pub fn validate_inputs(params: &serde_json::Value) -> Result<(), ToolError> {
  let Some(map) = params.as_object() else {
    return Ok(());
  };

  for (name, value) in map {
    let Some(text) = value.as_str() else {
      continue;
    };

    if text.chars().count() > MAX_INPUT_LEN {
      return Err(ToolError::InputTooLong { name: name.clone() });
    }

    let lowered = text.to_lowercase();
    if MALICIOUS_PATTERNS.iter().any(|pattern| lowered.contains(pattern)) {
      return Err(ToolError::MaliciousInput { name: name.clone() });
    }
  }

  Ok(())
}

/// Redacts credential-shaped substrings and file-system paths, then truncates.
#[must_use]
pub fn sanitize_error_message(error: &str) -> String {
  let mut sanitized = error.to_string();
  for (pattern, replacement) in REDACTIONS.iter() {
    sanitized = pattern.replace_all(&sanitized, *replacement).into_owned();
  }
  truncate_chars(&sanitized, MAX_ERROR_LEN)
}
