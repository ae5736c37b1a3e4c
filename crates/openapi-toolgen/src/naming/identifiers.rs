use std::sync::LazyLock;

use any_ascii::any_ascii;
use inflections::Inflect;
use regex::Regex;

/// Namespace marker prepended by vendor-generated operation ids (`public_api-v1-alerts-get_alerts`).
pub(crate) const VENDOR_NAMESPACE_MARKER: &str = "public_api-";

static VERSION_SEGMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)^(v\d+)-(.*)$").unwrap());
static WORD_BOUNDARY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(.)([A-Z][a-z]+)").unwrap());
static CAMEL_BOUNDARY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").unwrap());
static INVALID_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());

/// Strips an HTTP verb prefix from an operation id when it matches the operation's own method.
///
/// The prefix is only removed when the character following it starts a new word
/// (uppercase letter, `_` or `-`), so `getter` keeps its `get`. Passing `None`
/// disables stripping entirely.
pub(crate) fn strip_http_verb_prefix<'a>(name: &'a str, http_method: Option<&str>) -> &'a str {
  let Some(method) = http_method.filter(|m| !m.is_empty()) else {
    return name;
  };

  let Some(prefix) = name.get(..method.len()) else {
    return name;
  };
  if !prefix.eq_ignore_ascii_case(method) {
    return name;
  }

  let rest = &name[method.len()..];
  match rest.chars().next() {
    Some(next) if next.is_uppercase() || next == '_' || next == '-' => rest,
    _ => name,
  }
}

/// Rewrites vendor-namespaced names, moving the version segment to the end.
///
/// Leading separators are always dropped, which also absorbs the `_`/`-` left
/// behind by verb stripping.
pub(crate) fn clean_vendor_prefix(name: &str) -> String {
  let name = name.trim_start_matches(['-', '_']);

  let Some(rest) = name.strip_prefix(VENDOR_NAMESPACE_MARKER) else {
    return name.to_string();
  };

  match VERSION_SEGMENT_RE.captures(rest) {
    Some(caps) => format!("{}-{}", &caps[2], &caps[1]),
    None => rest.to_string(),
  }
}

/// Converts an operation id or property name into a `snake_case` identifier.
///
/// The steps run in a fixed order: verb stripping (only when a method is given),
/// vendor prefix cleanup, hyphen replacement, removal of characters that cannot
/// appear in an identifier, camel-case splitting and lowercasing.
pub(crate) fn to_snake_case(name: &str, http_method: Option<&str>) -> String {
  let stripped = strip_http_verb_prefix(name, http_method);
  let cleaned = clean_vendor_prefix(stripped).replace('-', "_");
  let ascii = any_ascii(&cleaned);
  let ascii = INVALID_CHARS_RE.replace_all(&ascii, "");

  let split = WORD_BOUNDARY_RE.replace_all(&ascii, "${1}_${2}");
  let split = CAMEL_BOUNDARY_RE.replace_all(&split, "${1}_${2}");
  split.to_lowercase()
}

/// Makes a normalized name usable as a Rust identifier: a leading digit gets a `_`
/// prefix and an empty name becomes `unnamed`.
pub(crate) fn ensure_identifier(name: &str) -> String {
  if name.is_empty() {
    return "unnamed".to_string();
  }
  if name.starts_with(|c: char| c.is_ascii_digit()) {
    return format!("_{name}");
  }
  name.to_string()
}

/// Converts a tool name into the `PascalCase` name of its argument struct.
pub(crate) fn to_type_name(name: &str) -> String {
  let pascal = name.to_pascal_case();
  let pascal = pascal.trim_start_matches('_');
  if pascal.is_empty() {
    return "Unnamed".to_string();
  }
  if pascal.starts_with(|c: char| c.is_ascii_digit()) {
    return format!("T{pascal}");
  }
  pascal.to_string()
}
