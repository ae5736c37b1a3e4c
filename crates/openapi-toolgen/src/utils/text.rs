use std::sync::LazyLock;

use regex::Regex;

pub(crate) const MISSING_DESCRIPTION: &str = "No description provided";

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Collapses a description onto one line: newlines and whitespace runs become single spaces.
#[must_use]
pub(crate) fn clean_description(input: &str) -> String {
  WHITESPACE_RE.replace_all(input, " ").trim().to_string()
}

/// Cleans a description, falling back to [`MISSING_DESCRIPTION`] when nothing is left.
#[must_use]
pub(crate) fn describe(input: Option<&str>) -> String {
  let cleaned = clean_description(input.unwrap_or_default());
  if cleaned.is_empty() {
    MISSING_DESCRIPTION.to_string()
  } else {
    cleaned
  }
}

/// Splits a description into doc comment lines, keeping paragraph breaks.
#[must_use]
pub(crate) fn doc_lines(input: &str) -> Vec<String> {
  let normalized = input.replace("\r\n", "\n").replace("\\n", "\n");
  let lines: Vec<String> = normalized.lines().map(|line| line.trim_end().to_string()).collect();

  let start = lines.iter().position(|line| !line.trim().is_empty()).unwrap_or(lines.len());
  let end = lines.iter().rposition(|line| !line.trim().is_empty()).map_or(start, |i| i + 1);
  lines[start..end].to_vec()
}
