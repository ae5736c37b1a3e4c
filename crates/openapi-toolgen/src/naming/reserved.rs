use std::{collections::HashSet, sync::LazyLock};

static RESERVED_IDENTIFIERS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn", "for", "if", "impl", "in",
    "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "async", "await", "dyn", "try", "abstract", "become", "box", "do",
    "final", "macro", "override", "priv", "typeof", "unsized", "virtual", "yield", "gen", "self", "Self", "_",
  ]
  .into_iter()
  .collect()
});

pub(crate) fn is_reserved(name: &str) -> bool {
  RESERVED_IDENTIFIERS.contains(name)
}

/// Renames identifiers that cannot be used as Rust bindings.
///
/// `context` is the full path of the field the identifier came from. Fields named
/// `from`/`to` whose context mentions "time" become `from_time`/`to_time` whether
/// or not they are reserved. Names that are neither reserved nor range bounds are
/// returned unchanged.
pub(crate) fn sanitize_identifier(name: &str, context: &str) -> String {
  if let Some(renamed) = time_bound_name(name, context) {
    return renamed.to_string();
  }

  if !is_reserved(name) {
    return name.to_string();
  }

  match name {
    "for" => "for_value".to_string(),
    "type" => "type_value".to_string(),
    "in" => "in_value".to_string(),
    "impl" => "impl_value".to_string(),
    "ref" => "ref_value".to_string(),
    "self" => "self_value".to_string(),
    _ => format!("{name}_param"),
  }
}

fn time_bound_name(name: &str, context: &str) -> Option<&'static str> {
  if !context.to_ascii_lowercase().contains("time") {
    return None;
  }
  match name {
    "from" | "from_value" => Some("from_time"),
    "to" | "to_value" => Some("to_time"),
    _ => None,
  }
}
