use serde_json::Value;

/// Errors raised while following a `$ref` inside a single specification document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RefError {
  #[error("only local references are supported, got '{reference}'")]
  UnsupportedReferenceKind { reference: String },
  #[error("reference '{reference}' not found: missing segment '{segment}'")]
  ReferenceNotFound { reference: String, segment: String },
}

/// Resolves a same-document reference such as `#/definitions/Filter` or
/// `#/components/schemas/Incident` against the parsed document root.
///
/// Segments follow JSON Pointer escaping (`~1` is `/`, `~0` is `~`). Array
/// segments are accepted as indices.
pub fn resolve_ref<'a>(reference: &str, document: &'a Value) -> Result<&'a Value, RefError> {
  let Some(pointer) = reference.strip_prefix("#/") else {
    return Err(RefError::UnsupportedReferenceKind {
      reference: reference.to_string(),
    });
  };

  pointer.split('/').try_fold(document, |current, raw_segment| {
    let segment = raw_segment.replace("~1", "/").replace("~0", "~");
    let next = match current {
      Value::Object(map) => map.get(&segment),
      Value::Array(items) => segment.parse::<usize>().ok().and_then(|index| items.get(index)),
      _ => None,
    };
    next.ok_or_else(|| RefError::ReferenceNotFound {
      reference: reference.to_string(),
      segment,
    })
  })
}

/// Returns the `$ref` string of a schema or parameter object, if it has one.
pub fn ref_path(value: &Value) -> Option<&str> {
  value.get("$ref").and_then(Value::as_str)
}
