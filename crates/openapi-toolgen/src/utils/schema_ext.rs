use serde_json::{Map, Value};

/// Read-only accessors for untyped JSON Schema objects.
pub(crate) trait SchemaExt {
  /// The declared type. For a type list, the first entry that is not `null`.
  fn schema_type(&self) -> Option<&str>;

  /// The declared `properties` map, if any.
  fn properties(&self) -> Option<&Map<String, Value>>;

  /// Returns true if `name` is listed in this schema's own `required` array.
  fn requires(&self, name: &str) -> bool;

  fn description(&self) -> Option<&str>;

  /// Returns true for an `object` schema with at least one declared property.
  ///
  /// Empty and free-form objects are treated as leaves.
  fn is_expandable_object(&self) -> bool;
}

impl SchemaExt for Value {
  fn schema_type(&self) -> Option<&str> {
    match self.get("type")? {
      Value::String(kind) => Some(kind),
      Value::Array(kinds) => kinds.iter().filter_map(Value::as_str).find(|kind| *kind != "null"),
      _ => None,
    }
  }

  fn properties(&self) -> Option<&Map<String, Value>> {
    self.get("properties").and_then(Value::as_object)
  }

  fn requires(&self, name: &str) -> bool {
    self
      .get("required")
      .and_then(Value::as_array)
      .is_some_and(|required| required.iter().any(|entry| entry.as_str() == Some(name)))
  }

  fn description(&self) -> Option<&str> {
    self.get("description").and_then(Value::as_str)
  }

  fn is_expandable_object(&self) -> bool {
    self.schema_type() == Some("object") && self.properties().is_some_and(|props| !props.is_empty())
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_schema_type() {
    assert_eq!(json!({ "type": "string" }).schema_type(), Some("string"));
    assert_eq!(json!({ "type": ["null", "integer"] }).schema_type(), Some("integer"));
    assert_eq!(json!({ "type": ["null"] }).schema_type(), None);
    assert_eq!(json!({ "description": "untyped" }).schema_type(), None);
  }

  #[test]
  fn test_requires_reads_own_list_only() {
    let schema = json!({
      "required": ["incident_id"],
      "properties": { "update_data": { "required": ["status"] } }
    });
    assert!(schema.requires("incident_id"));
    assert!(!schema.requires("status"));
    assert!(!json!({}).requires("incident_id"));
  }

  #[test]
  fn test_is_expandable_object() {
    assert!(json!({ "type": "object", "properties": { "a": {} } }).is_expandable_object());
    assert!(json!({ "type": ["object", "null"], "properties": { "a": {} } }).is_expandable_object());
    assert!(!json!({ "type": "object", "properties": {} }).is_expandable_object());
    assert!(!json!({ "type": "object" }).is_expandable_object());
    assert!(!json!({ "properties": { "a": {} } }).is_expandable_object());
    assert!(!json!({ "type": "array", "items": { "type": "object" } }).is_expandable_object());
  }
}
