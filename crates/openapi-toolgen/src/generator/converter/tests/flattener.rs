use serde_json::json;

use crate::{
  generator::{
    ast::BodyNode,
    converter::{ParameterSink, SchemaFlattener},
  },
  utils::spec::SpecDocument,
};

fn collisions(document: &SpecDocument, schema: &serde_json::Value) -> Vec<String> {
  let mut names: Vec<String> = SchemaFlattener::new(document).collision_set(schema).into_iter().collect();
  names.sort();
  names
}

#[test]
fn test_collision_set() {
  let document = SpecDocument::new(json!({
    "components": {
      "schemas": {
        "Owner": {
          "type": "object",
          "properties": { "name": { "type": "string" }, "email": { "type": "string" } },
        },
      },
    },
  }));

  let schema = json!({
    "type": "object",
    "properties": {
      "name": { "type": "string" },
      "owner": { "$ref": "#/components/schemas/Owner" },
      "contact": {
        "type": "object",
        "properties": { "email": { "type": "string" }, "phone": { "type": "string" } },
      },
      "metadata": { "type": "object" },
    },
  });

  assert_eq!(collisions(&document, &schema), ["email", "name"]);
}

#[test]
fn test_flatten_names_leaves_by_collision() {
  let document = SpecDocument::new(json!({}));
  let schema = json!({
    "type": "object",
    "required": ["email"],
    "properties": {
      "name": { "type": "string" },
      "owner": {
        "type": "object",
        "properties": { "name": { "type": "string" }, "team": { "type": "string" } },
      },
      "email": { "type": "string" },
    },
  });

  let mut sink = ParameterSink::new("createUser");
  let nodes = SchemaFlattener::new(&document).flatten(&schema, &mut sink);
  let (parameters, warnings) = sink.finish();

  let idents: Vec<&str> = parameters.iter().map(|param| param.ident.as_str()).collect();
  assert_eq!(idents, ["email", "name", "owner_name", "team"]);
  assert!(warnings.is_empty());

  let owner = parameters.iter().find(|param| param.ident == "owner_name").unwrap();
  assert_eq!(owner.original_name, "name");
  assert_eq!(owner.source_path, "owner.name");

  let BodyNode::Object { key, container, children } = &nodes[1] else {
    panic!("expected owner to be an object node");
  };
  assert_eq!(key, "owner");
  assert_eq!(container, "owner");
  assert_eq!(children.len(), 2);
}
