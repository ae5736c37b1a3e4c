use std::path::Path;

use serde_json::{Map, Value};

use crate::{
  generator::{
    ast::{BodyNode, BodyPlan, ToolDef},
    metrics::GenerationStats,
    orchestrator::Orchestrator,
  },
  utils::spec::SpecDocument,
};

pub(super) fn make_orchestrator(spec: Value) -> Orchestrator {
  Orchestrator::new(SpecDocument::new(spec), Path::new("xsiam.json"))
}

pub(super) fn convert(spec: Value) -> (Vec<ToolDef>, GenerationStats) {
  make_orchestrator(spec).tools()
}

pub(super) fn single_tool(spec: Value) -> ToolDef {
  let (mut tools, _) = convert(spec);
  assert_eq!(tools.len(), 1, "expected exactly one tool");
  tools.remove(0)
}

pub(super) fn idents(tool: &ToolDef) -> Vec<&str> {
  tool.parameters.iter().map(|param| param.ident.as_str()).collect()
}

/// Wraps a request body schema into a one-operation OpenAPI 3 document.
pub(super) fn spec_with_body(schema: Value) -> Value {
  serde_json::json!({
    "openapi": "3.0.0",
    "info": { "title": "Cortex XSIAM", "version": "1.0" },
    "servers": [{ "url": "https://api.example.com/public_api/v1" }],
    "paths": {
      "/incidents/update": {
        "post": {
          "operationId": "updateIncident",
          "requestBody": { "content": { "application/json": { "schema": schema } } },
          "responses": { "200": { "description": "Updated incident" } }
        }
      }
    }
  })
}

/// Rebuilds the payload the generated code sends for `values`, keyed by parameter identifier.
pub(super) fn reconstruct(plan: &BodyPlan, values: &Map<String, Value>) -> Map<String, Value> {
  fn fill(nodes: &[BodyNode], values: &Map<String, Value>, target: &mut Map<String, Value>) {
    for node in nodes {
      match node {
        BodyNode::Leaf(field) => {
          if let Some(value) = values.get(&field.ident).filter(|value| !value.is_null()) {
            target.insert(field.key.clone(), value.clone());
          }
        }
        BodyNode::Object { key, children, .. } => {
          let mut object = Map::new();
          fill(children, values, &mut object);
          if !object.is_empty() {
            target.insert(key.clone(), Value::Object(object));
          }
        }
      }
    }
  }

  let mut body = Map::new();
  for field in &plan.legacy_fields {
    if let Some(value) = values.get(&field.ident) {
      body.insert(field.key.clone(), value.clone());
    }
  }

  match &plan.wrapper {
    Some(wrapper) => {
      let mut object = Map::new();
      fill(&plan.nodes, values, &mut object);
      if !object.is_empty() {
        body.insert(wrapper.clone(), Value::Object(object));
      }
    }
    None => fill(&plan.nodes, values, &mut body),
  }
  body
}
