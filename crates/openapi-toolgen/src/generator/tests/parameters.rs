use serde_json::{Value, json};

use super::support::{convert, idents, single_tool};
use crate::generator::{
  ast::{BodyField, ParamType, ParameterLocation},
  metrics::GenerationWarning,
};

fn swagger(paths: Value, definitions: Value) -> Value {
  json!({
    "swagger": "2.0",
    "info": { "title": "Cortex XSOAR", "version": "6.10" },
    "host": "api.example.com",
    "basePath": "/xsoar",
    "paths": paths,
    "definitions": definitions
  })
}

#[test]
fn test_location_parameters_are_typed_and_ordered() {
  let tool = single_tool(json!({
    "openapi": "3.0.0",
    "paths": {
      "/incidents/{incident_id}": {
        "get": {
          "operationId": "getIncident",
          "parameters": [
            { "name": "limit", "in": "query", "schema": { "type": "integer" } },
            { "name": "incident_id", "in": "path", "required": true, "schema": { "type": "string" } },
            { "name": "traceId", "in": "header", "description": "Trace\nid" },
            { "name": "verbose", "in": "query", "required": true, "type": "boolean" }
          ]
        }
      }
    }
  }));

  assert_eq!(tool.name, "xsiam_incident");
  assert_eq!(idents(&tool), ["incident_id", "verbose", "limit", "trace_id"]);

  let header = tool.parameter("trace_id").unwrap();
  assert_eq!(header.original_name, "traceId");
  assert_eq!(header.location, ParameterLocation::Header);
  assert_eq!(header.description, "Trace id");
  assert_eq!(header.param_type, ParamType::String);
  assert_eq!(tool.parameter("limit").unwrap().param_type, ParamType::Integer);
  assert_eq!(tool.parameter("verbose").unwrap().param_type, ParamType::Boolean);

  let declared: Vec<&str> = tool
    .location_parameters()
    .iter()
    .map(|param| param.ident.as_str())
    .collect();
  assert_eq!(declared, ["limit", "incident_id", "trace_id", "verbose"]);
}

#[test]
fn test_path_level_parameters_are_merged() {
  let tool = single_tool(json!({
    "openapi": "3.0.0",
    "components": {
      "parameters": {
        "Tenant": { "name": "tenant", "in": "header", "required": true }
      }
    },
    "paths": {
      "/widgets/{id}": {
        "parameters": [
          { "name": "id", "in": "path", "required": true, "description": "path level" },
          { "$ref": "#/components/parameters/Tenant" }
        ],
        "delete": {
          "operationId": "deleteWidget",
          "parameters": [
            { "name": "id", "in": "path", "required": true, "description": "operation level" },
            { "name": "force", "in": "query" }
          ]
        }
      }
    }
  }));

  assert_eq!(idents(&tool), ["id", "tenant", "force"]);
  assert_eq!(tool.parameter("id").unwrap().description, "operation level");
  assert_eq!(tool.parameter("tenant").unwrap().location, ParameterLocation::Header);
}

#[test]
fn test_unsupported_parameters_are_skipped_with_warnings() {
  let (tools, stats) = convert(json!({
    "openapi": "3.0.0",
    "paths": {
      "/upload": {
        "post": {
          "operationId": "uploadFile",
          "parameters": [
            { "name": "file", "in": "formData", "type": "file" },
            { "name": "session", "in": "cookie" },
            { "$ref": "#/components/parameters/Missing" },
            { "name": "folder", "in": "query" }
          ]
        }
      }
    }
  }));

  assert_eq!(idents(&tools[0]), ["folder"]);

  let messages: Vec<String> = stats.warnings.iter().map(ToString::to_string).collect();
  assert_eq!(
    messages,
    [
      "[uploadFile] could not resolve schema: reference '#/components/parameters/Missing' not found: missing segment 'components'",
      "[uploadFile] formData parameter 'file' is not exposed",
      "[uploadFile] parameter 'session': unsupported location 'cookie'",
    ]
  );
  assert!(stats.warnings[2].is_skipped_item());
}

#[test]
fn test_legacy_body_expands_direct_children_only() {
  let tool = single_tool(swagger(
    json!({
      "/widgets": {
        "put": {
          "operationId": "createWidget",
          "parameters": [
            { "name": "body", "in": "body", "schema": { "$ref": "#/definitions/Widget" } },
            { "name": "dry_run", "in": "query", "type": "boolean" }
          ]
        }
      }
    }),
    json!({
      "Widget": {
        "type": "object",
        "required": ["name"],
        "properties": {
          "name": { "type": "string", "description": "Widget name" },
          "size": {
            "type": "object",
            "properties": { "width": { "type": "integer" } }
          },
          "for": { "type": "string" },
          "owner": { "$ref": "#/definitions/Owner" }
        }
      },
      "Owner": { "type": "object", "description": "Owning team", "properties": { "team": { "type": "string" } } }
    }),
  ));

  assert_eq!(tool.name, "xsiam_create_widget");
  assert_eq!(idents(&tool), ["name", "size", "for_value", "owner", "dry_run"]);
  assert_eq!(tool.parameter("size").unwrap().param_type, ParamType::Object);
  assert_eq!(tool.parameter("owner").unwrap().description, "Owning team");
  assert_eq!(tool.body.wrapper, None);
  assert!(tool.body.nodes.is_empty());
  assert_eq!(
    tool.body.legacy_fields[2],
    BodyField {
      key: "for".to_string(),
      ident: "for_value".to_string(),
      required: false,
    }
  );
  assert_eq!(tool.base_url, "https://api.example.com/xsoar");
}

#[test]
fn test_legacy_body_ignores_wrapper_convention() {
  let tool = single_tool(swagger(
    json!({
      "/incidents": {
        "post": {
          "operationId": "postIncident",
          "parameters": [{ "name": "body", "in": "body", "schema": { "$ref": "#/definitions/Wrapped" } }]
        }
      }
    }),
    json!({
      "Wrapped": {
        "type": "object",
        "properties": {
          "request_data": { "type": "object", "properties": { "x": { "type": "string" } } }
        }
      }
    }),
  ));

  assert_eq!(tool.name, "xsiam_incident");
  assert_eq!(idents(&tool), ["request_data"]);
}

#[test]
fn test_unresolvable_legacy_body_is_skipped() {
  let (tools, stats) = convert(swagger(
    json!({
      "/widgets": {
        "post": {
          "operationId": "createWidget",
          "parameters": [
            { "name": "body", "in": "body", "schema": { "$ref": "#/definitions/Missing" } },
            { "name": "dry_run", "in": "query", "type": "boolean" }
          ]
        }
      }
    }),
    json!({}),
  ));

  assert_eq!(idents(&tools[0]), ["dry_run"]);
  assert!(tools[0].body.is_empty());
  assert!(matches!(
    stats.warnings.as_slice(),
    [GenerationWarning::UnresolvedReference { operation_id, .. }] if operation_id == "createWidget"
  ));
}

#[test]
fn test_duplicate_identifiers_get_suffixes() {
  let (tools, stats) = convert(json!({
    "openapi": "3.0.0",
    "paths": {
      "/incidents": {
        "patch": {
          "operationId": "patchIncidents",
          "parameters": [{ "name": "status", "in": "query" }],
          "requestBody": {
            "content": {
              "application/json": {
                "schema": {
                  "type": "object",
                  "properties": { "status": { "type": "string" }, "Status": { "type": "string" } }
                }
              }
            }
          }
        }
      }
    }
  }));

  assert_eq!(idents(&tools[0]), ["status", "status_2", "status_3"]);
  let body_keys: Vec<&str> = tools[0].body.fields().iter().map(|field| field.key.as_str()).collect();
  assert_eq!(body_keys, ["status", "Status"]);
  assert_eq!(
    stats
      .warnings
      .iter()
      .filter(|warning| matches!(warning, GenerationWarning::IdentifierRenamed { .. }))
      .count(),
    2
  );
}

#[test]
fn test_request_body_reference_and_media_types() {
  let (tools, stats) = convert(json!({
    "openapi": "3.0.0",
    "components": {
      "requestBodies": {
        "Note": {
          "content": {
            "application/json": {
              "schema": { "type": "object", "properties": { "text": { "type": "string" } } }
            }
          }
        }
      }
    },
    "paths": {
      "/notes": {
        "post": { "operationId": "createNote", "requestBody": { "$ref": "#/components/requestBodies/Note" } },
        "put": {
          "operationId": "replaceNote",
          "requestBody": { "content": { "text/plain": { "schema": { "type": "string" } } } }
        }
      }
    }
  }));

  assert_eq!(idents(&tools[0]), ["text"]);
  assert!(idents(&tools[1]).is_empty());
  assert!(matches!(
    stats.warnings.as_slice(),
    [GenerationWarning::UnsupportedRequestBody { operation_id, .. }] if operation_id == "replaceNote"
  ));
}

#[test]
fn test_descriptions_fall_back() {
  let tool = single_tool(json!({
    "openapi": "3.0.0",
    "paths": {
      "/alerts": {
        "post": {
          "operationId": "createAlert",
          "summary": "Create an alert",
          "responses": {
            "400": { "description": "Bad request" },
            "201": { "description": "Alert created" }
          }
        }
      }
    }
  }));

  assert_eq!(tool.description, "Create an alert");
  assert_eq!(tool.response_description, "Alert created");
  assert_eq!(tool.base_url, "");

  let tool = single_tool(json!({
    "paths": { "/alerts": { "get": { "operationId": "listAlerts" } } }
  }));
  assert_eq!(tool.description, "");
  assert_eq!(tool.response_description, "API response data");
}
