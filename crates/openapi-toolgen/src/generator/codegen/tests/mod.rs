mod manifest_tests;

use http::Method;

use crate::generator::ast::{
  BodyField, BodyNode, BodyPlan, ParamType, ParameterLocation, ToolDef, ToolParameter,
};

pub(super) fn param(ident: &str, location: ParameterLocation, required: bool, declared_index: usize) -> ToolParameter {
  ToolParameter {
    ident: ident.to_string(),
    original_name: ident.to_string(),
    source_path: ident.to_string(),
    param_type: ParamType::String,
    required,
    description: String::new(),
    location,
    declared_index,
  }
}

pub(super) fn leaf(key: &str, ident: &str, required: bool) -> BodyNode {
  BodyNode::Leaf(BodyField {
    key: key.to_string(),
    ident: ident.to_string(),
    required,
  })
}

pub(super) fn tool(name: &str, method: Method, path: &str) -> ToolDef {
  ToolDef {
    name: name.to_string(),
    operation_id: name.to_string(),
    method,
    path: path.to_string(),
    description: String::new(),
    response_description: "API response data".to_string(),
    service: "xsiam".to_string(),
    base_url: "https://api.example.com".to_string(),
    parameters: vec![],
    body: BodyPlan::default(),
  }
}

/// `POST /incidents/update` with the wrapped body
/// `{request_data: {incident_id, update_data: {status, severity}, optional_field}}`.
pub(super) fn update_incident() -> ToolDef {
  let mut tool = tool("xsiam_update_incident", Method::POST, "/incidents/update");
  tool.description = "Update an incident.\n\nChanges status or severity.".to_string();
  tool.response_description = "Updated incident".to_string();

  let mut incident_id = param("incident_id", ParameterLocation::Body, true, 0);
  incident_id.description = "Incident to update".to_string();
  tool.parameters = vec![
    incident_id,
    param("status", ParameterLocation::Body, false, 1),
    param("severity", ParameterLocation::Body, false, 2),
    param("optional_field", ParameterLocation::Body, false, 3),
  ];
  tool.body = BodyPlan {
    legacy_fields: vec![],
    wrapper: Some("request_data".to_string()),
    nodes: vec![
      leaf("incident_id", "incident_id", true),
      BodyNode::Object {
        key: "update_data".to_string(),
        container: "update_data".to_string(),
        children: vec![leaf("status", "status", false), leaf("severity", "severity", false)],
      },
      leaf("optional_field", "optional_field", false),
    ],
  };
  tool
}
