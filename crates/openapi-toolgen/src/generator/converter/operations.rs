use serde_json::Value;

use super::{DEFAULT_RESPONSE_DESCRIPTION, ParameterBuilder, SUCCESS_STATUS_CODES};
use crate::{
  generator::{ast::ToolDef, metrics::GenerationWarning},
  utils::spec::{OperationRef, SpecDocument},
};

/// Converts one operation into a [`ToolDef`].
pub(crate) struct OperationConverter<'a> {
  document: &'a SpecDocument,
  service: String,
  base_url: String,
}

impl<'a> OperationConverter<'a> {
  pub(crate) fn new(document: &'a SpecDocument, service: &str) -> Self {
    Self {
      document,
      service: service.to_string(),
      base_url: document.base_url(),
    }
  }

  pub(crate) fn convert(
    &self,
    operation: &OperationRef<'a>,
    operation_id: &str,
    name: String,
  ) -> (ToolDef, Vec<GenerationWarning>) {
    let built = ParameterBuilder::new(self.document, operation_id).build(operation);

    let tool = ToolDef {
      name,
      operation_id: operation_id.to_string(),
      method: operation.method.clone(),
      path: operation.path.to_string(),
      description: Self::description(operation.operation),
      response_description: Self::response_description(operation.operation),
      service: self.service.clone(),
      base_url: self.base_url.clone(),
      parameters: built.parameters,
      body: built.body,
    };
    (tool, built.warnings)
  }

  /// The operation's description, or its summary when it has none.
  fn description(operation: &Value) -> String {
    ["description", "summary"]
      .into_iter()
      .filter_map(|key| operation.get(key).and_then(Value::as_str))
      .find(|text| !text.trim().is_empty())
      .unwrap_or_default()
      .to_string()
  }

  fn response_description(operation: &Value) -> String {
    let Some(responses) = operation.get("responses") else {
      return DEFAULT_RESPONSE_DESCRIPTION.to_string();
    };

    SUCCESS_STATUS_CODES
      .iter()
      .find_map(|code| responses.get(*code))
      .and_then(|response| response.get("description"))
      .and_then(Value::as_str)
      .filter(|text| !text.trim().is_empty())
      .unwrap_or(DEFAULT_RESPONSE_DESCRIPTION)
      .to_string()
  }
}
