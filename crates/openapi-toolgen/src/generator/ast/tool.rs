use http::Method;
use itertools::Itertools;

use super::{BodyPlan, ToolParameter};

/// A generated tool: everything the renderer needs for one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDef {
  pub name: String,
  pub operation_id: String,
  pub method: Method,
  pub path: String,
  pub description: String,
  pub response_description: String,
  pub service: String,
  pub base_url: String,
  /// Required parameters first, each group in declaration order.
  pub parameters: Vec<ToolParameter>,
  pub body: BodyPlan,
}

impl ToolDef {
  /// Query, path and header parameters in declaration order.
  pub fn location_parameters(&self) -> Vec<&ToolParameter> {
    self
      .parameters
      .iter()
      .filter(|param| !param.is_body())
      .sorted_by_key(|param| param.declared_index)
      .collect()
  }

  pub fn required_names(&self) -> Vec<&str> {
    self
      .parameters
      .iter()
      .filter(|param| param.required)
      .map(|param| param.ident.as_str())
      .collect()
  }

  pub fn parameter(&self, ident: &str) -> Option<&ToolParameter> {
    self.parameters.iter().find(|param| param.ident == ident)
  }
}
