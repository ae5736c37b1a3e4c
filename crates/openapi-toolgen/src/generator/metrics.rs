use strum::Display;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationStats {
  pub tools_generated: usize,
  pub parameters_generated: usize,
  pub operations_skipped: usize,
  pub warnings: Vec<GenerationWarning>,
}

impl GenerationStats {
  pub fn record_tool(&mut self, parameters: usize) {
    self.tools_generated += 1;
    self.parameters_generated += parameters;
  }

  pub fn record_skipped_operation(&mut self, method: &str, path: &str) {
    self.operations_skipped += 1;
    self.warnings.push(GenerationWarning::MissingOperationId {
      method: method.to_ascii_uppercase(),
      path: path.to_string(),
    });
  }

  pub fn record_warnings(&mut self, warnings: impl IntoIterator<Item = GenerationWarning>) {
    self.warnings.extend(warnings);
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GenerationWarning {
  #[strum(to_string = "{method} {path}: no operationId")]
  MissingOperationId { method: String, path: String },
  #[strum(to_string = "[{operation_id}] parameter '{name}': {reason}")]
  ParameterSkipped {
    operation_id: String,
    name: String,
    reason: String,
  },
  #[strum(to_string = "[{operation_id}] formData parameter '{name}' is not exposed")]
  FormDataSkipped { operation_id: String, name: String },
  #[strum(to_string = "[{operation_id}] request body not flattened: {reason}")]
  UnsupportedRequestBody { operation_id: String, reason: String },
  #[strum(to_string = "[{operation_id}] could not resolve schema: {error}")]
  UnresolvedReference { operation_id: String, error: String },
  #[strum(to_string = "[{operation_id}] recursive schema '{reference}' kept as an opaque object")]
  RecursiveSchema { operation_id: String, reference: String },
  #[strum(to_string = "[{operation_id}] identifier '{from}' already used, renamed to '{to}'")]
  IdentifierRenamed {
    operation_id: String,
    from: String,
    to: String,
  },
  #[strum(to_string = "[{operation_id}] tool name '{from}' already used, renamed to '{to}'")]
  ToolRenamed {
    operation_id: String,
    from: String,
    to: String,
  },
}

impl GenerationWarning {
  pub fn is_skipped_item(&self) -> bool {
    matches!(
      self,
      Self::MissingOperationId { .. } | Self::ParameterSkipped { .. } | Self::UnsupportedRequestBody { .. }
    )
  }
}
