/// Failures a generated tool reports to its caller instead of issuing a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolError {
  #[error("Input parameter '{name}' exceeds maximum length")]
  InputTooLong { name: String },

  #[error("Input parameter '{name}' contains potentially malicious content")]
  MaliciousInput { name: String },

  #[error("Invalid arguments at '{path}': {message}")]
  InvalidArguments { path: String, message: String },

  #[error("Unknown tool '{0}'")]
  UnknownTool(String),
}

impl ToolError {
  #[must_use]
  pub fn is_validation(&self) -> bool {
    matches!(
      self,
      Self::InputTooLong { .. } | Self::MaliciousInput { .. } | Self::InvalidArguments { .. }
    )
  }
}
