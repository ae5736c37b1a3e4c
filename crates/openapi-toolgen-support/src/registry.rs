use std::{fmt, future::Future, pin::Pin};

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::ToolError;

/// A single text block returned by a tool call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
  #[serde(rename = "type")]
  pub kind: String,
  pub text: String,
}

impl TextContent {
  #[must_use]
  pub fn text(text: impl Into<String>) -> Self {
    Self {
      kind: "text".to_string(),
      text: text.into(),
    }
  }
}

pub type ToolOutput = Result<Vec<TextContent>, ToolError>;

pub type ToolFuture = Pin<Box<dyn Future<Output = ToolOutput> + Send>>;

/// Entry point that decodes JSON arguments and runs the typed tool function.
pub type ToolHandler = fn(serde_json::Value) -> ToolFuture;

#[derive(Clone)]
pub struct ToolDescriptor {
  pub name: &'static str,
  pub description: &'static str,
  pub input_schema: serde_json::Value,
  pub handler: ToolHandler,
}

impl fmt::Debug for ToolDescriptor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ToolDescriptor")
      .field("name", &self.name)
      .field("description", &self.description)
      .field("input_schema", &self.input_schema)
      .finish_non_exhaustive()
  }
}

/// Host-side sink that generated modules register their tools into.
pub trait ToolRegistry {
  fn register_tool(&mut self, tool: ToolDescriptor);
}

/// Descriptor of one generated module: its service name and registration entry point.
#[derive(Clone, Copy)]
pub struct ToolModule {
  pub name: &'static str,
  pub register: fn(&mut dyn ToolRegistry),
}

impl fmt::Debug for ToolModule {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ToolModule").field("name", &self.name).finish_non_exhaustive()
  }
}

/// In-memory registry keeping tools in registration order.
///
/// Registering a name twice replaces the earlier descriptor in place.
#[derive(Debug, Default)]
pub struct ToolCatalog {
  tools: Vec<ToolDescriptor>,
}

impl ToolCatalog {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Invokes each module's registration entry point in the given order.
  pub fn register_modules(&mut self, modules: &[ToolModule]) {
    for module in modules {
      (module.register)(self);
    }
  }

  #[must_use]
  pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
    self.tools.iter().find(|tool| tool.name == name)
  }

  pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
    self.tools.iter().map(|tool| tool.name)
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.tools.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.tools.is_empty()
  }

  pub async fn call(&self, name: &str, arguments: serde_json::Value) -> ToolOutput {
    let tool = self.get(name).ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
    (tool.handler)(arguments).await
  }
}

impl ToolRegistry for ToolCatalog {
  fn register_tool(&mut self, tool: ToolDescriptor) {
    if let Some(existing) = self.tools.iter_mut().find(|t| t.name == tool.name) {
      *existing = tool;
    } else {
      self.tools.push(tool);
    }
  }
}

/// Decodes tool arguments, reporting the JSON path of the first offending field.
///
/// A `null` argument payload is treated as an empty object.
pub fn parse_arguments<T: DeserializeOwned>(arguments: serde_json::Value) -> Result<T, ToolError> {
  let arguments = if arguments.is_null() {
    serde_json::Value::Object(serde_json::Map::new())
  } else {
    arguments
  };

  serde_path_to_error::deserialize(arguments).map_err(|err| ToolError::InvalidArguments {
    path: err.path().to_string(),
    message: err.into_inner().to_string(),
  })
}
