use serde_json::{Map, Value};

use super::{IdentAllocator, SchemaFlattener, WRAPPER_KEY};
use crate::{
  generator::{
    ast::{BodyField, BodyNode, BodyPlan, ParamType, ParameterLocation, ToolParameter},
    metrics::GenerationWarning,
  },
  naming::field_identifier,
  utils::{
    SchemaExt, ref_path,
    spec::{OperationRef, SpecDocument},
    text::clean_description,
  },
};

/// A parameter before its identifier has been claimed.
#[derive(Debug, Clone)]
pub(crate) struct ParameterCandidate {
  pub ident: String,
  pub original_name: String,
  pub source_path: String,
  pub param_type: ParamType,
  pub required: bool,
  pub description: String,
  pub location: ParameterLocation,
}

/// Collects the parameters of one operation and keeps their identifiers unique.
#[derive(Debug)]
pub(crate) struct ParameterSink {
  operation_id: String,
  parameters: Vec<ToolParameter>,
  idents: IdentAllocator,
  warnings: Vec<GenerationWarning>,
}

impl ParameterSink {
  pub(crate) fn new(operation_id: &str) -> Self {
    Self {
      operation_id: operation_id.to_string(),
      parameters: vec![],
      idents: IdentAllocator::new(),
      warnings: vec![],
    }
  }

  pub(crate) fn operation_id(&self) -> &str {
    &self.operation_id
  }

  /// Adds a parameter and returns the identifier it was given.
  pub(crate) fn push(&mut self, candidate: ParameterCandidate) -> String {
    let ident = self.idents.claim(&candidate.ident);
    if ident != candidate.ident {
      self.warn(GenerationWarning::IdentifierRenamed {
        operation_id: self.operation_id.clone(),
        from: candidate.ident.clone(),
        to: ident.clone(),
      });
    }

    self.parameters.push(ToolParameter {
      ident: ident.clone(),
      original_name: candidate.original_name,
      source_path: candidate.source_path,
      param_type: candidate.param_type,
      required: candidate.required,
      description: candidate.description,
      location: candidate.location,
      declared_index: self.parameters.len(),
    });
    ident
  }

  pub(crate) fn warn(&mut self, warning: GenerationWarning) {
    self.warnings.push(warning);
  }

  /// Returns the parameters with every required one ahead of every optional one,
  /// each group keeping declaration order.
  pub(crate) fn finish(self) -> (Vec<ToolParameter>, Vec<GenerationWarning>) {
    let (required, optional): (Vec<_>, Vec<_>) = self.parameters.into_iter().partition(|param| param.required);
    (required.into_iter().chain(optional).collect(), self.warnings)
  }
}

/// Output of [`ParameterBuilder::build`].
#[derive(Debug)]
pub(crate) struct BuiltParameters {
  pub parameters: Vec<ToolParameter>,
  pub body: BodyPlan,
  pub warnings: Vec<GenerationWarning>,
}

/// Merges location parameters, legacy body parameters and the request body into
/// one ordered parameter list.
pub(crate) struct ParameterBuilder<'a> {
  document: &'a SpecDocument,
  sink: ParameterSink,
  body: BodyPlan,
}

impl<'a> ParameterBuilder<'a> {
  pub(crate) fn new(document: &'a SpecDocument, operation_id: &str) -> Self {
    Self {
      document,
      sink: ParameterSink::new(operation_id),
      body: BodyPlan::default(),
    }
  }

  pub(crate) fn build(mut self, operation: &OperationRef<'a>) -> BuiltParameters {
    for param in self.declared_parameters(operation) {
      self.add_declared(param);
    }

    if let Some(request_body) = operation.operation.get("requestBody") {
      self.add_request_body(request_body);
    }

    let (parameters, warnings) = self.sink.finish();
    BuiltParameters {
      parameters,
      body: self.body,
      warnings,
    }
  }

  /// Path-item parameters followed by operation parameters, with `$ref`s resolved.
  /// An operation parameter replaces a path-item one with the same name and location.
  fn declared_parameters(&mut self, operation: &OperationRef<'a>) -> Vec<&'a Value> {
    let sources = [operation.path_item.get("parameters"), operation.operation.get("parameters")];

    let mut merged: Vec<&'a Value> = vec![];
    for raw in sources.into_iter().flatten().filter_map(Value::as_array).flatten() {
      let Some(param) = self.resolve_or_warn(raw) else {
        continue;
      };

      match merged.iter_mut().find(|existing| same_parameter(existing, param)) {
        Some(existing) => *existing = param,
        None => merged.push(param),
      }
    }
    merged
  }

  fn add_declared(&mut self, param: &'a Value) {
    let Some(name) = param.get("name").and_then(Value::as_str) else {
      self.skip("<unnamed>", "missing name");
      return;
    };

    let declared = param.get("in").and_then(Value::as_str);
    if declared == Some("formData") {
      let operation_id = self.sink.operation_id().to_string();
      self.sink.warn(GenerationWarning::FormDataSkipped {
        operation_id,
        name: name.to_string(),
      });
      return;
    }

    match ParameterLocation::from_declared(declared) {
      Some(ParameterLocation::Body) => self.add_legacy_body(param, name),
      Some(location) => self.add_location_parameter(param, name, location),
      None => self.skip(
        name,
        &format!("unsupported location '{}'", declared.unwrap_or_default()),
      ),
    }
  }

  fn add_location_parameter(&mut self, param: &Value, name: &str, location: ParameterLocation) {
    let type_source = param.get("schema").unwrap_or(param);

    self.sink.push(ParameterCandidate {
      ident: field_identifier(name, name),
      original_name: name.to_string(),
      source_path: name.to_string(),
      param_type: ParamType::from_schema(type_source),
      required: param.get("required").and_then(Value::as_bool).unwrap_or(false),
      description: clean_description(param.description().unwrap_or_default()),
      location,
    });
  }

  /// Expands an OpenAPI 2.0 `in: body` parameter one level deep.
  ///
  /// Only the direct properties of the referenced schema become parameters; nested
  /// objects stay opaque and the wrapper convention does not apply.
  fn add_legacy_body(&mut self, param: &'a Value, name: &str) {
    let Some(schema) = param.get("schema") else {
      self.skip(name, "body parameter without schema");
      return;
    };
    let Some(schema) = self.resolve_or_warn(schema) else {
      return;
    };
    let Some(properties) = schema.properties() else {
      return;
    };

    for (prop_name, property) in properties {
      let field = self.direct_field(schema, prop_name, property);
      self.body.legacy_fields.push(field);
    }
  }

  /// Adds one direct property of a body schema as a parameter.
  ///
  /// A `$ref` property is resolved only to infer its type and description; an
  /// object stays a single opaque parameter.
  fn direct_field(&mut self, parent: &Value, prop_name: &str, property: &Value) -> BodyField {
    let resolved = match ref_path(property) {
      Some(reference) => self.document.resolve(reference).ok(),
      None => Some(property),
    };
    let param_type = resolved.map_or(ParamType::Object, ParamType::from_schema);
    let description = property.description().or_else(|| resolved.and_then(SchemaExt::description));
    let required = parent.requires(prop_name);

    let ident = self.sink.push(ParameterCandidate {
      ident: field_identifier(prop_name, prop_name),
      original_name: prop_name.to_string(),
      source_path: prop_name.to_string(),
      param_type,
      required,
      description: clean_description(description.unwrap_or_default()),
      location: ParameterLocation::Body,
    });

    BodyField {
      key: prop_name.to_string(),
      ident,
      required,
    }
  }

  fn add_request_body(&mut self, request_body: &'a Value) {
    let Some(request_body) = self.resolve_or_warn(request_body) else {
      return;
    };
    let Some(schema) = request_body.pointer("/content/application~1json/schema") else {
      if request_body.get("content").is_some() {
        self.unsupported_body("no application/json content");
      }
      return;
    };

    let references: Vec<&'a str> = ref_path(schema).into_iter().collect();
    let Some(schema) = self.resolve_or_warn(schema) else {
      return;
    };
    if !schema.properties().is_some_and(|props| !props.is_empty()) {
      self.unsupported_body("schema declares no properties");
      return;
    }

    if let Some((wrapped, wrapper_ref)) = self.wrapped_schema(schema) {
      let mut flattener =
        SchemaFlattener::new(self.document).with_references(references.into_iter().chain(wrapper_ref));
      self.body.wrapper = Some(WRAPPER_KEY.to_string());
      self.body.nodes = flattener.flatten(wrapped, &mut self.sink);
      return;
    }

    // Without the wrapper only the top level is expanded; nested objects stay opaque.
    let Some(properties) = schema.properties() else {
      return;
    };
    for (prop_name, property) in properties {
      let field = self.direct_field(schema, prop_name, property);
      self.body.nodes.push(BodyNode::Leaf(field));
    }
  }

  /// The wrapper's own schema (and the reference it came through) when `schema` has
  /// exactly one property, the wrapper key, typed as an object with declared properties.
  ///
  /// A wrapper without properties is left to the direct expansion as an opaque leaf.
  fn wrapped_schema(&self, schema: &'a Value) -> Option<(&'a Value, Option<&'a str>)> {
    let properties: &Map<String, Value> = schema.properties()?;
    if properties.len() != 1 {
      return None;
    }

    let wrapper = properties.get(WRAPPER_KEY)?;
    let reference = ref_path(wrapper);
    let wrapper = match reference {
      Some(reference) => self.document.resolve(reference).ok()?,
      None => wrapper,
    };
    wrapper.is_expandable_object().then_some((wrapper, reference))
  }

  fn resolve_or_warn(&mut self, value: &'a Value) -> Option<&'a Value> {
    let Some(reference) = ref_path(value) else {
      return Some(value);
    };

    match self.document.resolve(reference) {
      Ok(resolved) => Some(resolved),
      Err(error) => {
        let operation_id = self.sink.operation_id().to_string();
        self.sink.warn(GenerationWarning::UnresolvedReference {
          operation_id,
          error: error.to_string(),
        });
        None
      }
    }
  }

  fn skip(&mut self, name: &str, reason: &str) {
    let operation_id = self.sink.operation_id().to_string();
    self.sink.warn(GenerationWarning::ParameterSkipped {
      operation_id,
      name: name.to_string(),
      reason: reason.to_string(),
    });
  }

  fn unsupported_body(&mut self, reason: &str) {
    let operation_id = self.sink.operation_id().to_string();
    self.sink.warn(GenerationWarning::UnsupportedRequestBody {
      operation_id,
      reason: reason.to_string(),
    });
  }
}

fn same_parameter(a: &Value, b: &Value) -> bool {
  a.get("name") == b.get("name") && a.get("in") == b.get("in")
}
