use std::collections::{HashMap, HashSet};

use serde_json::Value;

use super::parameters::{ParameterCandidate, ParameterSink};
use crate::{
  generator::{
    ast::{BodyField, BodyNode, ParamType, ParameterLocation},
    metrics::GenerationWarning,
  },
  naming::{ensure_identifier, sanitize_identifier, to_snake_case},
  utils::{RefError, SchemaExt, ref_path, spec::SpecDocument, text::clean_description},
};

/// A property schema after following its `$ref` chain.
enum Property<'a> {
  /// An object with declared properties, expanded in place.
  Object {
    schema: &'a Value,
    references: Vec<&'a str>,
  },
  Leaf {
    schema: &'a Value,
  },
  /// A reference that loops back into the current expansion.
  Recursive { reference: &'a str },
  Unresolved { error: RefError },
}

/// Flattens a nested request body schema into leaf parameters plus a plan for
/// rebuilding the payload.
///
/// Leaves whose normalized name occurs at more than one path of the same body
/// are named after their full path; every other leaf keeps its own name.
pub(crate) struct SchemaFlattener<'a> {
  document: &'a SpecDocument,
  stack: Vec<&'a str>,
  collisions: HashSet<String>,
}

impl<'a> SchemaFlattener<'a> {
  pub(crate) fn new(document: &'a SpecDocument) -> Self {
    Self {
      document,
      stack: vec![],
      collisions: HashSet::new(),
    }
  }

  /// Marks references already being expanded by the caller, such as the body schema's own `$ref`.
  pub(crate) fn with_references(mut self, references: impl IntoIterator<Item = &'a str>) -> Self {
    self.stack.extend(references);
    self
  }

  /// Flattens the properties of `schema`, pushing every leaf into `sink`.
  pub(crate) fn flatten(&mut self, schema: &'a Value, sink: &mut ParameterSink) -> Vec<BodyNode> {
    self.collisions = self.collision_set(schema);
    self.flatten_object(schema, &mut vec![], &mut vec![], sink)
  }

  /// Normalized leaf names that occur under more than one distinct path of `schema`.
  pub(crate) fn collision_set(&mut self, schema: &'a Value) -> HashSet<String> {
    let mut paths: HashMap<String, HashSet<String>> = HashMap::new();
    self.collect_leaf_paths(schema, &mut vec![], &mut paths);

    paths
      .into_iter()
      .filter(|(_, leaf_paths)| leaf_paths.len() > 1)
      .map(|(name, _)| name)
      .collect()
  }

  fn collect_leaf_paths(
    &mut self,
    schema: &'a Value,
    path: &mut Vec<String>,
    out: &mut HashMap<String, HashSet<String>>,
  ) {
    let Some(properties) = schema.properties() else {
      return;
    };

    for (name, property) in properties {
      let simple = to_snake_case(name, None);
      path.push(simple.clone());

      if let Property::Object { schema, references } = self.resolve(property) {
        let depth = self.enter(references);
        self.collect_leaf_paths(schema, path, out);
        self.stack.truncate(depth);
      } else {
        out.entry(simple).or_default().insert(path.join("_"));
      }

      path.pop();
    }
  }

  fn flatten_object(
    &mut self,
    schema: &'a Value,
    path: &mut Vec<String>,
    source: &mut Vec<&'a str>,
    sink: &mut ParameterSink,
  ) -> Vec<BodyNode> {
    let Some(properties) = schema.properties() else {
      return vec![];
    };

    let mut nodes = Vec::with_capacity(properties.len());
    for (name, property) in properties {
      path.push(to_snake_case(name, None));
      source.push(name);

      let node = match self.resolve(property) {
        Property::Object {
          schema: nested,
          references,
        } => {
          let depth = self.enter(references);
          let children = self.flatten_object(nested, path, source, sink);
          self.stack.truncate(depth);
          BodyNode::Object {
            key: name.clone(),
            container: path.join("_"),
            children,
          }
        }
        Property::Leaf { schema: resolved } => {
          let description = property.description().or_else(|| resolved.description());
          let leaf = LeafSite {
            name,
            parent: schema,
            param_type: ParamType::from_schema(resolved),
            description,
          };
          self.leaf(&leaf, path, source, sink)
        }
        Property::Recursive { reference } => {
          sink.warn(GenerationWarning::RecursiveSchema {
            operation_id: sink.operation_id().to_string(),
            reference: reference.to_string(),
          });
          self.opaque_leaf(name, schema, property, path, source, sink)
        }
        Property::Unresolved { error } => {
          sink.warn(GenerationWarning::UnresolvedReference {
            operation_id: sink.operation_id().to_string(),
            error: error.to_string(),
          });
          self.opaque_leaf(name, schema, property, path, source, sink)
        }
      };

      nodes.push(node);
      path.pop();
      source.pop();
    }
    nodes
  }

  fn opaque_leaf(
    &self,
    name: &str,
    parent: &Value,
    property: &Value,
    path: &[String],
    source: &[&str],
    sink: &mut ParameterSink,
  ) -> BodyNode {
    let leaf = LeafSite {
      name,
      parent,
      param_type: ParamType::Object,
      description: property.description(),
    };
    self.leaf(&leaf, path, source, sink)
  }

  fn leaf(&self, site: &LeafSite<'_>, path: &[String], source: &[&str], sink: &mut ParameterSink) -> BodyNode {
    let full_path = path.join("_");
    let simple = path.last().map_or("", String::as_str);
    let base = if self.collisions.contains(simple) {
      full_path.as_str()
    } else {
      simple
    };

    let required = site.parent.requires(site.name);
    let ident = sink.push(ParameterCandidate {
      ident: ensure_identifier(&sanitize_identifier(base, &full_path)),
      original_name: site.name.to_string(),
      source_path: source.join("."),
      param_type: site.param_type,
      required,
      description: clean_description(site.description.unwrap_or_default()),
      location: ParameterLocation::Body,
    });

    BodyNode::Leaf(BodyField {
      key: site.name.to_string(),
      ident,
      required,
    })
  }

  /// Follows the `$ref` chain of a property and classifies the result.
  fn resolve(&self, property: &'a Value) -> Property<'a> {
    let mut current = property;
    let mut references = vec![];

    while let Some(reference) = ref_path(current) {
      if self.stack.contains(&reference) || references.contains(&reference) {
        return Property::Recursive { reference };
      }
      references.push(reference);
      current = match self.document.resolve(reference) {
        Ok(target) => target,
        Err(error) => return Property::Unresolved { error },
      };
    }

    if current.is_expandable_object() {
      Property::Object {
        schema: current,
        references,
      }
    } else {
      Property::Leaf { schema: current }
    }
  }

  fn enter(&mut self, references: Vec<&'a str>) -> usize {
    let depth = self.stack.len();
    self.stack.extend(references);
    depth
  }
}

struct LeafSite<'s> {
  name: &'s str,
  parent: &'s Value,
  param_type: ParamType,
  description: Option<&'s str>,
}
