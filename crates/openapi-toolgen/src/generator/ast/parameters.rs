use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use serde_json::Value;
use strum::Display;

use crate::utils::SchemaExt;

/// Where a tool parameter is placed in the outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ParameterLocation {
  Query,
  Path,
  Header,
  Body,
}

impl ParameterLocation {
  /// Maps a declared `in` value. A missing value means `query`; `formData`,
  /// `cookie` and unknown locations return `None`.
  pub fn from_declared(location: Option<&str>) -> Option<Self> {
    match location.unwrap_or("query") {
      "query" => Some(Self::Query),
      "path" => Some(Self::Path),
      "header" => Some(Self::Header),
      "body" => Some(Self::Body),
      _ => None,
    }
  }
}

/// Semantic type of a flattened parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ParamType {
  String,
  Integer,
  Number,
  Boolean,
  Array,
  Object,
  Any,
}

impl ParamType {
  /// Infers the type from a schema. A missing type is treated as a string,
  /// a type list uses its first non-null entry.
  pub fn from_schema(schema: &Value) -> Self {
    match schema.schema_type() {
      None | Some("string") => Self::String,
      Some("integer") => Self::Integer,
      Some("number") => Self::Number,
      Some("boolean") => Self::Boolean,
      Some("array") => Self::Array,
      Some("object") => Self::Object,
      Some(_) => Self::Any,
    }
  }

  /// JSON Schema `type` keyword for the tool's input schema; `None` for [`ParamType::Any`].
  pub const fn json_type(self) -> Option<&'static str> {
    match self {
      Self::String => Some("string"),
      Self::Integer => Some("integer"),
      Self::Number => Some("number"),
      Self::Boolean => Some("boolean"),
      Self::Array => Some("array"),
      Self::Object => Some("object"),
      Self::Any => None,
    }
  }
}

impl ToTokens for ParamType {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    let ty = match self {
      Self::String => quote! { String },
      Self::Integer => quote! { i64 },
      Self::Number => quote! { f64 },
      Self::Boolean => quote! { bool },
      Self::Array => quote! { Vec<serde_json::Value> },
      Self::Object => quote! { serde_json::Map<String, serde_json::Value> },
      Self::Any => quote! { serde_json::Value },
    };
    tokens.extend(ty);
  }
}

/// One flattened argument of a generated tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolParameter {
  /// Collision-resolved, reserved-word-safe identifier used in the signature and schema.
  pub ident: String,
  /// Name as written in the source document; used as the wire key.
  pub original_name: String,
  /// Dotted path of original names from the body root, e.g. `update_data.status`.
  pub source_path: String,
  pub param_type: ParamType,
  pub required: bool,
  pub description: String,
  pub location: ParameterLocation,
  /// Position in declaration order, before the required-first partition.
  pub declared_index: usize,
}

impl ToolParameter {
  pub fn is_body(&self) -> bool {
    self.location == ParameterLocation::Body
  }
}
