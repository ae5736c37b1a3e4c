use quote::quote;

use super::{format_tokens, ident, tools::ToolFragment};
use crate::{
  generator::ast::{LintConfig, ToolDef},
  utils::text::clean_description,
};

/// Header facts of one generated module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ModuleMetadata {
  pub title: String,
  pub version: String,
  pub source: String,
}

impl ModuleMetadata {
  fn header(&self) -> String {
    format!(
      "//! AUTO-GENERATED CODE - DO NOT EDIT!\n//!\n//! {}\n//! Source: {}\n//! Version: {}\n//! Generated by `openapi-toolgen`\n\n",
      clean_description(&self.title),
      self.source,
      clean_description(&self.version),
    )
  }
}

/// Renders every tool of one specification into a single module with its
/// registration entry point.
pub(crate) struct ModuleGenerator<'a> {
  metadata: &'a ModuleMetadata,
  service: &'a str,
  tools: &'a [ToolDef],
}

impl<'a> ModuleGenerator<'a> {
  pub(crate) fn new(metadata: &'a ModuleMetadata, service: &'a str, tools: &'a [ToolDef]) -> Self {
    Self {
      metadata,
      service,
      tools,
    }
  }

  pub(crate) fn generate(&self) -> anyhow::Result<String> {
    let fragments: Vec<ToolFragment<'_>> = self.tools.iter().map(ToolFragment::new).collect();
    let registry = if fragments.is_empty() {
      ident("_registry")
    } else {
      ident("registry")
    };

    let registrations = fragments.iter().map(|fragment| {
      let name = fragment.fn_ident().to_string();
      let description = fragment.summary();
      let schema = fragment.schema_ident();
      let handler = fragment.handler_ident();
      quote! {
        #registry.register_tool(ToolDescriptor {
          name: #name,
          description: #description,
          input_schema: #schema(),
          handler: #handler,
        });
      }
    });
    let lints = LintConfig::default();
    let service = self.service;

    let code = quote! {
      #lints

      use openapi_toolgen_support::{
        self as support, Method, ToolDescriptor, ToolFuture, ToolModule, ToolOutput, ToolRegistry,
        serde::Deserialize,
        serde_json::{self, Map, Value, json},
      };

      #(#fragments)*

      /// Registers every tool of this module into `registry`.
      pub fn register(#registry: &mut dyn ToolRegistry) {
        #(#registrations)*
      }

      pub const MODULE: ToolModule = ToolModule {
        name: #service,
        register,
      };
    };

    Ok(format!("{}{}", self.metadata.header(), format_tokens(code)?))
  }
}
