use quote::quote;

use super::{format_tokens, ident};

const MANIFEST_HEADER: &str = "//! AUTO-GENERATED CODE - DO NOT EDIT!\n//!\n//! Tool modules generated by `openapi-toolgen`, in file-name order.\n\n";

/// Renders the `mod.rs` that declares every generated module and lists their
/// descriptors for the host.
pub(crate) struct ManifestGenerator {
  modules: Vec<String>,
}

impl ManifestGenerator {
  pub(crate) fn new(modules: impl IntoIterator<Item = String>) -> Self {
    let mut modules: Vec<String> = modules.into_iter().collect();
    modules.sort();
    modules.dedup();
    Self { modules }
  }

  pub(crate) fn generate(&self) -> anyhow::Result<String> {
    let idents: Vec<_> = self.modules.iter().map(|name| ident(name)).collect();

    let code = quote! {
      #(pub mod #idents;)*

      pub const MODULES: &[openapi_toolgen_support::ToolModule] = &[#(#idents::MODULE),*];
    };

    Ok(format!("{MANIFEST_HEADER}{}", format_tokens(code)?))
  }
}
