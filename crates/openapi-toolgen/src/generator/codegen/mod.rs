use proc_macro2::TokenStream;

mod manifest;
mod module;
mod tools;

#[cfg(test)]
mod tests;

pub(crate) use manifest::ManifestGenerator;
pub(crate) use module::{ModuleGenerator, ModuleMetadata};

/// Parses a token stream as a file and pretty-prints it.
pub(crate) fn format_tokens(tokens: TokenStream) -> anyhow::Result<String> {
  let syntax_tree: syn::File = syn::parse2(tokens)?;
  Ok(prettyplease::unparse(&syntax_tree))
}

/// Identifier token for a name the converter already made safe.
pub(crate) fn ident(name: &str) -> syn::Ident {
  quote::format_ident!("{name}")
}
