use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

/// Inner `#![allow]` attributes placed at the top of every generated module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintAllow {
  ClippyDocMarkdown,
  ClippyTooManyArguments,
  ClippyTooManyLines,
  ClippyNeedlessPassByValue,
  DeadCode,
  NonSnakeCase,
  UnusedImports,
  UnusedMut,
}

impl ToTokens for LintAllow {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    let attr = match self {
      Self::ClippyDocMarkdown => quote! { #![allow(clippy::doc_markdown)] },
      Self::ClippyTooManyArguments => quote! { #![allow(clippy::too_many_arguments)] },
      Self::ClippyTooManyLines => quote! { #![allow(clippy::too_many_lines)] },
      Self::ClippyNeedlessPassByValue => quote! { #![allow(clippy::needless_pass_by_value)] },
      Self::DeadCode => quote! { #![allow(dead_code)] },
      Self::NonSnakeCase => quote! { #![allow(non_snake_case)] },
      Self::UnusedImports => quote! { #![allow(unused_imports)] },
      Self::UnusedMut => quote! { #![allow(unused_mut)] },
    };
    tokens.extend(attr);
  }
}

#[derive(Debug, Clone)]
pub struct LintConfig {
  pub allows: Vec<LintAllow>,
}

impl Default for LintConfig {
  fn default() -> Self {
    Self {
      allows: vec![
        LintAllow::ClippyDocMarkdown,
        LintAllow::ClippyTooManyArguments,
        LintAllow::ClippyTooManyLines,
        LintAllow::ClippyNeedlessPassByValue,
        LintAllow::DeadCode,
        LintAllow::NonSnakeCase,
        LintAllow::UnusedImports,
        LintAllow::UnusedMut,
      ],
    }
  }
}

impl ToTokens for LintConfig {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    for allow in &self.allows {
      allow.to_tokens(tokens);
    }
  }
}
