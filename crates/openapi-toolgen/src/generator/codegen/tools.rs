use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::Ident;

use super::ident;
use crate::{
  generator::{
    ast::{BodyField, BodyNode, ParameterLocation, ToolDef, ToolParameter},
    converter::IdentAllocator,
  },
  naming::to_type_name,
  utils::text::{MISSING_DESCRIPTION, clean_description, describe, doc_lines},
};

/// Locals of a generated tool body, named so they cannot shadow an argument.
struct Locals {
  query: Ident,
  headers: Ident,
  body: Ident,
  config: Ident,
  url: Ident,
  outcome: Ident,
  idents: IdentAllocator,
}

impl Locals {
  fn new(tool: &ToolDef) -> Self {
    let mut idents = IdentAllocator::with_reserved(tool.parameters.iter().map(|param| param.ident.as_str()));
    let mut claim = |name: &str| ident(&idents.claim(name));

    Self {
      query: claim("query"),
      headers: claim("headers"),
      body: claim("body"),
      config: claim("config"),
      url: claim("url"),
      outcome: claim("outcome"),
      idents,
    }
  }

  fn container(&mut self, name: &str) -> Ident {
    ident(&self.idents.claim(&format!("{name}_obj")))
  }
}

/// Renders one [`ToolDef`] as an async tool function, its input schema, its
/// argument struct and the type-erased handler registered with the host.
pub(crate) struct ToolFragment<'a> {
  tool: &'a ToolDef,
}

impl<'a> ToolFragment<'a> {
  pub(crate) fn new(tool: &'a ToolDef) -> Self {
    Self { tool }
  }

  pub(crate) fn fn_ident(&self) -> Ident {
    ident(&self.tool.name)
  }

  pub(crate) fn schema_ident(&self) -> Ident {
    ident(&format!("{}_schema", self.tool.name))
  }

  pub(crate) fn handler_ident(&self) -> Ident {
    ident(&format!("{}_handler", self.tool.name))
  }

  fn args_ident(&self) -> Ident {
    ident(&format!("{}Args", to_type_name(&self.tool.name)))
  }

  /// The one-line description registered with the host.
  pub(crate) fn summary(&self) -> String {
    describe(Some(self.tool.description.as_str()))
  }

  fn doc_attrs(&self) -> TokenStream {
    let tool = self.tool;
    let mut lines = doc_lines(&tool.description);
    if lines.is_empty() {
      lines.push(MISSING_DESCRIPTION.to_string());
    }
    lines.push(String::new());
    lines.push(format!("`{} {}`", tool.method, tool.path));
    lines.push(String::new());
    lines.push("# Arguments".to_string());
    lines.push(String::new());

    if tool.parameters.is_empty() {
      lines.push("No parameters required".to_string());
    }
    for param in &tool.parameters {
      lines.push(format!(
        "* `{}` ({}): {} ({})",
        param.ident,
        param.param_type,
        describe(Some(param.description.as_str())),
        if param.required { "required" } else { "optional" }
      ));
    }

    lines.push(String::new());
    lines.push("# Returns".to_string());
    lines.push(String::new());
    lines.push(clean_description(&tool.response_description));

    let attrs = lines.iter().map(|line| {
      let text = if line.is_empty() { String::new() } else { format!(" {line}") };
      quote! { #[doc = #text] }
    });
    quote! { #(#attrs)* }
  }

  fn argument_type(param: &ToolParameter) -> TokenStream {
    let ty = param.param_type;
    if param.required {
      quote! { #ty }
    } else {
      quote! { Option<#ty> }
    }
  }

  fn function(&self) -> TokenStream {
    let tool = self.tool;
    let mut locals = Locals::new(tool);
    let fn_ident = self.fn_ident();
    let docs = self.doc_attrs();
    let arguments = tool.parameters.iter().map(|param| {
      let name = ident(&param.ident);
      let ty = Self::argument_type(param);
      quote! { #name: #ty }
    });

    let validation = self.validation();
    let declarations = self.declarations(&locals);
    let legacy = self.legacy_assignments(&locals);
    let location = self.location_assignments(&locals);
    let body = self.body_assignments(&mut locals);
    let url = self.url(&locals);
    let request = self.request(&locals);
    let outcome = &locals.outcome;

    quote! {
      #docs
      pub async fn #fn_ident(#(#arguments),*) -> ToolOutput {
        #validation
        #declarations
        #legacy
        #location
        #body
        #url
        let #outcome = #request;
        Ok(match #outcome {
          Ok(text) => support::response_content(&text),
          Err(err) => support::transport_failure(&err),
        })
      }
    }
  }

  fn validation(&self) -> TokenStream {
    if self.tool.parameters.is_empty() {
      return quote! {};
    }

    let entries = self.tool.parameters.iter().map(|param| {
      let name = &param.ident;
      let value = ident(name);
      quote! { (#name.to_string(), json!(#value)) }
    });
    quote! {
      support::validate_inputs(&Value::Object(Map::from_iter([#(#entries),*])))?;
    }
  }

  fn uses_location(&self, location: ParameterLocation) -> bool {
    self.tool.parameters.iter().any(|param| param.location == location)
  }

  fn declarations(&self, locals: &Locals) -> TokenStream {
    let mut tokens = TokenStream::new();
    if self.uses_location(ParameterLocation::Query) {
      let query = &locals.query;
      tokens.extend(quote! { let mut #query: Vec<(String, String)> = Vec::new(); });
    }
    if self.uses_location(ParameterLocation::Header) {
      let headers = &locals.headers;
      tokens.extend(quote! { let mut #headers: Vec<(String, String)> = Vec::new(); });
    }
    if !self.tool.body.is_empty() {
      let body = &locals.body;
      tokens.extend(quote! { let mut #body = Map::new(); });
    }
    tokens
  }

  fn legacy_assignments(&self, locals: &Locals) -> TokenStream {
    let assignments = self
      .tool
      .body
      .legacy_fields
      .iter()
      .map(|field| field_assignment(field, &locals.body));
    quote! { #(#assignments)* }
  }

  fn location_assignments(&self, locals: &Locals) -> TokenStream {
    let assignments = self.tool.location_parameters().into_iter().filter_map(|param| {
      let target = match param.location {
        ParameterLocation::Query => &locals.query,
        ParameterLocation::Header => &locals.headers,
        ParameterLocation::Path | ParameterLocation::Body => return None,
      };
      let name = &param.original_name;
      let value = ident(&param.ident);

      Some(if param.required {
        quote! { #target.push((#name.to_string(), support::sanitize_param(&#value))); }
      } else {
        quote! {
          if let Some(value) = &#value {
            #target.push((#name.to_string(), support::sanitize_param(value)));
          }
        }
      })
    });
    quote! { #(#assignments)* }
  }

  fn body_assignments(&self, locals: &mut Locals) -> TokenStream {
    let plan = &self.tool.body;
    let body = locals.body.clone();

    match &plan.wrapper {
      Some(wrapper) => {
        let container = locals.container(wrapper);
        let children = body_nodes(&plan.nodes, &container, locals);
        quote! {
          let mut #container = Map::new();
          #children
          if !#container.is_empty() {
            #body.insert(#wrapper.to_string(), Value::Object(#container));
          }
        }
      }
      None => body_nodes(&plan.nodes, &body, locals),
    }
  }

  fn url(&self, locals: &Locals) -> TokenStream {
    let tool = self.tool;
    let Locals { config, url, .. } = locals;
    let service = &tool.service;
    let base_url = &tool.base_url;
    let path = &tool.path;

    let path_params: Vec<&ToolParameter> = tool
      .location_parameters()
      .into_iter()
      .filter(|param| param.location == ParameterLocation::Path)
      .collect();
    let mutability = (!path_params.is_empty()).then(|| quote! { mut });

    let substitutions = path_params.iter().map(|param| {
      let placeholder = format!("{{{}}}", param.original_name);
      let value = ident(&param.ident);
      if param.required {
        quote! { #url = #url.replace(#placeholder, &support::sanitize_param(&#value)); }
      } else {
        quote! {
          if let Some(value) = &#value {
            #url = #url.replace(#placeholder, &support::sanitize_param(value));
          }
        }
      }
    });

    quote! {
      let #config = support::get_api_config();
      let #mutability #url = format!("{}{}", #config.base_url(#service, #base_url), #path);
      #(#substitutions)*
    }
  }

  fn request(&self, locals: &Locals) -> TokenStream {
    let method = ident(self.tool.method.as_str());
    let Locals {
      query,
      headers,
      body,
      url,
      ..
    } = locals;

    let mut builders = TokenStream::new();
    if self.uses_location(ParameterLocation::Query) {
      builders.extend(quote! { request = request.query(&#query); });
    }
    if self.uses_location(ParameterLocation::Header) {
      builders.extend(quote! {
        for (name, value) in &#headers {
          request = request.header(name.as_str(), value.as_str());
        }
      });
    }
    if !self.tool.body.is_empty() {
      builders.extend(quote! {
        if !#body.is_empty() {
          request = request.json(&#body);
        }
      });
    }
    let mutability = (!builders.is_empty()).then(|| quote! { mut });

    quote! {
      async {
        let client = support::get_http_client()?;
        let #mutability request = client.request(Method::#method, &#url);
        #builders
        request.send().await?.error_for_status()?.text().await
      }
      .await
    }
  }

  fn schema_fn(&self) -> TokenStream {
    let schema_ident = self.schema_ident();
    let entries: Vec<TokenStream> = self
      .tool
      .parameters
      .iter()
      .map(|param| {
        let name = &param.ident;
        let description = describe(Some(param.description.as_str()));
        let property = match param.param_type.json_type() {
          Some(kind) => quote! { json!({ "type": #kind, "description": #description }) },
          None => quote! { json!({ "description": #description }) },
        };
        quote! { (#name.to_string(), #property) }
      })
      .collect();
    let properties = if entries.is_empty() {
      quote! { Map::new() }
    } else {
      quote! { Map::from_iter([#(#entries),*]) }
    };
    let required = self.tool.required_names();

    quote! {
      pub fn #schema_ident() -> Value {
        let properties: Map<String, Value> = #properties;
        let required: Vec<&str> = vec![#(#required),*];
        json!({ "type": "object", "properties": properties, "required": required })
      }
    }
  }

  fn args_struct(&self) -> TokenStream {
    let args_ident = self.args_ident();
    let fields = self.tool.parameters.iter().map(|param| {
      let name = ident(&param.ident);
      let ty = Self::argument_type(param);
      if param.required {
        quote! { #name: #ty }
      } else {
        quote! {
          #[serde(default)]
          #name: #ty
        }
      }
    });

    quote! {
      #[derive(Debug, Deserialize)]
      #[serde(crate = "openapi_toolgen_support::serde")]
      struct #args_ident {
        #(#fields),*
      }
    }
  }

  fn handler(&self) -> TokenStream {
    let handler_ident = self.handler_ident();
    let fn_ident = self.fn_ident();
    let args_ident = self.args_ident();
    let names: Vec<Ident> = self.tool.parameters.iter().map(|param| ident(&param.ident)).collect();

    quote! {
      fn #handler_ident(arguments: Value) -> ToolFuture {
        Box::pin(async move {
          let #args_ident { #(#names),* } = support::parse_arguments(arguments)?;
          #fn_ident(#(#names),*).await
        })
      }
    }
  }
}

impl ToTokens for ToolFragment<'_> {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    tokens.extend(self.function());
    tokens.extend(self.schema_fn());
    tokens.extend(self.args_struct());
    tokens.extend(self.handler());
  }
}

fn field_assignment(field: &BodyField, target: &Ident) -> TokenStream {
  let key = &field.key;
  let value = ident(&field.ident);
  if field.required {
    quote! { #target.insert(#key.to_string(), json!(#value)); }
  } else {
    quote! {
      if let Some(value) = &#value {
        #target.insert(#key.to_string(), json!(value));
      }
    }
  }
}

/// Rebuilds nested objects: each object gets its own container, filled by its
/// children and attached to `target` only when non-empty.
fn body_nodes(nodes: &[BodyNode], target: &Ident, locals: &mut Locals) -> TokenStream {
  let mut tokens = TokenStream::new();
  for node in nodes {
    match node {
      BodyNode::Leaf(field) => tokens.extend(field_assignment(field, target)),
      BodyNode::Object {
        key,
        container,
        children,
      } => {
        let object = locals.container(container);
        let children = body_nodes(children, &object, locals);
        tokens.extend(quote! {
          let mut #object = Map::new();
          #children
          if !#object.is_empty() {
            #target.insert(#key.to_string(), Value::Object(#object));
          }
        });
      }
    }
  }
  tokens
}
