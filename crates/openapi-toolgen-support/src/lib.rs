//! Runtime support for tool modules produced by `openapi-toolgen`.
//!
//! Generated modules call into this crate for configuration, input hygiene, HTTP
//! transport and registration into a host-provided [`ToolRegistry`].

pub use http::Method;
#[cfg(feature = "reqwest")]
pub use reqwest;
pub use serde;
pub use serde_json;

#[cfg(feature = "reqwest")]
mod client;
mod config;
mod error;
mod rate_limit;
mod registry;
mod security;

#[cfg(feature = "reqwest")]
pub use client::{get_http_client, http_client, response_content, transport_failure};
pub use config::{ApiConfig, get_api_config};
pub use error::ToolError;
pub use rate_limit::RateLimiter;
pub use registry::{
  TextContent, ToolCatalog, ToolDescriptor, ToolFuture, ToolHandler, ToolModule, ToolOutput, ToolRegistry,
  parse_arguments,
};
pub use security::{
  MAX_ERROR_LEN, MAX_INPUT_LEN, MAX_SANITIZED_LEN, sanitize_error_message, sanitize_input, sanitize_param,
  validate_inputs,
};
