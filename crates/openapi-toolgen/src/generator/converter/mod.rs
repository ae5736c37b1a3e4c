mod flattener;
mod idents;
mod operations;
mod parameters;
mod tool_names;

#[cfg(test)]
mod tests;

pub(crate) use flattener::SchemaFlattener;
pub(crate) use idents::IdentAllocator;
pub(crate) use operations::OperationConverter;
pub(crate) use parameters::{ParameterBuilder, ParameterSink};
pub(crate) use tool_names::{ToolNamer, service_tag};

/// Property name of the single-object envelope some APIs wrap every mutation payload in.
pub(crate) const WRAPPER_KEY: &str = "request_data";

/// Response codes whose description documents a tool's return value, in priority order.
pub(crate) const SUCCESS_STATUS_CODES: [&str; 3] = ["200", "201", "204"];

pub(crate) const DEFAULT_RESPONSE_DESCRIPTION: &str = "API response data";
