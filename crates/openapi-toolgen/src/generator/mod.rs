pub(crate) mod ast;
pub(crate) mod codegen;
pub(crate) mod converter;
pub mod metrics;
pub mod orchestrator;

#[cfg(test)]
mod tests;
