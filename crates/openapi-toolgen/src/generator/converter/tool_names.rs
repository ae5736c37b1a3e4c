use std::collections::{HashMap, HashSet};

use super::IdentAllocator;
use crate::{
  generator::metrics::GenerationWarning,
  naming::{ensure_identifier, sanitize_identifier, to_snake_case},
  utils::spec::OperationRef,
};

/// Normalizes a spec file stem into the service tag that prefixes every tool name.
pub(crate) fn service_tag(stem: &str) -> String {
  let snake = to_snake_case(stem, None);
  ensure_identifier(&sanitize_identifier(&snake, stem))
}

/// Assigns final tool names for every operation of one document.
///
/// Names are first computed with the operation's own HTTP verb stripped. When two
/// or more operations land on the same name, all of them keep their verb prefix
/// instead, so `getWidget` (GET) and `postGetWidget` (POST) stay apart.
#[derive(Debug)]
pub(crate) struct ToolNamer {
  service: String,
  colliding: HashSet<String>,
  assigned: IdentAllocator,
}

impl ToolNamer {
  pub(crate) fn new(service: &str, operations: &[OperationRef<'_>]) -> Self {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for operation in operations {
      if let Some(operation_id) = operation.operation_id() {
        *counts
          .entry(to_snake_case(operation_id, Some(&operation.method_name())))
          .or_default() += 1;
      }
    }

    Self {
      service: service.to_string(),
      colliding: counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| name)
        .collect(),
      assigned: IdentAllocator::new(),
    }
  }

  pub(crate) fn is_colliding(&self, tentative: &str) -> bool {
    self.colliding.contains(tentative)
  }

  /// Returns the final name for an operation. Operation ids that normalize identically
  /// even with their verb kept get a numeric suffix and a warning.
  pub(crate) fn assign(&mut self, operation_id: &str, method: &str) -> (String, Option<GenerationWarning>) {
    let tentative = to_snake_case(operation_id, Some(method));
    let base = if self.is_colliding(&tentative) {
      to_snake_case(operation_id, None)
    } else {
      tentative
    };

    let qualified = if self.service.is_empty() {
      ensure_identifier(&sanitize_identifier(&base, &base))
    } else if base.is_empty() {
      format!("{}_unnamed", self.service)
    } else {
      format!("{}_{base}", self.service)
    };

    let name = self.assigned.claim(&qualified);
    let warning = (name != qualified).then(|| GenerationWarning::ToolRenamed {
      operation_id: operation_id.to_string(),
      from: qualified,
      to: name.clone(),
    });
    (name, warning)
  }
}
