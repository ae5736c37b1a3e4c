pub(crate) mod identifiers;
pub(crate) mod reserved;

#[cfg(test)]
mod tests;

pub(crate) use identifiers::{ensure_identifier, to_snake_case, to_type_name};
pub(crate) use reserved::sanitize_identifier;

/// Normalizes a raw field name and renames it if it is reserved.
///
/// `context` is the underscore-joined path of the field, used for the time-bound heuristic.
pub(crate) fn field_identifier(raw_name: &str, context: &str) -> String {
  ensure_identifier(&sanitize_identifier(&to_snake_case(raw_name, None), context))
}
