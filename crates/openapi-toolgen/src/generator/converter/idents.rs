use std::collections::HashSet;

/// Hands out identifiers that are unique within one scope.
///
/// A taken name gets the smallest free numeric suffix, starting at `_2`.
#[derive(Debug, Clone, Default)]
pub(crate) struct IdentAllocator {
  taken: HashSet<String>,
}

impl IdentAllocator {
  pub(crate) fn new() -> Self {
    Self::default()
  }

  pub(crate) fn with_reserved<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
    Self {
      taken: names.into_iter().map(str::to_string).collect(),
    }
  }

  /// Claims `name`, returning it unchanged when free.
  pub(crate) fn claim(&mut self, name: &str) -> String {
    if self.taken.insert(name.to_string()) {
      return name.to_string();
    }

    let mut suffix = 2usize;
    loop {
      let candidate = format!("{name}_{suffix}");
      if self.taken.insert(candidate.clone()) {
        return candidate;
      }
      suffix += 1;
    }
  }

  pub(crate) fn contains(&self, name: &str) -> bool {
    self.taken.contains(name)
  }
}
