/// A body leaf: the argument `ident` is written under the original `key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyField {
  pub key: String,
  pub ident: String,
  pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyNode {
  Leaf(BodyField),
  /// A nested object rebuilt into its own container and attached to the parent
  /// only when something was written into it. `container` is the underscore-joined
  /// path of normalized names leading to the object.
  Object {
    key: String,
    container: String,
    children: Vec<BodyNode>,
  },
}

/// Instructions for rebuilding the nested JSON payload from flattened arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyPlan {
  /// Fields expanded from a legacy `in: body` parameter, written straight into the payload.
  pub legacy_fields: Vec<BodyField>,
  /// Wrapper key whose object holds `nodes`, when the request body used the wrapper convention.
  pub wrapper: Option<String>,
  pub nodes: Vec<BodyNode>,
}

impl BodyPlan {
  pub fn is_empty(&self) -> bool {
    self.legacy_fields.is_empty() && self.nodes.is_empty()
  }

  /// Every leaf of the plan in the order its assignment is emitted.
  pub fn fields(&self) -> Vec<&BodyField> {
    fn walk<'a>(nodes: &'a [BodyNode], out: &mut Vec<&'a BodyField>) {
      for node in nodes {
        match node {
          BodyNode::Leaf(field) => out.push(field),
          BodyNode::Object { children, .. } => walk(children, out),
        }
      }
    }

    let mut out: Vec<&BodyField> = self.legacy_fields.iter().collect();
    walk(&self.nodes, &mut out);
    out
  }
}
