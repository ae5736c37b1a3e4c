pub mod refs;
pub mod schema_ext;
pub mod spec;
pub mod text;

pub(crate) use refs::{RefError, ref_path};
pub(crate) use schema_ext::SchemaExt;
