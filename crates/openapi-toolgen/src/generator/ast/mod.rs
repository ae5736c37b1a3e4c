mod body;
mod lints;
mod parameters;
mod tool;


pub use body::{BodyField, BodyNode, BodyPlan};
pub use lints::LintConfig;
pub use parameters::{ParamType, ParameterLocation, ToolParameter};
pub use tool::ToolDef;
