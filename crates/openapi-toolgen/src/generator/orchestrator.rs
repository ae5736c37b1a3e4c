//! Orchestration for the specification to tool module pipeline.
//!
//! One [`Orchestrator`] handles one specification file: it enumerates the
//! operations, assigns collision-free tool names, converts every operation into
//! a [`ToolDef`] and renders the module source.
//!
//! ## Usage
//!
//! ```no_run
//! # async fn example() -> anyhow::Result<()> {
//! let path = std::path::Path::new("specs/xsiam.yaml");
//! let document = SpecLoader::open(path).await?.parse()?;
//!
//! let module = Orchestrator::new(document, path).generate()?;
//! println!("{} tools, {} warnings", module.stats.tools_generated, module.stats.warnings.len());
//! std::fs::write(format!("generated/{}", module.file_name), module.code)?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use crate::{
  generator::{
    ast::ToolDef,
    codegen::{ManifestGenerator, ModuleGenerator, ModuleMetadata},
    converter::{OperationConverter, ToolNamer, service_tag},
    metrics::GenerationStats,
  },
  utils::spec::SpecDocument,
};

const UNKNOWN_VERSION: &str = "unversioned";

/// Generates the tool module of a single specification document.
pub struct Orchestrator {
  document: SpecDocument,
  service: String,
  source_name: String,
}

/// A rendered module ready to be written to disk.
#[derive(Debug)]
pub struct GeneratedModule {
  /// Module identifier, `generated_<service>_tools`.
  pub module_name: String,
  pub file_name: String,
  pub code: String,
  pub stats: GenerationStats,
}

impl Orchestrator {
  /// `source_path` names the module: its file stem becomes the service tag that
  /// prefixes every tool name.
  pub fn new(document: SpecDocument, source_path: &Path) -> Self {
    let stem = source_path
      .file_stem()
      .map(|stem| stem.to_string_lossy().into_owned())
      .unwrap_or_default();
    let source_name = source_path
      .file_name()
      .map_or_else(|| stem.clone(), |name| name.to_string_lossy().into_owned());

    Self {
      document,
      service: service_tag(&stem),
      source_name,
    }
  }

  pub fn service(&self) -> &str {
    &self.service
  }

  pub fn module_name(&self) -> String {
    format!("generated_{}_tools", self.service)
  }

  pub(crate) fn metadata(&self) -> ModuleMetadata {
    ModuleMetadata {
      title: self
        .document
        .title()
        .map_or_else(|| self.service.to_ascii_uppercase(), str::to_string),
      version: self.document.version().unwrap_or_else(|| UNKNOWN_VERSION.to_string()),
      source: self.source_name.clone(),
    }
  }

  /// Converts every operation that has an `operationId`, in document order.
  ///
  /// Operations without one are skipped and counted in the returned statistics.
  pub fn tools(&self) -> (Vec<ToolDef>, GenerationStats) {
    let operations = self.document.operations();
    let mut namer = ToolNamer::new(&self.service, &operations);
    let converter = OperationConverter::new(&self.document, &self.service);

    let mut stats = GenerationStats::default();
    let mut tools = Vec::with_capacity(operations.len());

    for operation in &operations {
      let Some(operation_id) = operation.operation_id() else {
        stats.record_skipped_operation(operation.method.as_str(), operation.path);
        continue;
      };

      let (name, renamed) = namer.assign(operation_id, &operation.method_name());
      stats.record_warnings(renamed);

      let (tool, warnings) = converter.convert(operation, operation_id, name);
      stats.record_tool(tool.parameters.len());
      stats.record_warnings(warnings);
      tools.push(tool);
    }

    (tools, stats)
  }

  /// Renders the module source.
  ///
  /// # Errors
  ///
  /// Returns an error if the rendered tokens are not valid Rust, which points at
  /// an identifier the naming rules failed to sanitize.
  pub fn generate(&self) -> anyhow::Result<GeneratedModule> {
    let (tools, stats) = self.tools();
    let metadata = self.metadata();
    let code = ModuleGenerator::new(&metadata, &self.service, &tools).generate()?;
    let module_name = self.module_name();

    Ok(GeneratedModule {
      file_name: format!("{module_name}.rs"),
      module_name,
      code,
      stats,
    })
  }
}

/// Renders the `mod.rs` manifest declaring `module_names`.
pub fn generate_manifest(module_names: impl IntoIterator<Item = String>) -> anyhow::Result<String> {
  ManifestGenerator::new(module_names).generate()
}
