use std::path::{Path, PathBuf};

use chrono::{Local, Timelike};
use crossterm::style::Stylize;

use crate::{
  generator::{
    metrics::GenerationStats,
    orchestrator::{GeneratedModule, Orchestrator, generate_manifest},
  },
  ui::{Colors, GenerateCommand},
  utils::spec::{SpecFormat, SpecLoader},
};

const MANIFEST_FILE: &str = "mod.rs";

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub input_dir: PathBuf,
  pub output_dir: PathBuf,
  pub verbose: bool,
  pub quiet: bool,
}

impl GenerateConfig {
  pub fn from_command(command: GenerateCommand) -> Self {
    let GenerateCommand {
      input_dir,
      output_dir,
      verbose,
      quiet,
    } = command;

    Self {
      input_dir,
      output_dir,
      verbose,
      quiet,
    }
  }

  /// Every supported specification directly inside the input directory, sorted by file name.
  async fn discover_specs(&self) -> anyhow::Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(&self.input_dir).await?;
    let mut specs = vec![];
    while let Some(entry) = entries.next_entry().await? {
      let path = entry.path();
      if entry.file_type().await?.is_file() && SpecFormat::is_supported(&path) {
        specs.push(path);
      }
    }
    specs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(specs)
  }

  async fn process_spec(&self, path: &Path) -> anyhow::Result<(GeneratedModule, PathBuf)> {
    let document = SpecLoader::open(path).await?.parse()?;
    let module = Orchestrator::new(document, path).generate()?;

    let destination = self.output_dir.join(&module.file_name);
    tokio::fs::write(&destination, &module.code).await?;
    Ok((module, destination))
  }

  async fn write_manifest(&self, module_names: Vec<String>) -> anyhow::Result<PathBuf> {
    let destination = self.output_dir.join(MANIFEST_FILE);
    tokio::fs::write(&destination, generate_manifest(module_names)?).await?;
    Ok(destination)
  }
}

/// Outcome of one `generate` run.
#[derive(Debug, Default)]
pub struct GenerateSummary {
  pub generated: Vec<PathBuf>,
  pub failed: Vec<(PathBuf, String)>,
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      println!("{} {message}", format_timestamp().with(self.colors.timestamp()));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      println!(
        "            {:<25} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }

  fn log_scanning(&self) {
    self.info(
      &format!("Scanning {} for specifications", self.config.input_dir.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_processing(&self, path: &Path) {
    self.info(
      &format!("Processing {}", path.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn print_statistics(&self, stats: &GenerationStats) {
    if self.config.quiet {
      return;
    }

    self.stat("Tools generated:", stats.tools_generated.to_string());
    self.stat("Parameters generated:", stats.parameters_generated.to_string());
    if stats.operations_skipped > 0 {
      self.stat("Operations skipped:", stats.operations_skipped.to_string());
    }
    if !stats.warnings.is_empty() {
      self.stat("Warnings:", stats.warnings.len().to_string());
    }
    self.print_warnings(stats);
  }

  fn print_warnings(&self, stats: &GenerationStats) {
    for warning in &stats.warnings {
      if warning.is_skipped_item() {
        eprintln!(
          "{} {}",
          "Skipped:".with(self.colors.accent()),
          warning.to_string().with(self.colors.primary())
        );
      } else if self.config.verbose {
        eprintln!(
          "{} {}",
          "Warning:".with(self.colors.accent()),
          warning.to_string().with(self.colors.primary())
        );
      }
    }
  }

  fn log_generated(&self, path: &Path) {
    self.info(
      &format!("Generated {}", path.display())
        .with(self.colors.success())
        .to_string(),
    );
  }

  /// Failures are printed even in quiet mode.
  fn log_failure(&self, path: &Path, error: &str) {
    eprintln!(
      "{} {} {}",
      format_timestamp().with(self.colors.timestamp()),
      format!("Failed: {}", path.display()).with(self.colors.failure()),
      error.with(self.colors.primary())
    );
  }

  fn log_summary(&self, summary: &GenerateSummary) {
    if summary.failed.is_empty() {
      if !self.config.quiet {
        println!();
      }
      self.info(
        &format!("Generated {} tool modules", summary.generated.len())
          .with(self.colors.success())
          .to_string(),
      );
    } else {
      eprintln!();
      eprintln!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        format!(
          "Generated {} tool modules, {} specifications failed",
          summary.generated.len(),
          summary.failed.len()
        )
        .with(self.colors.failure())
      );
    }
  }
}

/// Processes every specification of the input directory. A failing file is
/// logged and recorded; the remaining files are still attempted.
async fn run(config: &GenerateConfig, logger: &GenerateLogger<'_>) -> anyhow::Result<GenerateSummary> {
  logger.log_scanning();
  let specs = config.discover_specs().await?;
  if specs.is_empty() {
    anyhow::bail!(
      "no .json, .yaml or .yml specifications found in {}",
      config.input_dir.display()
    );
  }

  tokio::fs::create_dir_all(&config.output_dir).await?;

  let mut summary = GenerateSummary::default();
  let mut module_names = vec![];
  for path in specs {
    logger.log_processing(&path);
    match config.process_spec(&path).await {
      Ok((module, destination)) => {
        logger.print_statistics(&module.stats);
        logger.log_generated(&destination);
        module_names.push(module.module_name);
        summary.generated.push(destination);
      }
      Err(error) => {
        logger.log_failure(&path, &format!("{error:#}"));
        summary.failed.push((path, format!("{error:#}")));
      }
    }
  }

  let manifest = config.write_manifest(module_names).await?;
  logger.log_generated(&manifest);
  Ok(summary)
}

pub async fn generate_code(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);
  let summary = run(&config, &logger).await?;
  logger.log_summary(&summary);

  if !summary.failed.is_empty() {
    let total = summary.failed.len() + summary.generated.len();
    anyhow::bail!("{} of {total} specifications failed", summary.failed.len());
  }
  Ok(())
}
