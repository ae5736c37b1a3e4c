use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "openapi-toolgen")]
#[command(author, version, about = "OpenAPI to callable tool module generator")]
#[command(styles = super::Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Option<Commands>,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List information from an OpenAPI specification
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Generate one tool module per specification found in the input directory
  Generate(GenerateCommand),
}

#[derive(Args, Debug, Clone)]
pub struct GenerateCommand {
  /// Directory scanned for `.json`, `.yaml` and `.yml` specifications
  #[arg(long, value_name = "DIR", default_value = "specs")]
  pub input_dir: PathBuf,

  /// Directory the generated modules and their `mod.rs` manifest are written to
  #[arg(long, value_name = "DIR", default_value = "generated")]
  pub output_dir: PathBuf,

  /// Enable verbose output, including every generation warning
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false, conflicts_with = "verbose")]
  pub quiet: bool,
}

impl Default for GenerateCommand {
  fn default() -> Self {
    Self {
      input_dir: PathBuf::from("specs"),
      output_dir: PathBuf::from("generated"),
      verbose: false,
      quiet: false,
    }
  }
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List the tools an OpenAPI specification would produce
  Operations {
    /// Path to the OpenAPI JSON or YAML specification file
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
  },
}
