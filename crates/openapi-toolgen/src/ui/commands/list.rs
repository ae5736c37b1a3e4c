use std::path::Path;

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};

use crate::{
  generator::orchestrator::Orchestrator,
  ui::{Colors, term_width},
  utils::spec::SpecLoader,
};

/// Prints the tools one specification would produce, using the same
/// collision-aware names as `generate`.
pub async fn list_operations(input: &Path, colors: &Colors) -> anyhow::Result<()> {
  let document = SpecLoader::open(input).await?.parse()?;
  let orchestrator = Orchestrator::new(document, input);
  let (tools, stats) = orchestrator.tools();

  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut header = Row::new();
  for title in ["TOOL", "METHOD", "PATH"] {
    header.add_cell(Cell::new(title).fg(Colors::cell(colors.label())));
  }
  table.set_header(header);

  for tool in &tools {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(&tool.name)
        .fg(Colors::cell(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(
      Cell::new(tool.method.as_str())
        .fg(Colors::cell(colors.accent()))
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(Cell::new(&tool.path).fg(Colors::cell(colors.primary())));
    table.add_row(row);
  }

  println!("{table}");
  if stats.operations_skipped > 0 {
    println!("{} operations without an operationId were skipped", stats.operations_skipped);
  }

  Ok(())
}
