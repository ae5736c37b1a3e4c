use crate::generator::codegen::ManifestGenerator;

#[test]
fn test_manifest_lists_modules_in_file_name_order() {
  let manifest = ManifestGenerator::new([
    "generated_xsoar_tools".to_string(),
    "generated_xsiam_tools".to_string(),
    "generated_xsoar_tools".to_string(),
  ]);
  let code = manifest.generate().unwrap();

  assert!(code.starts_with("//! AUTO-GENERATED CODE - DO NOT EDIT!\n"));
  assert_eq!(code.matches("pub mod generated_xsoar_tools;").count(), 1);

  let xsiam = code.find("pub mod generated_xsiam_tools;").unwrap();
  let xsoar = code.find("pub mod generated_xsoar_tools;").unwrap();
  assert!(xsiam < xsoar);

  assert!(code.contains("pub const MODULES: &[openapi_toolgen_support::ToolModule]"));
  let first = code.find("generated_xsiam_tools::MODULE").unwrap();
  let second = code.find("generated_xsoar_tools::MODULE").unwrap();
  assert!(first < second);
}

#[test]
fn test_empty_manifest() {
  let code = ManifestGenerator::new(Vec::new()).generate().unwrap();
  assert!(code.contains("pub const MODULES: &[openapi_toolgen_support::ToolModule] = &[];"));
}
