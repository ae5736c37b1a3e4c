use std::{
  ffi::OsStr,
  path::{Path, PathBuf},
};

use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};
use http::Method;
use serde_json::{Map, Number, Value};

use crate::utils::refs::{RefError, resolve_ref};

/// Methods turned into tools, in the order they are visited for each path.
pub static OPERATION_METHODS: [Method; 5] = [Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
  Json,
  Yaml,
}

impl SpecFormat {
  /// Picks the parser from the file extension. Anything other than `json`, `yaml`
  /// or `yml` is rejected.
  pub fn from_path(path: &Path) -> Result<Self, SpecLoadError> {
    let extension = path.extension().and_then(OsStr::to_str).map(str::to_ascii_lowercase);
    match extension.as_deref() {
      Some("json") => Ok(Self::Json),
      Some("yaml" | "yml") => Ok(Self::Yaml),
      _ => Err(SpecLoadError::UnsupportedSpecFormat {
        path: path.to_path_buf(),
      }),
    }
  }

  pub fn is_supported(path: &Path) -> bool {
    Self::from_path(path).is_ok()
  }
}

#[derive(Debug, thiserror::Error)]
pub enum SpecLoadError {
  #[error("unsupported spec format for '{}': expected .json, .yaml or .yml", path.display())]
  UnsupportedSpecFormat { path: PathBuf },
  #[error("failed to read '{}': {message}", path.display())]
  Io { path: PathBuf, message: String },
  #[error("invalid JSON: {0}")]
  Json(#[from] serde_json::Error),
  #[error("invalid YAML: {0}")]
  Yaml(#[from] serde_yaml::Error),
  #[error("YAML value cannot be represented as JSON: {0}")]
  UnrepresentableYaml(String),
}

pub struct SpecLoader {
  file: AsyncMmapFile,
  format: SpecFormat,
}

impl SpecLoader {
  pub async fn open(path: &Path) -> Result<Self, SpecLoadError> {
    let format = SpecFormat::from_path(path)?;
    let file = AsyncMmapFile::open(path).await.map_err(|err| SpecLoadError::Io {
      path: path.to_path_buf(),
      message: err.to_string(),
    })?;

    Ok(Self { file, format })
  }

  pub fn parse(&self) -> Result<SpecDocument, SpecLoadError> {
    SpecDocument::from_slice(self.file.as_slice(), self.format)
  }
}

/// A parsed OpenAPI 2.0 or 3.x document, kept untyped so both shapes share one model.
///
/// Map order follows the source document.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecDocument {
  root: Value,
}

/// One (method, path) pair of a document.
#[derive(Debug, Clone, Copy)]
pub struct OperationRef<'a> {
  pub path: &'a str,
  pub method: &'a Method,
  pub path_item: &'a Value,
  pub operation: &'a Value,
}

impl<'a> OperationRef<'a> {
  pub fn operation_id(&self) -> Option<&'a str> {
    self
      .operation
      .get("operationId")
      .and_then(Value::as_str)
      .filter(|id| !id.is_empty())
  }

  pub fn method_name(&self) -> String {
    self.method.as_str().to_ascii_lowercase()
  }
}

impl SpecDocument {
  pub fn new(root: Value) -> Self {
    Self { root }
  }

  pub fn from_slice(bytes: &[u8], format: SpecFormat) -> Result<Self, SpecLoadError> {
    let root = match format {
      SpecFormat::Json => serde_json::from_slice(bytes)?,
      SpecFormat::Yaml => {
        let mut yaml: serde_yaml::Value = serde_yaml::from_slice(bytes)?;
        yaml.apply_merge()?;
        yaml_to_json(yaml)?
      }
    };
    Ok(Self::new(root))
  }

  pub fn root(&self) -> &Value {
    &self.root
  }

  pub fn resolve(&self, reference: &str) -> Result<&Value, RefError> {
    resolve_ref(reference, &self.root)
  }

  pub fn title(&self) -> Option<&str> {
    self.root.pointer("/info/title").and_then(Value::as_str)
  }

  pub fn version(&self) -> Option<String> {
    match self.root.pointer("/info/version")? {
      Value::String(version) => Some(version.clone()),
      Value::Number(version) => Some(version.to_string()),
      _ => None,
    }
  }

  /// Base URL declared by the document.
  ///
  /// OpenAPI 3 uses `servers[0].url`; OpenAPI 2 combines the first scheme
  /// (`https` when absent), `host` and `basePath`. Returns an empty string when
  /// neither is present.
  pub fn base_url(&self) -> String {
    if let Some(url) = self.root.pointer("/servers/0/url").and_then(Value::as_str) {
      return url.to_string();
    }

    let Some(host) = self.root.get("host").and_then(Value::as_str) else {
      return String::new();
    };
    let scheme = self
      .root
      .pointer("/schemes/0")
      .and_then(Value::as_str)
      .unwrap_or("https");
    let base_path = self.root.get("basePath").and_then(Value::as_str).unwrap_or_default();
    format!("{scheme}://{host}{}", base_path.trim_end_matches('/'))
  }

  /// Every operation in the document: paths in document order, methods in [`OPERATION_METHODS`] order.
  pub fn operations(&self) -> Vec<OperationRef<'_>> {
    let Some(paths) = self.root.get("paths").and_then(Value::as_object) else {
      return vec![];
    };

    paths
      .iter()
      .filter(|(_, path_item)| path_item.is_object())
      .flat_map(|(path, path_item)| {
        OPERATION_METHODS.iter().filter_map(move |method| {
          let key = method.as_str().to_ascii_lowercase();
          let operation = path_item.get(&key).filter(|op| op.is_object())?;
          Some(OperationRef {
            path,
            method,
            path_item,
            operation,
          })
        })
      })
      .collect()
  }
}

fn yaml_to_json(value: serde_yaml::Value) -> Result<Value, SpecLoadError> {
  use serde_yaml::Value as Yaml;

  Ok(match value {
    Yaml::Null => Value::Null,
    Yaml::Bool(flag) => Value::Bool(flag),
    Yaml::Number(number) => yaml_number(&number)?,
    Yaml::String(text) => Value::String(text),
    Yaml::Sequence(items) => Value::Array(items.into_iter().map(yaml_to_json).collect::<Result<_, _>>()?),
    Yaml::Mapping(mapping) => {
      let mut object = Map::with_capacity(mapping.len());
      for (key, entry) in mapping {
        object.insert(yaml_key(key)?, yaml_to_json(entry)?);
      }
      Value::Object(object)
    }
    Yaml::Tagged(tagged) => yaml_to_json(tagged.value)?,
  })
}

fn yaml_number(number: &serde_yaml::Number) -> Result<Value, SpecLoadError> {
  if let Some(int) = number.as_i64() {
    return Ok(Value::from(int));
  }
  if let Some(int) = number.as_u64() {
    return Ok(Value::from(int));
  }
  number
    .as_f64()
    .and_then(Number::from_f64)
    .map(Value::Number)
    .ok_or_else(|| SpecLoadError::UnrepresentableYaml(format!("non-finite number {number}")))
}

// Response codes are commonly written as bare integers in YAML.
fn yaml_key(key: serde_yaml::Value) -> Result<String, SpecLoadError> {
  use serde_yaml::Value as Yaml;

  match key {
    Yaml::String(text) => Ok(text),
    Yaml::Number(number) => Ok(number.to_string()),
    Yaml::Bool(flag) => Ok(flag.to_string()),
    Yaml::Null => Ok("null".to_string()),
    Yaml::Tagged(tagged) => yaml_key(tagged.value),
    other => Err(SpecLoadError::UnrepresentableYaml(format!(
      "mapping key must be a scalar, got {other:?}"
    ))),
  }
}
