//! Factory configuration loader.

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use serde::Deserialize;
use thiserror::Error;

use crate::paths::anchor_root;

const DEFAULT_CONFIG_FILES: [&str; 2] = ["assets.config.json", "assets.config.yaml"];

/// Process-wide defaults an [`crate::AssetFactory`] is built from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FactoryConfig {
  /// Directory relative descriptors are resolved against. A relative root is anchored at
  /// the directory the configuration was loaded from.
  pub root: String,
  /// Whether `?`-prefixed filters are skipped by default.
  pub debug: bool,
  /// Output template used when a call does not supply one; `*` is replaced by the name.
  pub default_output: String,
}

impl Default for FactoryConfig {
  fn default() -> Self {
    Self {
      root: ".".into(),
      debug: false,
      default_output: "assets/*".into(),
    }
  }
}

/// Errors raised while reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// The file could not be read.
  #[error("failed to read {}", .0.display())]
  Io(PathBuf, #[source] std::io::Error),
  /// The file is not valid JSON.
  #[error("failed to parse {}", .0.display())]
  Json(PathBuf, #[source] serde_json::Error),
  /// The file is not valid YAML.
  #[error("failed to parse {}", .0.display())]
  Yaml(PathBuf, #[source] serde_yaml::Error),
  /// The extension is neither `.json`, `.yaml` nor `.yml`.
  #[error("unsupported configuration format for {}", .0.display())]
  UnsupportedFormat(PathBuf),
}

impl FactoryConfig {
  /// Load the first configuration file found in `dir`.
  ///
  /// Missing files yield the defaults. A file that exists but fails to load is logged and
  /// also replaced by the defaults so callers can keep going. Either way the root ends up
  /// anchored at `dir`.
  pub fn discover(dir: &Path) -> Self {
    for file in DEFAULT_CONFIG_FILES {
      let candidate = dir.join(file);
      if !candidate.is_file() {
        continue;
      }

      match Self::from_path(&candidate) {
        Ok(config) => return config,
        Err(err) => {
          warn!("{err}, falling back to default configuration");
          return Self::default().anchored_at(dir);
        }
      }
    }

    Self::default().anchored_at(dir)
  }

  /// Read configuration from a JSON or YAML file, chosen by extension.
  pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
    let format = path
      .extension()
      .and_then(|ext| ext.to_str())
      .map(str::to_ascii_lowercase);
    let parse: fn(&Path, &str) -> Result<Self, ConfigError> = match format.as_deref() {
      Some("json") => Self::from_json,
      Some("yaml" | "yml") => Self::from_yaml,
      _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };

    let content =
      fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
    let config = parse(path, &content)?;
    let dir = path
      .parent()
      .filter(|dir| !dir.as_os_str().is_empty())
      .unwrap_or(Path::new("."));
    Ok(config.anchored_at(dir))
  }

  /// Anchor a relative root at `dir`, made absolute against the working directory first.
  pub fn anchored_at(mut self, dir: &Path) -> Self {
    match std::path::absolute(dir) {
      Ok(dir) => self.root = anchor_root(&self.root, &dir),
      Err(err) => warn!("cannot anchor root \"{}\" at {}: {err}", self.root, dir.display()),
    }
    self
  }

  fn from_json(path: &Path, content: &str) -> Result<Self, ConfigError> {
    serde_json::from_str(content).map_err(|err| ConfigError::Json(path.to_path_buf(), err))
  }

  fn from_yaml(path: &Path, content: &str) -> Result<Self, ConfigError> {
    serde_yaml::from_str(content).map_err(|err| ConfigError::Yaml(path.to_path_buf(), err))
  }
}
