use std::collections::BTreeMap;
use std::sync::Arc;

use super::validate_name;
use crate::asset::Asset;
use crate::error::FactoryResult;

/// Resolves `@name` descriptors to registered assets.
pub trait ReferenceLookup: Send + Sync {
  /// Returns the asset registered under `name`, if any.
  fn get(&self, name: &str) -> Option<Arc<Asset>>;
}

/// In-memory asset registry.
#[derive(Debug, Clone, Default)]
pub struct AssetManager {
  assets: BTreeMap<String, Arc<Asset>>,
}

impl AssetManager {
  /// Empty registry.
  pub fn new() -> Self {
    Self::default()
  }

  /// Register `asset` under `name`, replacing any previous registration.
  pub fn set(&mut self, name: &str, asset: impl Into<Asset>) -> FactoryResult<()> {
    validate_name("asset", name)?;
    self.assets.insert(name.to_string(), Arc::new(asset.into()));
    Ok(())
  }

  /// Whether an asset is registered under `name`.
  pub fn has(&self, name: &str) -> bool {
    self.assets.contains_key(name)
  }

  /// Registered names in lexical order.
  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.assets.keys().map(String::as_str)
  }
}

impl ReferenceLookup for AssetManager {
  fn get(&self, name: &str) -> Option<Arc<Asset>> {
    self.assets.get(name).cloned()
  }
}
