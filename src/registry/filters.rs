use std::collections::BTreeMap;
use std::sync::Arc;

use super::validate_name;
use crate::error::FactoryResult;
use crate::filter::{Filter, FilterHandle};

/// Resolves filter names to filter objects.
pub trait FilterLookup: Send + Sync {
  /// Returns the filter registered under `name`, if any.
  fn get(&self, name: &str) -> Option<FilterHandle>;
}

/// In-memory filter registry.
#[derive(Clone, Default)]
pub struct FilterManager {
  filters: BTreeMap<String, Arc<dyn Filter>>,
}

impl FilterManager {
  /// Empty registry.
  pub fn new() -> Self {
    Self::default()
  }

  /// Register `filter` under `name`, replacing any previous registration.
  pub fn set(&mut self, name: &str, filter: Arc<dyn Filter>) -> FactoryResult<()> {
    validate_name("filter", name)?;
    self.filters.insert(name.to_string(), filter);
    Ok(())
  }

  /// Whether a filter is registered under `name`.
  pub fn has(&self, name: &str) -> bool {
    self.filters.contains_key(name)
  }

  /// Registered names in lexical order.
  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.filters.keys().map(String::as_str)
  }
}

impl std::fmt::Debug for FilterManager {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_set().entries(self.filters.keys()).finish()
  }
}

impl FilterLookup for FilterManager {
  fn get(&self, name: &str) -> Option<FilterHandle> {
    self
      .filters
      .get(name)
      .map(|filter| FilterHandle::new(name, Arc::clone(filter)))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn passthrough() -> Arc<dyn Filter> {
    Arc::new(|content: &str| -> anyhow::Result<String> { Ok(content.to_string()) })
  }

  #[test]
  fn lookups_return_the_registered_object() {
    let mut manager = FilterManager::new();
    let filter = passthrough();
    manager.set("minify", filter.clone()).unwrap();

    let first = manager.get("minify").unwrap();
    let second = manager.get("minify").unwrap();
    assert_eq!(first.name(), "minify");
    assert!(Arc::ptr_eq(first.filter(), &filter));
    assert!(first.is_same_filter(&second));
    assert!(manager.get("uglify").is_none());
  }

  #[test]
  fn refuses_names_with_the_debug_sentinel() {
    let mut manager = FilterManager::new();
    assert!(manager.set("?minify", passthrough()).is_err());
    assert!(!manager.has("?minify"));
    assert!(!manager.has("minify"));
  }

  #[test]
  fn lists_names_in_order() {
    let mut manager = FilterManager::new();
    manager.set("sass", passthrough()).unwrap();
    manager.set("cssmin", passthrough()).unwrap();
    assert_eq!(manager.names().collect::<Vec<_>>(), vec!["cssmin", "sass"]);
  }
}
