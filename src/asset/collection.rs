use super::{Asset, AssetState, AssetSummary};
use crate::filter::{FilterChain, FilterHandle};

/// Composite asset: ordered children sharing one filter chain and one target path.
///
/// Children are consumed in insertion order, which is the order their content ends up
/// concatenated in.
#[derive(Debug, Clone, Default)]
pub struct AssetCollection {
  children: Vec<Asset>,
  pub(super) state: AssetState,
}

impl AssetCollection {
  /// Empty collection.
  pub fn new() -> Self {
    Self::default()
  }

  /// Append a child asset.
  pub fn add(&mut self, asset: impl Into<Asset>) {
    self.children.push(asset.into());
  }

  /// Child assets in insertion order.
  pub fn children(&self) -> &[Asset] {
    &self.children
  }

  /// Mutable access to the children, for workers.
  pub fn children_mut(&mut self) -> &mut [Asset] {
    &mut self.children
  }

  /// Number of direct children.
  pub fn len(&self) -> usize {
    self.children.len()
  }

  /// Whether the collection has no children.
  pub fn is_empty(&self) -> bool {
    self.children.is_empty()
  }

  /// Filters shared by the whole collection.
  pub fn filters(&self) -> &FilterChain {
    self.state.filters()
  }

  /// Attach a filter to the collection unless an equivalent one is already present.
  pub fn ensure_filter(&mut self, filter: FilterHandle) -> bool {
    self.state.ensure_filter(filter)
  }

  /// Output path, once bound.
  pub fn target_path(&self) -> Option<&str> {
    self.state.target_path()
  }

  /// Bind the output path.
  pub fn set_target_path(&mut self, path: impl Into<String>) {
    self.state.set_target_path(path);
  }

  /// Output variables.
  pub fn vars(&self) -> &[String] {
    self.state.vars()
  }

  /// Replace the output variables.
  pub fn set_vars(&mut self, vars: Vec<String>) {
    self.state.set_vars(vars);
  }

  /// Serializable description of the collection and its children.
  pub fn summary(&self) -> AssetSummary {
    AssetSummary::of_collection(self)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::asset::{FileAsset, HttpAsset};

  #[test]
  fn keeps_children_in_insertion_order() {
    let mut collection = AssetCollection::new();
    collection.add(FileAsset::new("/site/b.css", None, None));
    collection.add(HttpAsset::new("https://cdn/a.css"));
    collection.add(AssetCollection::new());

    let kinds: Vec<_> = collection.children().iter().map(Asset::kind).collect();
    assert_eq!(kinds, vec!["file", "http", "collection"]);
    assert_eq!(collection.len(), 3);
  }

  #[test]
  fn starts_empty_without_target() {
    let collection = AssetCollection::new();
    assert!(collection.is_empty());
    assert!(collection.filters().is_empty());
    assert_eq!(collection.target_path(), None);
  }
}
