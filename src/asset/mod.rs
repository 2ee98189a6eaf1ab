//! In-memory asset graph: leaf assets, composite collections and their shared state.

mod collection;
mod leaf;
mod summary;

pub use collection::AssetCollection;
pub use leaf::{AssetReference, FileAsset, GlobAsset, HttpAsset};
pub use summary::AssetSummary;

use crate::filter::{FilterChain, FilterHandle};

/// State every asset carries regardless of where its content comes from.
#[derive(Debug, Clone, Default)]
pub struct AssetState {
  filters: FilterChain,
  target_path: Option<String>,
  vars: Vec<String>,
}

impl AssetState {
  /// Filters attached to the asset.
  pub fn filters(&self) -> &FilterChain {
    &self.filters
  }

  /// Attach a filter unless an equivalent one is already present.
  pub fn ensure_filter(&mut self, filter: FilterHandle) -> bool {
    self.filters.ensure(filter)
  }

  /// Output path the asset will be written to, once known.
  pub fn target_path(&self) -> Option<&str> {
    self.target_path.as_deref()
  }

  /// Bind the output path.
  pub fn set_target_path(&mut self, path: impl Into<String>) {
    self.target_path = Some(path.into());
  }

  /// Names of the output variables the asset depends on.
  pub fn vars(&self) -> &[String] {
    &self.vars
  }

  /// Replace the output variables.
  pub fn set_vars(&mut self, vars: Vec<String>) {
    self.vars = vars;
  }
}

/// Any node of the asset graph.
#[derive(Debug, Clone)]
pub enum Asset {
  /// Single file on disk.
  File(FileAsset),
  /// Wildcard pattern expanded into files on demand.
  Glob(GlobAsset),
  /// Remote resource addressed by URL.
  Http(HttpAsset),
  /// Named asset registered with an asset manager.
  Reference(AssetReference),
  /// Ordered group of assets sharing filters and a target path.
  Collection(AssetCollection),
}

impl Asset {
  /// Short lowercase label for the variant.
  pub fn kind(&self) -> &'static str {
    match self {
      Self::File(_) => "file",
      Self::Glob(_) => "glob",
      Self::Http(_) => "http",
      Self::Reference(_) => "reference",
      Self::Collection(_) => "collection",
    }
  }

  /// Shared state of the asset.
  pub fn state(&self) -> &AssetState {
    match self {
      Self::File(asset) => &asset.state,
      Self::Glob(asset) => &asset.state,
      Self::Http(asset) => &asset.state,
      Self::Reference(asset) => &asset.state,
      Self::Collection(asset) => &asset.state,
    }
  }

  /// Mutable shared state of the asset.
  pub fn state_mut(&mut self) -> &mut AssetState {
    match self {
      Self::File(asset) => &mut asset.state,
      Self::Glob(asset) => &mut asset.state,
      Self::Http(asset) => &mut asset.state,
      Self::Reference(asset) => &mut asset.state,
      Self::Collection(asset) => &mut asset.state,
    }
  }

  /// Builder-style variant of [`AssetState::set_vars`].
  pub fn with_vars(mut self, vars: Vec<String>) -> Self {
    self.state_mut().set_vars(vars);
    self
  }

  /// Filters attached to the asset.
  pub fn filters(&self) -> &FilterChain {
    self.state().filters()
  }

  /// Attach a filter unless an equivalent one is already present.
  pub fn ensure_filter(&mut self, filter: FilterHandle) -> bool {
    self.state_mut().ensure_filter(filter)
  }

  /// Output path, once bound.
  pub fn target_path(&self) -> Option<&str> {
    self.state().target_path()
  }

  /// Bind the output path.
  pub fn set_target_path(&mut self, path: impl Into<String>) {
    self.state_mut().set_target_path(path);
  }

  /// Output variables.
  pub fn vars(&self) -> &[String] {
    self.state().vars()
  }

  /// Where the asset's content comes from: a file path, glob pattern, URL or reference name.
  pub fn source_path(&self) -> Option<&str> {
    match self {
      Self::File(asset) => Some(asset.source_path()),
      Self::Glob(asset) => Some(asset.pattern()),
      Self::Http(asset) => Some(asset.url()),
      Self::Reference(asset) => Some(asset.name()),
      Self::Collection(_) => None,
    }
  }

  /// Root directory the source path was resolved against, when known.
  pub fn source_root(&self) -> Option<&str> {
    match self {
      Self::File(asset) => asset.source_root(),
      Self::Glob(asset) => asset.base_dir(),
      Self::Http(_) | Self::Reference(_) | Self::Collection(_) => None,
    }
  }

  /// Serializable description of this asset and everything below it.
  pub fn summary(&self) -> AssetSummary {
    AssetSummary::of(self)
  }
}

impl From<FileAsset> for Asset {
  fn from(asset: FileAsset) -> Self {
    Self::File(asset)
  }
}

impl From<GlobAsset> for Asset {
  fn from(asset: GlobAsset) -> Self {
    Self::Glob(asset)
  }
}

impl From<HttpAsset> for Asset {
  fn from(asset: HttpAsset) -> Self {
    Self::Http(asset)
  }
}

impl From<AssetReference> for Asset {
  fn from(asset: AssetReference) -> Self {
    Self::Reference(asset)
  }
}

impl From<AssetCollection> for Asset {
  fn from(asset: AssetCollection) -> Self {
    Self::Collection(asset)
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use super::*;

  #[test]
  fn exposes_sources_per_variant() {
    let file: Asset =
      FileAsset::new("/site/a.css", Some("/site".into()), Some("a.css".into())).into();
    let http: Asset = HttpAsset::new("https://cdn/x.js").into();

    assert_eq!(file.kind(), "file");
    assert_eq!(file.source_path(), Some("/site/a.css"));
    assert_eq!(file.source_root(), Some("/site"));
    assert_eq!(http.source_path(), Some("https://cdn/x.js"));
    assert_eq!(http.source_root(), None);
    assert_eq!(Asset::from(AssetCollection::new()).source_path(), None);
  }

  #[test]
  fn state_is_shared_across_variants() {
    let mut asset: Asset = HttpAsset::new("//cdn/x.js").into();
    asset = asset.with_vars(vec!["locale".into()]);
    asset.set_target_path("js/x.js");
    let upper = FilterHandle::new(
      "upper",
      Arc::new(|content: &str| -> anyhow::Result<String> { Ok(content.to_uppercase()) }),
    );
    assert!(asset.ensure_filter(upper.clone()));
    assert!(!asset.ensure_filter(upper));

    assert_eq!(asset.target_path(), Some("js/x.js"));
    assert_eq!(asset.vars(), ["locale".to_string()]);
    assert_eq!(asset.filters().names(), vec!["upper"]);
  }
}
