//! Post-assembly hooks run on every collection the factory builds.
//!
//! Workers run in registration order and mutate the collection in place. A failing worker
//! stops the chain, and whatever the earlier workers changed stays changed; callers that
//! need isolation have to snapshot the collection themselves.

use log::trace;
use regex::Regex;

use crate::asset::AssetCollection;
use crate::filter::FilterHandle;

/// A hook that post-processes a freshly assembled collection.
pub trait Worker: Send + Sync {
  /// Inspect or mutate `asset`.
  fn process(&self, asset: &mut AssetCollection) -> anyhow::Result<()>;
}

impl<F> Worker for F
where
  F: Fn(&mut AssetCollection) -> anyhow::Result<()> + Send + Sync,
{
  fn process(&self, asset: &mut AssetCollection) -> anyhow::Result<()> {
    self(asset)
  }
}

/// Ensures a filter on collections whose target path matches a pattern, and optionally on
/// children whose source path matches it.
#[derive(Debug, Clone)]
pub struct EnsureFilterWorker {
  pattern: Regex,
  filter: FilterHandle,
  check_target: bool,
  check_sources: bool,
}

impl EnsureFilterWorker {
  /// Match `pattern` against the collection's target path.
  pub fn new(pattern: Regex, filter: FilterHandle) -> Self {
    Self {
      pattern,
      filter,
      check_target: true,
      check_sources: false,
    }
  }

  /// Toggle matching the collection's target path.
  pub fn check_target(mut self, enabled: bool) -> Self {
    self.check_target = enabled;
    self
  }

  /// Toggle matching each direct child's source path.
  pub fn check_sources(mut self, enabled: bool) -> Self {
    self.check_sources = enabled;
    self
  }
}

impl Worker for EnsureFilterWorker {
  fn process(&self, asset: &mut AssetCollection) -> anyhow::Result<()> {
    if self.check_target
      && asset
        .target_path()
        .is_some_and(|target| self.pattern.is_match(target))
    {
      trace!("ensuring filter \"{}\" on collection", self.filter.name());
      asset.ensure_filter(self.filter.clone());
    }

    if self.check_sources {
      for child in asset.children_mut() {
        let matches = child
          .source_path()
          .is_some_and(|source| self.pattern.is_match(source));
        if matches {
          child.ensure_filter(self.filter.clone());
        }
      }
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use super::*;
  use crate::asset::{FileAsset, HttpAsset};

  fn cssmin() -> FilterHandle {
    FilterHandle::new(
      "cssmin",
      Arc::new(|content: &str| -> anyhow::Result<String> { Ok(content.trim().to_string()) }),
    )
  }

  fn collection(target: &str) -> AssetCollection {
    let mut collection = AssetCollection::new();
    collection.add(FileAsset::new("/site/a.css", None, None));
    collection.add(HttpAsset::new("https://cdn/b.js"));
    collection.set_target_path(target);
    collection
  }

  #[test]
  fn ensures_filter_on_matching_targets() {
    let worker = EnsureFilterWorker::new(Regex::new(r"\.css$").unwrap(), cssmin());

    let mut css = collection("out/abc.css");
    worker.process(&mut css).unwrap();
    worker.process(&mut css).unwrap();
    assert_eq!(css.filters().names(), vec!["cssmin"]);

    let mut js = collection("out/abc.js");
    worker.process(&mut js).unwrap();
    assert!(js.filters().is_empty());
  }

  #[test]
  fn can_match_child_sources_instead() {
    let worker = EnsureFilterWorker::new(Regex::new(r"\.css$").unwrap(), cssmin())
      .check_target(false)
      .check_sources(true);

    let mut asset = collection("out/abc.css");
    worker.process(&mut asset).unwrap();

    assert!(asset.filters().is_empty());
    assert_eq!(asset.children()[0].filters().names(), vec!["cssmin"]);
    assert!(asset.children()[1].filters().is_empty());
  }

  #[test]
  fn closures_are_workers() {
    let worker = |asset: &mut AssetCollection| -> anyhow::Result<()> {
      asset.set_target_path("rewritten.css");
      Ok(())
    };
    let mut asset = collection("out/abc.css");
    worker.process(&mut asset).unwrap();
    assert_eq!(asset.target_path(), Some("rewritten.css"));
  }
}
