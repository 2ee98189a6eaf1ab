//! Turns one input descriptor into a leaf asset.

use log::debug;

use crate::asset::{Asset, AssetReference, FileAsset, GlobAsset, HttpAsset};
use crate::error::{FactoryError, FactoryResult};
use crate::paths::{InputKind, WILDCARD, classify, find_root_dir, join_root, strip_root};
use crate::registry::ReferenceLookup;

/// Everything the resolver needs besides the descriptor itself.
#[derive(Clone, Copy)]
pub struct ResolveContext<'a> {
  /// Factory root relative descriptors are joined onto.
  pub root: &'a str,
  /// Candidate roots for absolute descriptors, searched in order.
  pub roots: &'a [String],
  /// Registry `@name` descriptors are looked up in.
  pub references: Option<&'a dyn ReferenceLookup>,
  /// Output variables every resolved leaf carries.
  pub vars: &'a [String],
}

/// Resolve a descriptor into a reference, remote, glob or file asset.
///
/// No filesystem access happens here; files and globs are only described.
pub fn resolve(input: &str, context: &ResolveContext<'_>) -> FactoryResult<Asset> {
  if input.is_empty() {
    return Err(FactoryError::InvalidInput("empty input descriptor".into()));
  }

  let kind = classify(input);
  let asset: Asset = match kind {
    InputKind::Reference(name) => resolve_reference(name, context.references)?.into(),
    InputKind::Remote(url) => HttpAsset::new(url).into(),
    InputKind::AbsolutePath(path) => {
      let root = find_root_dir(path, context.roots);
      let relative = root.map(|root| strip_root(path, root).to_string());
      path_asset(path.to_string(), root.map(str::to_string), relative)
    }
    InputKind::RelativePath(path) => path_asset(
      join_root(context.root, path),
      Some(context.root.to_string()),
      Some(path.to_string()),
    ),
  };

  debug!(
    "resolved {} \"{input}\" to {} asset {}",
    kind.label(),
    asset.kind(),
    asset.source_path().unwrap_or_default()
  );
  Ok(asset.with_vars(context.vars.to_vec()))
}

fn resolve_reference(
  name: &str,
  references: Option<&dyn ReferenceLookup>,
) -> FactoryResult<AssetReference> {
  if name.is_empty() {
    return Err(FactoryError::InvalidInput("empty asset reference".into()));
  }

  let references = references.ok_or(FactoryError::ConfigurationMissing("asset manager"))?;
  let asset = references
    .get(name)
    .ok_or_else(|| FactoryError::LookupFailed {
      kind: "asset",
      name: name.to_string(),
    })?;
  Ok(AssetReference::new(name, asset))
}

fn path_asset(full_path: String, root: Option<String>, relative: Option<String>) -> Asset {
  if full_path.contains(WILDCARD) {
    GlobAsset::new(full_path, root).into()
  } else {
    FileAsset::new(full_path, root, relative).into()
  }
}
